use rand::Rng;

/// Common desktop user agents
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Fingerprint presented to the site
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Fingerprint with a randomly chosen desktop user agent
    pub fn randomized(viewport_width: u32, viewport_height: u32) -> Self {
        let mut rng = rand::thread_rng();
        let ua_idx = rng.gen_range(0..USER_AGENTS.len());

        Self {
            user_agent: USER_AGENTS[ua_idx].to_string(),
            viewport_width,
            viewport_height,
        }
    }

    /// Build from browser settings, honouring a fixed user agent if configured
    pub fn from_config(config: &vipon_core::BrowserConfig) -> Self {
        let mut fingerprint = Self::randomized(config.window_width, config.window_height);
        if let Some(ua) = &config.user_agent {
            fingerprint.user_agent.clone_from(ua);
        }
        fingerprint
    }
}
