use crate::actions::{extract_domain, BrowserActions};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Interval between element lookups while waiting for a selector.
const SELECTOR_POLL_MS: u64 = 250;

/// Browser automation engine driving a single page.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserEngine {
    /// Launch a browser with default settings
    pub async fn new() -> Result<Self> {
        Self::launch(&vipon_core::BrowserConfig::default()).await
    }

    /// Launch a browser configured from application settings
    pub async fn launch(config: &vipon_core::BrowserConfig) -> Result<Self> {
        let fingerprint = FingerprintConfig::from_config(config);

        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height);
        if !config.headless {
            builder = builder.with_head();
        }
        let chrome_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        page.execute(SetUserAgentOverrideParams::new(fingerprint.user_agent.clone()))
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::info!(
            headless = config.headless,
            width = fingerprint.viewport_width,
            height = fingerprint.viewport_height,
            "Browser launched"
        );

        Ok(Self {
            browser,
            page,
            handler,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }

    /// Shut the browser down and stop the event handler
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process wait failed: {}", e);
        }
        self.handler.abort();
        tracing::info!("Browser closed");
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<chromiumoxide::Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        let domain = extract_domain(url)?;
        tracing::debug!(%domain, "Navigating to {}", url);

        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::NavigationError(format!("{url}: {e}"))),
            Err(_) => Err(BrowserError::Timeout(format!(
                "navigation to {url} exceeded {:?}",
                self.navigation_timeout
            ))),
        }
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self.find(selector).await?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        element
            .type_str(value)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.find(selector)
            .await?
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "{selector} did not appear within {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
        }
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        // Statements such as scrollTo evaluate to undefined
        Ok(result.into_value().unwrap_or(serde_json::Value::Null))
    }

    async fn page_source(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}
