//! Vipon deal crawler.
//!
//! Logs in, collects deal links from the instant-promotion listing, extracts
//! every deal and writes the result to `deals_info_YYYYMMDD.csv`.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vipon_browser::BrowserEngine;
use vipon_core::{AppConfig, ConfigResult, Credentials, PASSWORD_VAR, USERNAME_VAR};
use vipon_scraper::{export, Crawler};

#[derive(Debug, Parser)]
#[command(name = "vipon")]
#[command(about = "Crawl coupon deals from vipon.com into a CSV file")]
#[command(version)]
struct Cli {
    /// Config file, defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of deal links to collect
    #[arg(long)]
    target: Option<usize>,

    /// Log in and fetch the redemption code of every deal
    #[arg(long)]
    fetch_codes: bool,

    /// Directory the CSV is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Account email, defaults to `$vipon_username`
    #[arg(long)]
    username: Option<String>,

    /// Account password, defaults to `$vipon_password`
    #[arg(long)]
    password: Option<String>,
}

impl Cli {
    /// Flags take precedence over the config file and environment.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(target) = self.target {
            config.crawl.target_links = target;
        }
        if self.fetch_codes {
            config.crawl.fetch_codes = true;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory.clone_from(dir);
        }
        if self.headed {
            config.browser.headless = false;
        }
    }

    /// Credentials from the flags, falling back to the environment.
    fn credentials(&self) -> ConfigResult<Credentials> {
        self.credentials_with(|var| std::env::var(var).ok())
    }

    fn credentials_with<F>(&self, env: F) -> ConfigResult<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        Credentials::from_lookup(|var| {
            let flag = match var {
                USERNAME_VAR => self.username.clone(),
                PASSWORD_VAR => self.password.clone(),
                _ => None,
            };
            flag.or_else(|| env(var))
        })
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vipon=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    info!("Starting vipon v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_with_env(cli.config.as_deref()).context("loading config")?;
    cli.apply(&mut config);
    config.validate().context("invalid settings")?;
    let credentials = cli.credentials().context("reading credentials")?;

    let browser = BrowserEngine::launch(&config.browser)
        .await
        .context("launching browser")?;
    let crawler = Crawler::new(browser, credentials, config);

    let outcome = crawler.run().await;
    let output = crawler.config().output.clone();
    if let Err(e) = crawler.into_browser().close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }

    let table = outcome.context("crawl failed")?;
    let path = export::write_csv(&table, &output).context("writing CSV")?;
    info!("Saved {} deals to {}", table.len(), path.display());

    Ok(())
}
