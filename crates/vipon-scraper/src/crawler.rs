//! End-to-end crawl: login, collect links, extract each deal, aggregate.

use crate::detail::DetailExtractor;
use crate::error::Result;
use crate::links::{LinkCollection, LinkCollector};
use crate::record::{ResultAggregator, ResultTable};
use crate::session::Session;
use crate::throttle::Throttle;
use chrono::NaiveDate;
use vipon_browser::BrowserActions;
use vipon_core::{AppConfig, Credentials};

/// Runs one crawl against a single, exclusively owned browser.
pub struct Crawler<B: BrowserActions> {
    browser: B,
    credentials: Credentials,
    config: AppConfig,
    throttle: Option<Throttle>,
}

impl<B: BrowserActions> Crawler<B> {
    #[must_use]
    pub fn new(browser: B, credentials: Credentials, config: AppConfig) -> Self {
        Self {
            browser,
            credentials,
            config,
            throttle: None,
        }
    }

    /// Replace the throttle derived from the crawl config.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = Some(throttle);
        self
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Give the browser back, e.g. to close it.
    pub fn into_browser(self) -> B {
        self.browser
    }

    /// Crawl and stamp the table with today's local date.
    pub async fn run(&self) -> Result<ResultTable> {
        self.run_on(chrono::Local::now().date_naive()).await
    }

    /// Crawl and stamp the table with `crawl_date`.
    ///
    /// The first extraction error aborts the crawl and discards earlier rows.
    pub async fn run_on(&self, crawl_date: NaiveDate) -> Result<ResultTable> {
        let crawl = &self.config.crawl;
        let selectors = &self.config.selectors;

        let session = Session::new(
            &self.browser,
            self.credentials.clone(),
            crawl.login_url.clone(),
            selectors,
        );
        session.login().await?;

        let collector = LinkCollector::new(&self.browser, crawl, selectors)?;
        let links = match collector.collect_links(crawl.target_links).await? {
            LinkCollection::Complete(links) => links,
            LinkCollection::Incomplete { links, target } => {
                tracing::warn!(
                    "Collected only {} of {} requested links, continuing with what was found",
                    links.len(),
                    target
                );
                links
            }
        };

        let mut extractor = DetailExtractor::new(&self.browser, &session, crawl, selectors)?;
        if let Some(throttle) = self.throttle {
            extractor = extractor.with_throttle(throttle);
        }

        let mut aggregator = ResultAggregator::new();
        let total = links.len();
        for (index, link) in links.iter().enumerate() {
            tracing::info!("Checking link {} of {}", index + 1, total);
            let deal = extractor.extract(link, crawl.fetch_codes).await?;
            aggregator.push(deal);
        }

        let table = aggregator.finalize(crawl_date);
        tracing::info!("Finished: {} deals", table.len());
        Ok(table)
    }
}
