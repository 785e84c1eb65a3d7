//! Scroll-driven collection of deal links from the listing page.
//!
//! The listing renders more rows each time the page is scrolled to the
//! bottom. The collector keeps scrolling until enough rows exist or the page
//! stops growing for `max_scroll_attempts` consecutive scrolls.

use crate::error::{Result, ScrapeError};
use crate::parser::{ListingParser, PageParser};
use std::time::Duration;
use vipon_browser::{BrowserActions, SCROLL_TO_BOTTOM};
use vipon_core::{CrawlConfig, DealLink, SelectorConfig};

/// Outcome of a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCollection {
    /// At least the requested number of links was found.
    Complete(Vec<DealLink>),
    /// The listing stopped growing before the target was reached.
    Incomplete { links: Vec<DealLink>, target: usize },
}

impl LinkCollection {
    #[must_use]
    pub fn into_links(self) -> Vec<DealLink> {
        match self {
            Self::Complete(links) | Self::Incomplete { links, .. } => links,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

pub struct LinkCollector<'a, B: BrowserActions + ?Sized> {
    browser: &'a B,
    parser: ListingParser,
    listing_url: String,
    wait_timeout: Duration,
    poll_interval: Duration,
    max_scroll_attempts: u32,
}

impl<'a, B: BrowserActions + ?Sized> LinkCollector<'a, B> {
    pub fn new(browser: &'a B, crawl: &CrawlConfig, selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            browser,
            parser: ListingParser::new(selectors, crawl.listing_url.clone())?,
            listing_url: crawl.listing_url.clone(),
            wait_timeout: Duration::from_secs(crawl.wait_timeout_secs),
            poll_interval: Duration::from_millis(crawl.poll_interval_ms.max(1)),
            max_scroll_attempts: crawl.max_scroll_attempts,
        })
    }

    /// Number of listing rows in the currently rendered page.
    pub async fn get_link_count(&self) -> Result<usize> {
        let html = self.browser.page_source().await?;
        Ok(self.parser.count(&html))
    }

    /// Poll until more than `previous` rows are rendered.
    ///
    /// Returns `None` when the wait times out.
    async fn wait_for_growth(&self, previous: usize) -> Result<Option<usize>> {
        let poll = async {
            loop {
                let count = self.get_link_count().await?;
                if count > previous {
                    return Ok::<usize, ScrapeError>(count);
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        match tokio::time::timeout(self.wait_timeout, poll).await {
            Ok(count) => count.map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Load the listing and scroll until `target_count` rows are rendered.
    ///
    /// A timeout while waiting for the first row is fatal. Timeouts while
    /// waiting for further rows are stalls: they are logged and the loop
    /// scrolls again, giving up after `max_scroll_attempts` in a row.
    pub async fn collect_links(&self, target_count: usize) -> Result<LinkCollection> {
        tracing::info!("Getting links (target {})", target_count);

        self.browser.navigate(&self.listing_url).await?;
        let timeout_ms = u64::try_from(self.wait_timeout.as_millis()).unwrap_or(u64::MAX);
        self.browser
            .wait_for_selector(self.parser.item_selector(), timeout_ms)
            .await?;

        let mut last_count = 0;
        let mut stalls = 0;

        while last_count < target_count {
            if stalls >= self.max_scroll_attempts {
                tracing::warn!(
                    "Listing stopped growing at {} links after {} scrolls without progress",
                    last_count,
                    stalls
                );
                break;
            }

            self.browser.execute_script(SCROLL_TO_BOTTOM).await?;

            match self.wait_for_growth(last_count).await? {
                Some(count) => {
                    stalls = 0;
                    last_count = count;
                }
                None => {
                    stalls += 1;
                    tracing::warn!(
                        "Cannot get more links ({}/{} stalled scrolls)",
                        stalls,
                        self.max_scroll_attempts
                    );
                    last_count = self.get_link_count().await?;
                }
            }
            tracing::debug!("Observed {} links", last_count);
        }

        let html = self.browser.page_source().await?;
        let links = self.parser.parse(&html)?;
        tracing::info!("Collected {} links", links.len());

        if links.len() >= target_count {
            Ok(LinkCollection::Complete(links))
        } else {
            Ok(LinkCollection::Incomplete {
                links,
                target: target_count,
            })
        }
    }
}
