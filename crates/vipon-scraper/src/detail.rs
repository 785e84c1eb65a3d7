//! Per-deal extraction from detail and code-reveal pages.

use crate::error::Result;
use crate::parser::{CodeParser, DetailParser, PageParser};
use crate::record::ExtractedDeal;
use crate::session::Session;
use crate::throttle::Throttle;
use vipon_browser::BrowserActions;
use vipon_core::{CrawlConfig, DealLink, SelectorConfig};

pub struct DetailExtractor<'s, 'a, B: BrowserActions + ?Sized> {
    browser: &'a B,
    session: &'s Session<'a, B>,
    detail: DetailParser,
    code: CodeParser,
    crawl: &'a CrawlConfig,
    throttle: Throttle,
}

impl<'s, 'a, B: BrowserActions + ?Sized> DetailExtractor<'s, 'a, B> {
    pub fn new(
        browser: &'a B,
        session: &'s Session<'a, B>,
        crawl: &'a CrawlConfig,
        selectors: &SelectorConfig,
    ) -> Result<Self> {
        Ok(Self {
            browser,
            session,
            detail: DetailParser::new(selectors)?,
            code: CodeParser::new(selectors)?,
            crawl,
            throttle: Throttle::from_config(crawl),
        })
    }

    #[must_use]
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Extract one deal.
    ///
    /// Any missing or malformed detail field is an error. With `fetch_code`
    /// the session logs in again and the code-reveal page is parsed; a
    /// missing code container yields `code: None`.
    pub async fn extract(&self, link: &DealLink, fetch_code: bool) -> Result<ExtractedDeal> {
        self.browser.navigate(link.as_str()).await?;
        let html = self.browser.page_source().await?;

        let product_id = link.product_id()?;
        let fields = self.detail.parse(&html)?;

        self.throttle.pause().await;

        let code = if fetch_code {
            self.session.login().await?;
            let code_url = self.crawl.code_url(product_id);
            self.browser.navigate(&code_url).await?;
            let code = self.code.parse(&self.browser.page_source().await?)?;
            if code.is_none() {
                tracing::debug!("No code revealed for product {}", product_id);
            }
            code
        } else {
            None
        };

        self.throttle.pause().await;

        Ok(ExtractedDeal {
            product_id,
            fields,
            code,
        })
    }
}
