//! Markup parsers for the three page kinds the crawler visits.
//!
//! All knowledge of the site's HTML lives here, driven by
//! [`SelectorConfig`], so a redesign only touches selectors.

use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use vipon_core::{DealLink, SelectorConfig};

/// Kinds of page the crawler parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Listing,
    Detail,
    CodeReveal,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Listing => "listing",
            Self::Detail => "detail",
            Self::CodeReveal => "code-reveal",
        };
        f.write_str(name)
    }
}

/// Parser for one kind of page.
pub trait PageParser {
    type Output;

    fn kind(&self) -> PageKind;

    fn parse(&self, html: &str) -> Result<Self::Output>;
}

/// Fields read from a deal detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailFields {
    pub title: String,
    pub category: String,
    pub dislike: u32,
    pub like: u32,
    pub discount: String,
    pub expiry_time: String,
    pub list_price: String,
    pub sales_price: String,
    pub amazon_url: String,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Non-empty text nodes, trimmed and joined with `separator`.
pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn split_exact<'a, const N: usize>(
    field: &'static str,
    value: &'a str,
    separator: char,
) -> Result<[&'a str; N]> {
    let parts: Vec<&str> = value.split(separator).collect();
    parts
        .try_into()
        .map_err(|parts: Vec<&str>| ScrapeError::MalformedField {
            field,
            value: value.to_string(),
            reason: format!("expected {N} '{separator}'-separated parts, got {}", parts.len()),
        })
}

fn parse_count(field: &'static str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ScrapeError::MalformedField {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Listing page: one row per deal, destination URL inside a click handler.
pub struct ListingParser {
    item: Selector,
    item_source: String,
    handler_attr: String,
    base_url: String,
}

impl ListingParser {
    pub fn new(selectors: &SelectorConfig, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            item: compile(&selectors.listing_item)?,
            item_source: selectors.listing_item.clone(),
            handler_attr: selectors.listing_handler_attr.clone(),
            base_url: base_url.into(),
        })
    }

    /// Number of deal rows currently rendered.
    pub fn count(&self, html: &str) -> usize {
        Html::parse_document(html).select(&self.item).count()
    }

    pub fn item_selector(&self) -> &str {
        &self.item_source
    }

    /// Destination of a handler such as `window.location.href='/product/12'`.
    pub fn handler_target(handler: &str) -> Result<&str> {
        handler
            .split('\'')
            .nth(1)
            .ok_or_else(|| ScrapeError::MalformedLink {
                handler: handler.to_string(),
            })
    }
}

impl PageParser for ListingParser {
    type Output = Vec<DealLink>;

    fn kind(&self) -> PageKind {
        PageKind::Listing
    }

    fn parse(&self, html: &str) -> Result<Vec<DealLink>> {
        let document = Html::parse_document(html);

        document
            .select(&self.item)
            .map(|row| -> Result<DealLink> {
                let handler = row.value().attr(&self.handler_attr).ok_or_else(|| {
                    ScrapeError::MalformedLink {
                        handler: format!("<no {} attribute>", self.handler_attr),
                    }
                })?;
                let target = Self::handler_target(handler)?;
                Ok(DealLink::resolve(&self.base_url, target)?)
            })
            .collect()
    }
}

/// Deal detail page.
pub struct DetailParser {
    title: (Selector, String),
    category: (Selector, String),
    discount: (Selector, String),
    expiry: (Selector, String),
    expiry_value: (Selector, String),
    price: (Selector, String),
    merchant_link: (Selector, String),
}

impl DetailParser {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        let entry = |s: &String| compile(s).map(|sel| (sel, s.clone()));
        Ok(Self {
            title: entry(&selectors.title)?,
            category: entry(&selectors.category)?,
            discount: entry(&selectors.discount)?,
            expiry: entry(&selectors.expiry)?,
            expiry_value: entry(&selectors.expiry_value)?,
            price: entry(&selectors.price)?,
            merchant_link: entry(&selectors.merchant_link)?,
        })
    }

    fn select_first<'a>(
        &self,
        document: &'a Html,
        field: &'static str,
        entry: &(Selector, String),
    ) -> Result<ElementRef<'a>> {
        first_match(self.kind(), document.select(&entry.0), field, &entry.1)
    }
}

fn first_match<'a>(
    page: PageKind,
    mut scope: impl Iterator<Item = ElementRef<'a>>,
    field: &'static str,
    selector: &str,
) -> Result<ElementRef<'a>> {
    scope.next().ok_or_else(|| ScrapeError::MissingField {
        page,
        field,
        selector: selector.to_string(),
    })
}

impl PageParser for DetailParser {
    type Output = DetailFields;

    fn kind(&self) -> PageKind {
        PageKind::Detail
    }

    fn parse(&self, html: &str) -> Result<DetailFields> {
        let document = Html::parse_document(html);

        let title = joined_text(self.select_first(&document, "title", &self.title)?, ",");

        let combined = joined_text(
            self.select_first(&document, "category", &self.category)?,
            ";",
        );
        let [category, dislike, like] = split_exact::<3>("category", &combined, ';')?;
        let dislike = parse_count("dislike", dislike)?;
        let like = parse_count("like", like)?;

        let discount = joined_text(
            self.select_first(&document, "discount", &self.discount)?,
            ",",
        );

        let expiry = self.select_first(&document, "expiry_time", &self.expiry)?;
        let expiry_time = first_match(
            self.kind(),
            expiry.select(&self.expiry_value.0),
            "expiry_time",
            &self.expiry_value.1,
        )?
        .text()
        .collect::<String>();

        let prices = joined_text(self.select_first(&document, "price", &self.price)?, ",");
        let [list_price, sales_price] = split_exact::<2>("price", &prices, ',')?;

        let anchor = self.select_first(&document, "amazon_url", &self.merchant_link)?;
        let amazon_url = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MissingField {
                page: self.kind(),
                field: "amazon_url",
                selector: format!("{}[href]", self.merchant_link.1),
            })?
            .to_string();

        Ok(DetailFields {
            title,
            category: category.to_string(),
            dislike,
            like,
            discount,
            expiry_time,
            list_price: list_price.to_string(),
            sales_price: sales_price.to_string(),
            amazon_url,
        })
    }
}

/// Code-reveal page. A missing container yields `None`.
pub struct CodeParser {
    container: Selector,
}

impl CodeParser {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            container: compile(&selectors.code_container)?,
        })
    }
}

impl PageParser for CodeParser {
    type Output = Option<String>;

    fn kind(&self) -> PageKind {
        PageKind::CodeReveal
    }

    fn parse(&self, html: &str) -> Result<Option<String>> {
        let document = Html::parse_document(html);
        let Some(container) = document.select(&self.container).next() else {
            return Ok(None);
        };

        // The code is the last text chunk, after any label
        let text = joined_text(container, ",");
        Ok(text
            .rsplit(',')
            .next()
            .filter(|code| !code.is_empty())
            .map(ToString::to_string))
    }
}
