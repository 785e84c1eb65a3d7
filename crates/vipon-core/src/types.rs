//! Shared types used across the crawler.
//!
//! Newtypes for the identifiers that flow between the link collector,
//! the detail extractor and the exported table.

use crate::error::ViponError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Numeric product identifier of a deal.
///
/// Parsed from the trailing path segment of a detail-page URL and used to
/// build the code-reveal URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw numeric id.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse a product id from its decimal text form.
    ///
    /// # Errors
    /// Returns error if the text is not a plain run of ASCII digits.
    pub fn parse(text: &str) -> Result<Self, ViponError> {
        static DIGITS: OnceLock<Regex> = OnceLock::new();
        let regex = DIGITS.get_or_init(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

        if !regex.is_match(text) {
            return Err(ViponError::Validation(format!(
                "invalid product ID: expected digits, got '{text}'"
            )));
        }

        text.parse::<u64>()
            .map(Self)
            .map_err(|e| ViponError::Validation(format!("invalid product ID '{text}': {e}")))
    }

    /// Get the inner numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL of a single deal detail page, as discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealLink(String);

impl DealLink {
    /// Create a new `DealLink` from a URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Resolve a possibly relative handler target against the page it came from.
    ///
    /// # Errors
    /// Returns error if neither the base nor the joined URL is valid.
    pub fn resolve(base: &str, target: &str) -> Result<Self, ViponError> {
        if target.starts_with("http://") || target.starts_with("https://") {
            return Ok(Self(target.to_string()));
        }

        let base = url::Url::parse(base)
            .map_err(|e| ViponError::Validation(format!("invalid base URL '{base}': {e}")))?;
        let joined = base
            .join(target)
            .map_err(|e| ViponError::Validation(format!("invalid link '{target}': {e}")))?;
        Ok(Self(joined.to_string()))
    }

    /// Get the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Product id taken from the last `/`-separated segment of the URL.
    ///
    /// # Errors
    /// Returns error if that segment is not numeric.
    pub fn product_id(&self) -> Result<ProductId, ViponError> {
        let segment = self.0.rsplit('/').next().unwrap_or_default();
        ProductId::parse(segment)
    }
}

impl fmt::Display for DealLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parse() {
        assert_eq!(ProductId::parse("12345").unwrap().get(), 12345);
        assert!(ProductId::parse("").is_err());
        assert!(ProductId::parse("+12").is_err());
        assert!(ProductId::parse("12a").is_err());
    }

    #[test]
    fn test_product_id_from_link() {
        let link = DealLink::new("https://www.vipon.com/product/987654");
        assert_eq!(link.product_id().unwrap(), ProductId::new(987_654));

        let link = DealLink::new("https://www.vipon.com/product/");
        assert!(link.product_id().is_err());
    }

    #[test]
    fn test_resolve_relative_link() {
        let link = DealLink::resolve(
            "https://www.vipon.com/promotion/index?type=instant",
            "/product/42",
        )
        .unwrap();
        assert_eq!(link.as_str(), "https://www.vipon.com/product/42");
    }

    #[test]
    fn test_resolve_absolute_link() {
        let link = DealLink::resolve("not a url", "https://www.vipon.com/product/7").unwrap();
        assert_eq!(link.as_str(), "https://www.vipon.com/product/7");
    }

    #[test]
    fn test_serialization() {
        let id = ProductId::new(77);
        assert_eq!(id.to_string(), "77");

        let link = DealLink::new("https://www.vipon.com/product/77");
        assert_eq!(link.to_string(), "https://www.vipon.com/product/77");
    }
}
