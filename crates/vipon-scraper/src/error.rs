use crate::parser::PageKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("{page} page has no match for {field} ({selector})")]
    MissingField {
        page: PageKind,
        field: &'static str,
        selector: String,
    },

    #[error("Malformed {field} '{value}': {reason}")]
    MalformedField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Malformed listing handler '{handler}'")]
    MalformedLink { handler: String },

    #[error("Browser error: {0}")]
    Browser(#[from] vipon_browser::BrowserError),

    #[error("Invalid value: {0}")]
    Core(#[from] vipon_core::ViponError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ScrapeError::MissingField {
            page: PageKind::Detail,
            field: "title",
            selector: "p[class=product-title]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "detail page has no match for title (p[class=product-title])"
        );
    }

    #[test]
    fn test_bad_link_is_core_error() {
        let err: ScrapeError = vipon_core::DealLink::new("https://www.vipon.com/product/abc")
            .product_id()
            .unwrap_err()
            .into();
        assert!(matches!(err, ScrapeError::Core(vipon_core::ViponError::Validation(_))));
    }

    #[test]
    fn test_from_browser_error() {
        let err: ScrapeError = vipon_browser::BrowserError::Timeout("div .layer".to_string()).into();
        assert!(matches!(err, ScrapeError::Browser(e) if e.is_timeout()));
    }
}
