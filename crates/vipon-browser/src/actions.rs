use crate::error::{BrowserError, Result};

/// The page operations the crawler needs from a browser.
///
/// Implemented by [`crate::BrowserEngine`] over Chrome and by in-memory
/// fakes in tests. One implementor drives one page; calls are sequential.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Load `url` in the page and wait for the load to finish.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Type `value` into the first input matching `selector`.
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    /// Block until `selector` matches, failing with
    /// [`BrowserError::Timeout`] after `timeout_ms`.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Run a script in the page and return its JSON result
    async fn execute_script(&self, script: &str) -> Result<serde_json::Value>;

    /// Serialized markup of the current page
    async fn page_source(&self) -> Result<String>;
}

/// Script that scrolls to the bottom of the page to trigger lazy loading.
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Host part of a navigation target, used to label navigation logs.
pub fn extract_domain(target: &str) -> Result<String> {
    let parsed = url::Url::parse(target)
        .map_err(|e| BrowserError::NavigationError(format!("{target} is not a URL: {e}")))?;

    match parsed.host_str() {
        Some(host) => Ok(host.to_string()),
        None => Err(BrowserError::NavigationError(format!("{target} has no host"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://www.vipon.com/promotion/index?type=instant").unwrap(),
            "www.vipon.com"
        );
        assert_eq!(
            extract_domain("http://localhost:8080/product/1").unwrap(),
            "localhost"
        );
    }

    #[test]
    fn test_extract_domain_invalid() {
        assert!(extract_domain("not-a-url").is_err());
    }
}
