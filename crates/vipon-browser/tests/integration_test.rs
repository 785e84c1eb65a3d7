use vipon_browser::actions::BrowserActions;
use vipon_browser::{BrowserEngine, SCROLL_TO_BOTTOM};

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_creation() {
    let engine = BrowserEngine::new().await;
    assert!(engine.is_ok(), "Failed to create browser engine");
    engine.unwrap().close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation_and_source() {
    let engine = BrowserEngine::new().await.unwrap();

    engine.navigate("https://example.com").await.unwrap();
    let html = engine.page_source().await.unwrap();
    assert!(html.contains("Example Domain"));

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_scroll_and_wait() {
    let engine = BrowserEngine::new().await.unwrap();

    engine.navigate("https://example.com").await.unwrap();
    engine.execute_script(SCROLL_TO_BOTTOM).await.unwrap();
    assert!(engine.wait_for_selector("h1", 2000).await.is_ok());

    let missing = engine.wait_for_selector("div .layer", 500).await;
    assert!(missing.unwrap_err().is_timeout());

    engine.close().await.unwrap();
}
