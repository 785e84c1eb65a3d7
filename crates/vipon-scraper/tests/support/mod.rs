//! Scripted in-memory stand-in for the browser.
//!
//! Serves a lazily-growing listing, a login form that checks the typed
//! credentials, static detail pages and code pages gated on login.

#![allow(dead_code)]

use scraper::{Html, Selector};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use vipon_browser::{BrowserActions, BrowserError, Result, SCROLL_TO_BOTTOM};
use vipon_core::{AppConfig, Credentials};

pub const USERNAME: &str = "deals@example.com";
pub const PASSWORD: &str = "correct-horse";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.crawl.wait_timeout_secs = 1;
    config.crawl.poll_interval_ms = 10;
    config.crawl.max_scroll_attempts = 3;
    config.crawl.delay_min_secs = 0;
    config.crawl.delay_max_secs = 0;
    config
}

pub fn credentials() -> Credentials {
    Credentials::new(USERNAME, PASSWORD)
}

pub fn detail_url(id: u64) -> String {
    format!("https://www.vipon.com/product/{id}")
}

pub fn detail_page(id: u64, category: &str, dislike: u32, like: u32) -> String {
    format!(
        r#"<html><body>
          <div class="wrap">
            <p class="product-title">Deal number {id}</p>
            <div class="product-category"><span>{category}</span><span>{dislike}</span><span>{like}</span></div>
          </div>
          <p class="product-discount">50% off</p>
          <span id="productExpiry">Ends <b>2024-06-30</b></span>
          <p class="product-price"><s>$49.99</s> <em>$29.99</em></p>
          <a onclick="bing_open_in_amazon();" href="https://www.amazon.com/dp/B{id}">Get deal</a>
        </body></html>"#
    )
}

pub fn code_page(code: &str) -> String {
    format!(r#"<html><body><div><div class="code-container"><span>Code:</span><strong>{code}</strong></div></div></body></html>"#)
}

struct State {
    current: String,
    rows: Vec<String>,
    initial_rows: usize,
    batch: usize,
    growth: Option<VecDeque<usize>>,
    visible: usize,
    pages: HashMap<String, String>,
    gated_pages: HashMap<String, String>,
    typed: HashMap<String, String>,
    logged_in: bool,
    actions: Vec<String>,
    observed_counts: Vec<usize>,
}

pub struct FakeSite {
    config: AppConfig,
    state: Mutex<State>,
}

impl FakeSite {
    /// Listing with the given product ids, `initial` rendered on load and
    /// `batch` more per scroll.
    pub fn new(config: &AppConfig, ids: &[u64], initial: usize, batch: usize) -> Self {
        let rows = ids
            .iter()
            .map(|id| {
                format!(
                    r#"<div class="layer" onclick="location.href='/product/{id}'"><img src="{id}.jpg"></div>"#
                )
            })
            .collect();

        Self {
            config: config.clone(),
            state: Mutex::new(State {
                current: "about:blank".to_string(),
                rows,
                initial_rows: initial,
                batch,
                growth: None,
                visible: 0,
                pages: HashMap::new(),
                gated_pages: HashMap::new(),
                typed: HashMap::new(),
                logged_in: false,
                actions: Vec::new(),
                observed_counts: Vec::new(),
            }),
        }
    }

    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(url.into(), html.into());
        self
    }

    /// Replace the fixed batch with one row count per scroll. Scrolls past
    /// the end of the script render nothing new.
    pub fn with_growth(self, per_scroll: &[usize]) -> Self {
        self.state.lock().unwrap().growth = Some(per_scroll.iter().copied().collect());
        self
    }

    /// Page whose real content is only served to a logged-in session.
    pub fn with_gated_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .gated_pages
            .insert(url.into(), html.into());
        self
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn observed_counts(&self) -> Vec<usize> {
        self.state.lock().unwrap().observed_counts.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.lock().unwrap().logged_in
    }

    fn render(&self, state: &mut State) -> String {
        let crawl = &self.config.crawl;

        if state.current == crawl.listing_url {
            state.observed_counts.push(state.visible);
            let rows = state.rows[..state.visible].concat();
            return format!(r#"<html><body><div id="deals">{rows}</div></body></html>"#);
        }

        if state.current == crawl.login_url {
            return r#"<html><body><form>
                <input id="loginform-email"><input id="loginform-password" type="password">
                <button type="submit">Log in</button>
            </form></body></html>"#
                .to_string();
        }

        if let Some(html) = state.gated_pages.get(&state.current) {
            return if state.logged_in {
                html.clone()
            } else {
                r#"<html><body><div class="login-required">Log in to reveal</div></body></html>"#
                    .to_string()
            };
        }

        state
            .pages
            .get(&state.current)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string())
    }
}

#[async_trait::async_trait]
impl BrowserActions for FakeSite {
    async fn navigate(&self, url: &str) -> Result<()> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.actions.push(format!("navigate {url}"));
        state.current = url.to_string();
        if url == self.config.crawl.listing_url {
            state.visible = state.initial_rows.min(state.rows.len());
        }
        Ok(())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.actions.push(format!("fill {selector}"));
        state.typed.insert(selector.to_string(), value.to_string());
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.actions.push(format!("click {selector}"));

        let selectors = &self.config.selectors;
        if state.current == self.config.crawl.login_url && selector == selectors.login_submit {
            let typed = |sel: &str| state.typed.get(sel).map(String::as_str);
            let accepted = typed(&selectors.login_email) == Some(USERNAME)
                && typed(&selectors.login_password) == Some(PASSWORD);
            state.logged_in = accepted;
        }
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let html = {
            let mut guard = self.state.lock().unwrap();
            self.render(&mut guard)
        };
        let parsed = Selector::parse(selector)
            .map_err(|e| BrowserError::SelectorNotFound(format!("{selector}: {e}")))?;

        if Html::parse_document(&html).select(&parsed).next().is_some() {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "{selector} did not appear within {timeout_ms}ms"
            )))
        }
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.actions.push("script".to_string());
        if script == SCROLL_TO_BOTTOM && state.current == self.config.crawl.listing_url {
            let added = match state.growth.as_mut() {
                Some(script) => script.pop_front().unwrap_or(0),
                None => state.batch,
            };
            state.visible = (state.visible + added).min(state.rows.len());
        }
        Ok(serde_json::Value::Null)
    }

    async fn page_source(&self) -> Result<String> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        Ok(self.render(state))
    }
}
