//! Login session on the promotion site.

use crate::error::Result;
use vipon_browser::BrowserActions;
use vipon_core::{Credentials, SelectorConfig};

/// Owns the credentials and drives the login form on a shared browser.
///
/// Login success is not verified. Bad credentials leave the browser
/// unauthenticated and only show up later as missing redemption codes.
pub struct Session<'a, B: BrowserActions + ?Sized> {
    browser: &'a B,
    credentials: Credentials,
    login_url: String,
    selectors: &'a SelectorConfig,
}

impl<'a, B: BrowserActions + ?Sized> Session<'a, B> {
    pub fn new(
        browser: &'a B,
        credentials: Credentials,
        login_url: impl Into<String>,
        selectors: &'a SelectorConfig,
    ) -> Self {
        Self {
            browser,
            credentials,
            login_url: login_url.into(),
            selectors,
        }
    }

    /// Fill and submit the login form.
    pub async fn login(&self) -> Result<()> {
        tracing::info!("Logging in as {}", self.credentials.username());

        self.browser.navigate(&self.login_url).await?;
        self.browser
            .fill_field(&self.selectors.login_email, self.credentials.username())
            .await?;
        self.browser
            .fill_field(&self.selectors.login_password, self.credentials.password())
            .await?;
        self.browser.click(&self.selectors.login_submit).await?;

        Ok(())
    }
}
