//! Browser automation engine for the deal listing site.
//!
//! Provides headless browser control behind the [`BrowserActions`] trait so
//! the scraper can be driven by Chromium in production and by a scripted
//! fake in tests.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use actions::{BrowserActions, SCROLL_TO_BOTTOM};
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
