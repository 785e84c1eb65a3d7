//! Vipon Core - Foundation crate for the Vipon deal crawler.
//!
//! This crate provides shared types, error handling, configuration management
//! and credential loading that the browser, scraper and app crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`credentials`] - Account credentials supplied from the environment
//! - [`types`] - Shared newtypes (`ProductId`, `DealLink`)
//!
//! # Example
//!
//! ```rust
//! use vipon_core::{AppConfig, DealLink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.crawl.target_links, 20);
//!
//! let link = DealLink::new("https://www.vipon.com/product/4718293");
//! assert_eq!(link.product_id()?.get(), 4_718_293);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, CrawlConfig, OutputConfig, SelectorConfig};
pub use credentials::{Credentials, PASSWORD_VAR, USERNAME_VAR};
pub use error::{ConfigError, ConfigResult, Result, ViponError};
pub use types::{DealLink, ProductId};
