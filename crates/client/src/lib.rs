//! Stockroom Client - HTTP access to the inventory backend.
//!
//! # Usage
//!
//! ```no_run
//! use stockroom_client::{ClientConfig, StockroomClient};
//! use stockroom_core::api::ProductFilter;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = StockroomClient::new(&ClientConfig::from_env()?)?;
//! let products = client.list_products(&ProductFilter::default()).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod config;
mod error;

pub use client::{ImageUpload, StockroomClient};
pub use config::{ClientConfig, ConfigError, DEFAULT_API_URL};
pub use error::ClientError;
