//! Stockroom Core - Shared types and SKU generation.
//!
//! This crate provides the types used across all Stockroom components:
//! - `client` - HTTP client for the inventory backend
//! - `cli` - Command-line front end for products and stock
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, stock quantities and transaction types
//! - [`catalog`] - Variants, option combinations and the SKU generator
//! - [`draft`] - Form-session state for creating a product
//! - [`api`] - Request and response shapes exchanged with the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod draft;
pub mod types;

pub use catalog::{
    CanonicalKey, Combination, GeneratedSku, OptionChoice, Variant, generate, sku_code_preview,
    valid_variants,
};
pub use draft::{DraftError, ProductDraft};
pub use types::*;
