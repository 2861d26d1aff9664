//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod quantity;
pub mod status;

pub use id::*;
pub use quantity::{AdjustmentQuantity, QuantityError, StockQuantity};
pub use status::TransactionType;
