//! Product variants and SKU generation.
//!
//! A product is customised along named axes ([`Variant`]s such as "size" or
//! "color"). Every choice of one option per axis is a [`Combination`], and
//! every combination becomes one sellable SKU. [`generate`] computes the full
//! set and carries stock values over from the previous generation, so a user
//! editing variant definitions does not lose stock they already typed in.

mod generator;
mod sku_code;
mod variant;

pub use generator::{GeneratedSku, generate, valid_variants};
pub use sku_code::sku_code_preview;
pub use variant::{CanonicalKey, Combination, OptionChoice, Variant};
