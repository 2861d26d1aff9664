//! Request and response shapes exchanged with the inventory backend.
//!
//! Field names follow the backend's JSON exactly (including its
//! `ProductName`-style capitalised keys); the Rust side uses snake case and
//! renames on the wire.

mod error_body;
mod filter;
mod page;
mod product;
mod stock;

pub use error_body::{UNKNOWN_ERROR, error_message};
pub use filter::{FilterError, ProductFilter, StockReportFilter};
pub use page::Page;
pub use product::{
    CreateProductRequest, InitialSkuPayload, Product, ProductSku, ProductVariant, SubVariant,
    SubVariantPayload, VariantPayload,
};
pub use stock::{StockAdjustmentRequest, StockAdjustmentResponse, StockTransaction};
