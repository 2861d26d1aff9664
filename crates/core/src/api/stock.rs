//! Stock adjustment and transaction report types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AdjustmentQuantity, ProductId, ProductSkuId, StockTransactionId, TransactionType};

/// Body of `POST /stock/add/` and `POST /stock/remove/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustmentRequest {
    /// Product owning the SKU.
    pub product_id: ProductId,
    /// SKU to adjust.
    pub product_sku_id: ProductSkuId,
    /// Quantity to add or remove, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

impl StockAdjustmentRequest {
    /// Build a request from a validated quantity.
    #[must_use]
    pub const fn new(
        product_id: ProductId,
        product_sku_id: ProductSkuId,
        quantity: AdjustmentQuantity,
    ) -> Self {
        Self {
            product_id,
            product_sku_id,
            quantity: quantity.as_decimal(),
        }
    }
}

/// Response to a successful stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustmentResponse {
    /// Confirmation message from the backend.
    pub message: String,
    /// Stock level of the SKU after the adjustment.
    pub product_sku_current_stock: Decimal,
}

/// One row of the stock transaction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransaction {
    /// Transaction ID.
    pub id: StockTransactionId,
    /// Product name at report time.
    pub product_name: String,
    /// SKU code (may be blank).
    #[serde(default)]
    pub sku_code: String,
    /// Option labels of the SKU (e.g. "Red, S").
    #[serde(default)]
    pub product_sku_options: String,
    /// In or out.
    pub transaction_type: TransactionType,
    /// Quantity moved.
    pub quantity: Decimal,
    /// When the transaction happened.
    pub transaction_date: DateTime<Utc>,
    /// Stock level after this transaction.
    pub current_stock: Decimal,
}

impl StockTransaction {
    /// The SKU code, or `"N/A"` when the backend has none.
    #[must_use]
    pub fn display_code(&self) -> &str {
        if self.sku_code.is_empty() {
            "N/A"
        } else {
            &self.sku_code
        }
    }
}
