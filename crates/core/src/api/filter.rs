//! Query filters for product listing and the stock report.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{ProductId, ProductSkuId, TransactionType};

/// Errors in filter construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Start date after end date.
    #[error("start date {from} is after end date {to}")]
    InvertedRange {
        /// Start date.
        from: NaiveDate,
        /// End date.
        to: NaiveDate,
    },
}

/// Filter criteria for listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name_contains: Option<String>,
    /// Exact product code.
    pub code: Option<String>,
    /// Only active or only inactive products.
    pub active: Option<bool>,
}

impl ProductFilter {
    /// Query parameters understood by `GET /products/`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = non_blank(self.name_contains.as_deref()) {
            pairs.push(("ProductName__icontains", name.to_owned()));
        }
        if let Some(code) = non_blank(self.code.as_deref()) {
            pairs.push(("ProductCode", code.to_owned()));
        }
        if let Some(active) = self.active {
            pairs.push(("Active", active.to_string()));
        }
        pairs
    }
}

/// Filter criteria for the stock transaction report.
///
/// Both dates are inclusive whole days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockReportFilter {
    /// First day to include.
    pub from: Option<NaiveDate>,
    /// Last day to include.
    pub to: Option<NaiveDate>,
    /// Only transactions of this product.
    pub product_id: Option<ProductId>,
    /// Only transactions of this SKU.
    pub product_sku_id: Option<ProductSkuId>,
    /// Only stock in or only stock out.
    pub transaction_type: Option<TransactionType>,
}

impl StockReportFilter {
    /// Query parameters understood by `GET /stock/report/`.
    ///
    /// The backend compares against a timestamp, so the end date is sent as
    /// the last instant of that day to keep it inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedRange`] when `from` is after `to`.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>, FilterError> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(FilterError::InvertedRange { from, to });
        }

        let mut pairs = Vec::new();
        if let Some(from) = self.from {
            pairs.push(("transaction_date__gte", format!("{from}T00:00:00")));
        }
        if let Some(to) = self.to {
            pairs.push(("transaction_date__lte", format!("{to}T23:59:59.999999")));
        }
        if let Some(product_id) = self.product_id {
            pairs.push(("product__id", product_id.to_string()));
        }
        if let Some(sku_id) = self.product_sku_id {
            pairs.push(("product_sku__id", sku_id.to_string()));
        }
        if let Some(kind) = self.transaction_type {
            pairs.push(("transaction_type", kind.as_str().to_string()));
        }
        Ok(pairs)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
