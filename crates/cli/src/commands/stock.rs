//! Stock adjustment and report commands.
//!
//! # Usage
//!
//! ```bash
//! stockroom stock add --product <uuid> --sku <uuid> --quantity 5
//! stockroom stock remove --product <uuid> --sku <uuid> --quantity 2.5
//! stockroom stock report --from 2024-05-01 --to 2024-05-31 --type in
//! ```

use tracing::info;

use stockroom_core::api::{StockAdjustmentRequest, StockReportFilter, StockTransaction};
use stockroom_core::{AdjustmentQuantity, ProductId, ProductSkuId};

use super::{CliError, connect};

/// Message shown when a report has no rows.
pub const EMPTY_REPORT: &str = "No stock transactions found for the selected period.";

/// Direction of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Stock in.
    Add,
    /// Stock out.
    Remove,
}

/// Add or remove stock on a SKU.
///
/// # Errors
///
/// Returns an error if the backend rejects the adjustment, for example when
/// removing more than the SKU holds.
pub async fn adjust(
    direction: Adjustment,
    product_id: ProductId,
    sku_id: ProductSkuId,
    quantity: AdjustmentQuantity,
) -> Result<(), CliError> {
    let client = connect()?;
    let request = StockAdjustmentRequest::new(product_id, sku_id, quantity);

    let response = match direction {
        Adjustment::Add => client.add_stock(&request).await?,
        Adjustment::Remove => client.remove_stock(&request).await?,
    };

    info!(
        current_stock = %response.product_sku_current_stock,
        "{}",
        response.message
    );
    Ok(())
}

/// Log the stock transactions matching a filter.
///
/// # Errors
///
/// Returns an error for an inverted date range or a failed request.
pub async fn report(filter: &StockReportFilter) -> Result<(), CliError> {
    let transactions = connect()?.stock_report(filter).await?;

    if transactions.is_empty() {
        info!("{EMPTY_REPORT}");
        return Ok(());
    }

    for tx in &transactions {
        info!("{}", report_line(tx));
    }
    info!(count = transactions.len(), "Stock report complete");
    Ok(())
}

/// One report row: date, product, SKU, options, type, quantity, stock after.
#[must_use]
pub fn report_line(tx: &StockTransaction) -> String {
    format!(
        "{} | {} | {} | {} | {} | {} | {}",
        tx.transaction_date.format("%Y-%m-%d %H:%M"),
        tx.product_name,
        tx.display_code(),
        tx.product_sku_options,
        tx.transaction_type.label(),
        tx.quantity,
        tx.current_stock
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use stockroom_core::TransactionType;

    use super::*;

    #[test]
    fn test_report_line() {
        let tx = StockTransaction {
            id: "1f2e3d4c-5b6a-4978-8a7b-6c5d4e3f2a1b".parse().unwrap(),
            product_name: "T-Shirt".to_string(),
            sku_code: String::new(),
            product_sku_options: "Red, S".to_string(),
            transaction_type: TransactionType::Out,
            quantity: "2.00".parse().unwrap(),
            transaction_date: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
            current_stock: "8.00".parse().unwrap(),
        };
        assert_eq!(
            report_line(&tx),
            "2024-05-02 09:30 | T-Shirt | N/A | Red, S | Stock Out | 2.00 | 8.00"
        );
    }
}
