//! Integration tests for stock adjustments and the transaction report.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use stockroom_client::{ClientError, StockroomClient};
use stockroom_core::api::{Product, StockAdjustmentRequest, StockReportFilter};
use stockroom_core::{AdjustmentQuantity, ProductDraft, ProductSkuId, TransactionType, Variant};
use stockroom_integration_tests::FakeBackend;

async fn seeded(client: &StockroomClient) -> Product {
    let mut draft = ProductDraft::new();
    draft.name = "T-Shirt".to_string();
    draft.code = "TS".to_string();
    draft.set_variants(vec![Variant::new("size", ["S", "M"])]);
    draft.set_sku_stock(0, "10").unwrap();
    client.create_product(&draft.to_request().unwrap()).await.unwrap()
}

fn request(product: &Product, sku: usize, quantity: &str) -> StockAdjustmentRequest {
    StockAdjustmentRequest::new(
        product.id,
        product.product_skus[sku].id,
        AdjustmentQuantity::parse(quantity).unwrap(),
    )
}

// =============================================================================
// Adjustment Tests
// =============================================================================

#[tokio::test]
async fn test_add_and_remove_stock() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;

    let added = client.add_stock(&request(&product, 0, "5")).await.unwrap();
    assert_eq!(added.message, "Stock added successfully");
    assert_eq!(added.product_sku_current_stock, Decimal::new(15, 0));

    let removed = client.remove_stock(&request(&product, 0, "2.5")).await.unwrap();
    assert_eq!(removed.message, "Stock removed successfully");
    assert_eq!(removed.product_sku_current_stock, Decimal::new(125, 1));
}

#[tokio::test]
async fn test_remove_more_than_available() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;

    let err = client.remove_stock(&request(&product, 1, "1")).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(err.user_message(), "Not enough stock available.");
}

#[tokio::test]
async fn test_unknown_sku_is_not_found() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;

    let request = StockAdjustmentRequest::new(
        product.id,
        ProductSkuId::random(),
        AdjustmentQuantity::parse("1").unwrap(),
    );
    let err = client.add_stock(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref message) if message == "Product SKU not found."));
}

#[tokio::test]
async fn test_sku_of_another_product_is_not_found() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let shirt = seeded(&client).await;

    let mut mug = ProductDraft::new();
    mug.name = "Mug".to_string();
    mug.code = "MUG".to_string();
    let mug = client.create_product(&mug.to_request().unwrap()).await.unwrap();

    let request = StockAdjustmentRequest::new(
        mug.id,
        shirt.product_skus[0].id,
        AdjustmentQuantity::parse("1").unwrap(),
    );
    assert!(matches!(
        client.add_stock(&request).await,
        Err(ClientError::NotFound(_))
    ));
}

// =============================================================================
// Report Tests
// =============================================================================

#[tokio::test]
async fn test_report_lists_initial_and_adjustments() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;

    client.remove_stock(&request(&product, 0, "3")).await.unwrap();

    let rows = client.stock_report(&StockReportFilter::default()).await.unwrap();
    assert_eq!(rows.len(), 2);

    let out = rows
        .iter()
        .find(|tx| tx.transaction_type == TransactionType::Out)
        .unwrap();
    assert_eq!(out.product_name, "T-Shirt");
    assert_eq!(out.display_code(), "TS-S");
    assert_eq!(out.quantity, Decimal::new(3, 0));
    assert_eq!(out.current_stock, Decimal::new(7, 0));

    let only_in = client
        .stock_report(&StockReportFilter {
            transaction_type: Some(TransactionType::In),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(only_in.len(), 1);
    assert_eq!(only_in[0].current_stock, Decimal::new(10, 0));
}

#[tokio::test]
async fn test_report_end_date_is_inclusive() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;
    client.add_stock(&request(&product, 1, "1")).await.unwrap();

    let today = Utc::now().date_naive();
    let rows = client
        .stock_report(&StockReportFilter {
            from: Some(today),
            to: Some(today),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_report_date_range_excludes_older_rows() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;

    backend.shift_transactions(-Duration::days(10)).await;
    client.add_stock(&request(&product, 1, "1")).await.unwrap();

    let today = Utc::now().date_naive();
    let recent = client
        .stock_report(&StockReportFilter {
            from: Some(today - Duration::days(2)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].product_sku_options, "M");

    let older = client
        .stock_report(&StockReportFilter {
            to: Some(today - Duration::days(5)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].product_sku_options, "S");
}

#[tokio::test]
async fn test_report_filters_by_product_and_sku() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let product = seeded(&client).await;
    client.add_stock(&request(&product, 1, "2")).await.unwrap();

    let for_sku = client
        .stock_report(&StockReportFilter {
            product_id: Some(product.id),
            product_sku_id: Some(product.product_skus[1].id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_sku.len(), 1);
    assert_eq!(
        product.sku_by_id(product.product_skus[1].id).map(|s| s.product_sku_options.as_str()),
        Some(for_sku[0].product_sku_options.as_str())
    );
}

#[tokio::test]
async fn test_report_inverted_range_fails_before_request() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let today = Utc::now().date_naive();

    let err = client
        .stock_report(&StockReportFilter {
            from: Some(today),
            to: Some(today - Duration::days(1)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Filter(_)));
    assert!(backend.queries().await.is_empty());
}
