//! Integration tests for product creation and listing.
//!
//! A product draft is filled the way the form fills it, submitted through the
//! client, and read back from the listing endpoint.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;

use stockroom_client::{ClientError, ImageUpload};
use stockroom_core::api::ProductFilter;
use stockroom_core::{ProductDraft, Variant, sku_code_preview};
use stockroom_integration_tests::FakeBackend;

fn shirt_draft(code: &str) -> ProductDraft {
    let mut draft = ProductDraft::new();
    draft.name = "T-Shirt".to_string();
    draft.code = code.to_string();
    draft.hsn_code = "6109".to_string();
    draft.set_variants(vec![
        Variant::new("size", ["S", "M"]),
        Variant::new("color", ["Red", "Navy Blue"]),
    ]);
    draft
}

// =============================================================================
// Create Product Tests
// =============================================================================

#[tokio::test]
async fn test_create_product_with_initial_stock() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();

    let mut draft = shirt_draft("TS");
    draft.set_sku_stock(0, "5").unwrap();
    draft.set_sku_stock(3, "2.5").unwrap();
    let request = draft.to_request().unwrap();

    let product = client.create_product(&request).await.unwrap();

    assert_eq!(product.product_code, "TS");
    assert_eq!(product.hsn_code.as_deref(), Some("6109"));
    assert_eq!(product.variants.len(), 2);
    assert_eq!(product.product_skus.len(), 4);
    assert_eq!(product.total_stock, Decimal::new(75, 1));

    // The backend's codes match the offline preview for fresh codes
    for (sku, generated) in product.product_skus.iter().zip(draft.skus()) {
        assert_eq!(sku.sku_code, sku_code_preview("TS", &generated.options));
        assert_eq!(sku.stock, generated.stock.as_decimal());
        assert_eq!(sku.product_sku_options, generated.options.label());
    }
}

#[tokio::test]
async fn test_create_product_without_variants() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();

    let mut draft = ProductDraft::new();
    draft.name = "Mug".to_string();
    draft.code = "MUG".to_string();
    assert!(draft.skus().is_empty());

    let product = client.create_product(&draft.to_request().unwrap()).await.unwrap();
    assert!(product.variants.is_empty());
    assert!(product.product_skus.is_empty());
    assert_eq!(product.hsn_code, None);
}

#[tokio::test]
async fn test_duplicate_code_reports_backend_message() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();
    let request = shirt_draft("TS").to_request().unwrap();

    client.create_product(&request).await.unwrap();
    let err = client.create_product(&request).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(
                message,
                r#"{"ProductCode":["products with this ProductCode already exists."]}"#
            );
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_product_with_image_uses_multipart() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();

    let mut draft = shirt_draft("TSI");
    draft.set_sku_stock(1, "4").unwrap();
    let request = draft.to_request().unwrap();
    let image = ImageUpload::new("shirt.png", "image/png", vec![0x89, b'P', b'N', b'G']);

    let product = client.create_product_with_image(&request, image).await.unwrap();

    assert_eq!(product.product_skus.len(), 4);
    assert_eq!(product.product_skus[1].stock, Decimal::new(4, 0));
    assert_eq!(product.product_image.as_deref(), Some("/media/products/shirt.png"));

    let images = backend.images().await;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].content_type, "image/png");
    assert_eq!(images[0].len, 4);

    let fields = backend.multipart_fields().await;
    assert_eq!(
        fields[0],
        [
            "ProductName",
            "ProductCode",
            "HSNCode",
            "variants_json",
            "initial_product_skus_json",
            "Active",
            "ProductImage",
        ]
    );
}

// =============================================================================
// List Products Tests
// =============================================================================

#[tokio::test]
async fn test_list_products_filters() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();

    client.create_product(&shirt_draft("TS").to_request().unwrap()).await.unwrap();

    let mut mug = ProductDraft::new();
    mug.name = "Coffee Mug".to_string();
    mug.code = "MUG".to_string();
    mug.active = false;
    client.create_product(&mug.to_request().unwrap()).await.unwrap();

    let all = client.list_products(&ProductFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let shirts = client
        .list_products(&ProductFilter {
            name_contains: Some("shirt".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(shirts.len(), 1);
    assert_eq!(shirts[0].label(), "T-Shirt (TS)");

    let inactive = client
        .list_products(&ProductFilter {
            active: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].product_code, "MUG");

    assert!(
        backend
            .queries()
            .await
            .contains(&"ProductName__icontains=shirt".to_string())
    );
}

#[tokio::test]
async fn test_list_products_returns_first_page() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client().unwrap();

    for i in 0..=stockroom_integration_tests::PAGE_SIZE {
        let mut draft = ProductDraft::new();
        draft.name = format!("Item {i}");
        draft.code = format!("ITEM-{i}");
        client.create_product(&draft.to_request().unwrap()).await.unwrap();
    }

    let products = client.list_products(&ProductFilter::default()).await.unwrap();
    assert_eq!(products.len(), stockroom_integration_tests::PAGE_SIZE);
}
