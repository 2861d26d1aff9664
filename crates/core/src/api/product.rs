//! Product creation payload and product listing types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{GeneratedSku, Variant};
use crate::types::{ProductId, ProductSkuId, SubVariantId, VariantId};

// =============================================================================
// Create Product
// =============================================================================

/// One option of a submitted variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubVariantPayload {
    /// Option label (trimmed).
    pub option: String,
}

/// A submitted variant with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPayload {
    /// Variant name (trimmed).
    pub name: String,
    /// Options, in input order.
    pub sub_variants: Vec<SubVariantPayload>,
}

impl VariantPayload {
    /// Convert a form variant, or `None` when it would not take part in
    /// SKU generation.
    #[must_use]
    pub fn from_variant(variant: &Variant) -> Option<Self> {
        if !variant.is_valid() {
            return None;
        }

        Some(Self {
            name: variant.trimmed_name().to_owned(),
            sub_variants: variant
                .valid_options()
                .into_iter()
                .map(|option| SubVariantPayload {
                    option: option.to_owned(),
                })
                .collect(),
        })
    }
}

/// Initial stock for one generated SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialSkuPayload {
    /// Option labels in canonical order.
    pub options: Vec<String>,
    /// Initial stock, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
}

impl From<&GeneratedSku> for InitialSkuPayload {
    fn from(sku: &GeneratedSku) -> Self {
        Self {
            options: sku.options.option_labels(),
            stock: sku.stock.as_decimal(),
        }
    }
}

/// Body of `POST /products/create/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    /// Product name.
    #[serde(rename = "ProductName")]
    pub product_name: String,
    /// Unique product code.
    #[serde(rename = "ProductCode")]
    pub product_code: String,
    /// Optional HSN (tax classification) code.
    #[serde(rename = "HSNCode")]
    pub hsn_code: Option<String>,
    /// Valid variants only.
    pub variants: Vec<VariantPayload>,
    /// One entry per generated SKU, in generation order.
    pub initial_product_skus: Vec<InitialSkuPayload>,
    /// Whether the product is active.
    #[serde(rename = "Active")]
    pub active: bool,
}

impl CreateProductRequest {
    /// Form fields for a multipart submission (used when an image is attached).
    ///
    /// Nested collections travel as JSON strings in `variants_json` and
    /// `initial_product_skus_json`; the image part itself is added by the
    /// HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the nested collections fail to serialize.
    pub fn to_multipart_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        let mut fields = vec![
            ("ProductName", self.product_name.clone()),
            ("ProductCode", self.product_code.clone()),
        ];
        if let Some(hsn_code) = &self.hsn_code {
            fields.push(("HSNCode", hsn_code.clone()));
        }
        fields.push(("variants_json", serde_json::to_string(&self.variants)?));
        fields.push((
            "initial_product_skus_json",
            serde_json::to_string(&self.initial_product_skus)?,
        ));
        fields.push(("Active", self.active.to_string()));
        Ok(fields)
    }
}

// =============================================================================
// Product Listing
// =============================================================================

/// An option as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubVariant {
    /// Sub-variant ID.
    pub id: SubVariantId,
    /// Option label.
    pub option: String,
}

/// A variant as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: VariantId,
    /// Variant name.
    pub name: String,
    /// Options, ordered by label.
    #[serde(default)]
    pub sub_variants: Vec<SubVariant>,
}

/// A stock-keeping unit as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSku {
    /// SKU ID.
    pub id: ProductSkuId,
    /// Backend-assigned SKU code (may be blank).
    #[serde(default)]
    pub sku_code: String,
    /// Current stock.
    pub stock: Decimal,
    /// Option labels joined for display (e.g. "Red, S").
    #[serde(default)]
    pub product_sku_options: String,
}

impl ProductSku {
    /// The SKU code, or `"N/A"` when the backend has none.
    #[must_use]
    pub fn display_code(&self) -> &str {
        if self.sku_code.is_empty() {
            "N/A"
        } else {
            &self.sku_code
        }
    }

    /// Selection label, e.g. `"Red, S (SKU: TS-RED-S) (Current Stock: 5.00)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} (SKU: {}) (Current Stock: {})",
            self.product_sku_options,
            self.display_code(),
            self.stock
        )
    }
}

/// A product with its variants and SKUs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Sequential product number assigned by the backend.
    #[serde(rename = "ProductID")]
    pub product_number: i64,
    /// Unique product code.
    #[serde(rename = "ProductCode")]
    pub product_code: String,
    /// Product name.
    #[serde(rename = "ProductName")]
    pub product_name: String,
    /// Image URL, if one was uploaded.
    #[serde(rename = "ProductImage", default)]
    pub product_image: Option<String>,
    /// Creation timestamp.
    #[serde(rename = "CreatedDate")]
    pub created_date: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(rename = "UpdatedDate", default)]
    pub updated_date: Option<DateTime<Utc>>,
    /// Favourite flag.
    #[serde(rename = "IsFavourite", default)]
    pub is_favourite: bool,
    /// Whether the product is active.
    #[serde(rename = "Active", default)]
    pub active: bool,
    /// HSN code.
    #[serde(rename = "HSNCode", default)]
    pub hsn_code: Option<String>,
    /// Sum of stock across all SKUs.
    #[serde(rename = "TotalStock", default)]
    pub total_stock: Decimal,
    /// Variants with their options.
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// SKUs with current stock.
    #[serde(default)]
    pub product_skus: Vec<ProductSku>,
}

impl Product {
    /// Selection label, e.g. `"T-Shirt (TS)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.product_name, self.product_code)
    }

    /// Find one of this product's SKUs.
    #[must_use]
    pub fn sku_by_id(&self, id: ProductSkuId) -> Option<&ProductSku> {
        self.product_skus.iter().find(|sku| sku.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample_request() -> CreateProductRequest {
        CreateProductRequest {
            product_name: "T-Shirt".to_string(),
            product_code: "TS".to_string(),
            hsn_code: None,
            variants: vec![VariantPayload {
                name: "size".to_string(),
                sub_variants: vec![SubVariantPayload {
                    option: "S".to_string(),
                }],
            }],
            initial_product_skus: vec![InitialSkuPayload {
                options: vec!["S".to_string()],
                stock: Decimal::new(25, 1),
            }],
            active: true,
        }
    }

    #[test]
    fn test_create_request_wire_shape() {
        let value = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(
            value,
            json!({
                "ProductName": "T-Shirt",
                "ProductCode": "TS",
                "HSNCode": null,
                "variants": [{"name": "size", "sub_variants": [{"option": "S"}]}],
                "initial_product_skus": [{"options": ["S"], "stock": 2.5}],
                "Active": true
            })
        );
    }

    #[test]
    fn test_multipart_fields() {
        let mut request = sample_request();
        request.active = false;
        let fields = request.to_multipart_fields().unwrap();
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "ProductName",
                "ProductCode",
                "variants_json",
                "initial_product_skus_json",
                "Active"
            ]
        );

        let skus: Value = serde_json::from_str(&fields[3].1).unwrap();
        assert_eq!(skus, json!([{"options": ["S"], "stock": 2.5}]));
        assert_eq!(fields[4].1, "false");
    }

    #[test]
    fn test_multipart_includes_hsn_when_present() {
        let mut request = sample_request();
        request.hsn_code = Some("6109".to_string());
        let fields = request.to_multipart_fields().unwrap();
        assert!(fields.contains(&("HSNCode", "6109".to_string())));
    }

    #[test]
    fn test_variant_payload_skips_invalid() {
        assert!(VariantPayload::from_variant(&Variant::new("size", ["", " "])).is_none());

        let payload = VariantPayload::from_variant(&Variant::new(" color ", ["Red ", ""])).unwrap();
        assert_eq!(payload.name, "color");
        assert_eq!(payload.sub_variants.len(), 1);
        assert_eq!(payload.sub_variants[0].option, "Red");
    }

    #[test]
    fn test_product_deserialize() {
        let json = json!({
            "id": "8d6f2c34-3b6f-4c1e-9f0a-2f7f0b2b7c11",
            "ProductID": 3,
            "ProductCode": "TS",
            "ProductName": "T-Shirt",
            "ProductImage": null,
            "CreatedDate": "2024-05-01T10:15:00.123456Z",
            "UpdatedDate": null,
            "CreatedUser": null,
            "IsFavourite": false,
            "Active": true,
            "HSNCode": "6109",
            "TotalStock": "12.00",
            "variants": [{
                "id": "0b9c0d53-7c36-4d8c-b1a1-0f5e1c6d9a01",
                "name": "size",
                "sub_variants": [
                    {"id": "5a3e3c2f-1d4b-4a6e-8f7c-9b0a1c2d3e4f", "option": "S"}
                ]
            }],
            "product_skus": [{
                "id": "c2d3e4f5-0a1b-4c2d-8e3f-4a5b6c7d8e9f",
                "sku_code": "TS-S",
                "stock": "12.00",
                "product_sku_options": "S"
            }]
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.label(), "T-Shirt (TS)");
        assert_eq!(product.total_stock, Decimal::new(1200, 2));
        assert_eq!(product.variants[0].sub_variants[0].option, "S");

        let sku_id = product.product_skus[0].id;
        let sku = product.sku_by_id(sku_id).unwrap();
        assert_eq!(sku.label(), "S (SKU: TS-S) (Current Stock: 12.00)");
        assert!(product.sku_by_id(ProductSkuId::random()).is_none());
    }

    #[test]
    fn test_blank_sku_code_displays_na() {
        let sku = ProductSku {
            id: ProductSkuId::random(),
            sku_code: String::new(),
            stock: Decimal::ZERO,
            product_sku_options: "Red".to_string(),
        };
        assert_eq!(sku.display_code(), "N/A");
    }
}
