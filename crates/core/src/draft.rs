//! Form-session state for creating a product.
//!
//! A [`ProductDraft`] holds what the user has typed so far: product details,
//! variant rows and the SKUs generated from them. Every edit to the variant
//! rows regenerates the SKUs against the current ones, so stock that was
//! already entered survives the edit. The draft is turned into a
//! [`CreateProductRequest`] once, on submission.

use thiserror::Error;

use crate::api::{CreateProductRequest, InitialSkuPayload, VariantPayload};
use crate::catalog::{GeneratedSku, Variant, generate, valid_variants};
use crate::types::{QuantityError, StockQuantity};

/// Errors raised while editing or submitting a draft.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Product name or code missing.
    #[error("Product Name and Product Code are required.")]
    MissingRequiredFields,

    /// A stock value could not be accepted.
    #[error("All SKU stock values must be non-negative numbers. (SKU {index}: {source})")]
    InvalidStock {
        /// Position of the SKU in generation order.
        index: usize,
        /// Why the value was rejected.
        #[source]
        source: QuantityError,
    },

    /// A row or option index does not exist.
    #[error("{what} index {index} is out of range")]
    IndexOutOfRange {
        /// Kind of row addressed.
        what: &'static str,
        /// Offending index.
        index: usize,
    },
}

/// The product-creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product name.
    pub name: String,
    /// Product code.
    pub code: String,
    /// Optional HSN code; blank means none.
    pub hsn_code: String,
    /// Whether the product is created active.
    pub active: bool,
    variants: Vec<Variant>,
    skus: Vec<GeneratedSku>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductDraft {
    /// A fresh draft with one empty variant row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            hsn_code: String::new(),
            active: true,
            variants: vec![Variant::blank()],
            skus: Vec::new(),
        }
    }

    /// Variant rows as entered.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Generated SKUs, in generation order.
    #[must_use]
    pub fn skus(&self) -> &[GeneratedSku] {
        &self.skus
    }

    /// Replace all variant rows at once.
    pub fn set_variants(&mut self, variants: Vec<Variant>) {
        self.variants = variants;
        self.regenerate();
    }

    /// Append an empty variant row.
    pub fn add_variant(&mut self) {
        self.variants.push(Variant::blank());
        self.regenerate();
    }

    /// Remove a variant row.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] for an unknown row.
    pub fn remove_variant(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.variants.len() {
            return Err(DraftError::IndexOutOfRange {
                what: "variant",
                index,
            });
        }
        self.variants.remove(index);
        self.regenerate();
        Ok(())
    }

    /// Rename a variant row.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] for an unknown row.
    pub fn set_variant_name(&mut self, index: usize, name: &str) -> Result<(), DraftError> {
        self.variant_mut(index)?.name = name.to_owned();
        self.regenerate();
        Ok(())
    }

    /// Append an empty option to a variant row.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] for an unknown row.
    pub fn add_option(&mut self, variant: usize) -> Result<(), DraftError> {
        self.variant_mut(variant)?.options.push(String::new());
        self.regenerate();
        Ok(())
    }

    /// Change one option of a variant row.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] for an unknown row or option.
    pub fn set_option(&mut self, variant: usize, option: usize, value: &str) -> Result<(), DraftError> {
        let slot = self
            .variant_mut(variant)?
            .options
            .get_mut(option)
            .ok_or(DraftError::IndexOutOfRange {
                what: "option",
                index: option,
            })?;
        value.clone_into(slot);
        self.regenerate();
        Ok(())
    }

    /// Remove one option of a variant row.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] for an unknown row or option.
    pub fn remove_option(&mut self, variant: usize, option: usize) -> Result<(), DraftError> {
        let options = &mut self.variant_mut(variant)?.options;
        if option >= options.len() {
            return Err(DraftError::IndexOutOfRange {
                what: "option",
                index: option,
            });
        }
        options.remove(option);
        self.regenerate();
        Ok(())
    }

    /// Set the initial stock of a generated SKU from user input.
    ///
    /// Invalid input leaves the previous value in place.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::InvalidStock`] for empty, non-numeric or
    /// negative input, and [`DraftError::IndexOutOfRange`] for an unknown SKU.
    pub fn set_sku_stock(&mut self, index: usize, raw: &str) -> Result<(), DraftError> {
        let stock = StockQuantity::parse(raw)
            .map_err(|source| DraftError::InvalidStock { index, source })?;
        let sku = self
            .skus
            .get_mut(index)
            .ok_or(DraftError::IndexOutOfRange { what: "SKU", index })?;
        sku.stock = stock;
        Ok(())
    }

    /// Validate the draft and build the submission payload.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingRequiredFields`] when the trimmed name or
    /// code is empty.
    pub fn to_request(&self) -> Result<CreateProductRequest, DraftError> {
        let product_name = self.name.trim();
        let product_code = self.code.trim();
        if product_name.is_empty() || product_code.is_empty() {
            return Err(DraftError::MissingRequiredFields);
        }

        let hsn_code = Some(self.hsn_code.trim())
            .filter(|code| !code.is_empty())
            .map(str::to_owned);

        Ok(CreateProductRequest {
            product_name: product_name.to_owned(),
            product_code: product_code.to_owned(),
            hsn_code,
            variants: valid_variants(&self.variants)
                .filter_map(VariantPayload::from_variant)
                .collect(),
            initial_product_skus: self.skus.iter().map(InitialSkuPayload::from).collect(),
            active: self.active,
        })
    }

    /// Clear the form after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn variant_mut(&mut self, index: usize) -> Result<&mut Variant, DraftError> {
        self.variants.get_mut(index).ok_or(DraftError::IndexOutOfRange {
            what: "variant",
            index,
        })
    }

    fn regenerate(&mut self) {
        self.skus = generate(&self.variants, &self.skus);
    }
}
