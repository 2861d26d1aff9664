//! Product definition files.
//!
//! A definition is the YAML equivalent of filling in the product form:
//!
//! ```yaml
//! name: T-Shirt
//! code: TS
//! hsn_code: "6109"
//! active: true
//! variants:
//!   - name: size
//!     options: [S, M, 32]
//!   - name: color
//!     options: [Red, Blue]
//! stock:
//!   "Red, S": 5
//!   "Blue, M": 2.5
//! ```
//!
//! Stock keys are SKU labels: option values ordered by variant name, joined
//! with ", ". SKUs without an entry start at zero. A key that matches more
//! than one SKU, possible when options contain commas, is rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use stockroom_core::{DraftError, ProductDraft, Variant};

/// Errors loading a definition file.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid YAML for a definition.
    #[error("Invalid definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value that must be text or a number is something else.
    #[error("{field} must be text or a number")]
    NotScalar { field: String },

    /// A stock key names no generated SKU.
    #[error("Stock entry \"{0}\" does not match any SKU")]
    UnknownSku(String),

    /// A stock key matches more than one SKU.
    #[error("Stock entry \"{0}\" matches more than one SKU")]
    AmbiguousSku(String),

    /// A stock value was rejected.
    #[error("Stock for \"{label}\": {source}")]
    InvalidStock {
        label: String,
        #[source]
        source: DraftError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariantDefinition {
    name: String,
    #[serde(default)]
    options: Vec<Value>,
}

/// A product as written in a definition file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductDefinition {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    code: Value,
    #[serde(default)]
    hsn_code: Value,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    variants: Vec<VariantDefinition>,
    #[serde(default)]
    stock: BTreeMap<String, Value>,
}

const fn default_active() -> bool {
    true
}

impl ProductDefinition {
    /// Read and parse a definition file.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError` if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DefinitionError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Parse definition YAML.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::Yaml` for malformed or unknown fields.
    pub fn parse(content: &str) -> Result<Self, DefinitionError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Fill a product draft from this definition.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError` if a value is not a scalar, a stock key
    /// matches no SKU, or a stock value is invalid.
    pub fn into_draft(self) -> Result<ProductDraft, DefinitionError> {
        let mut draft = ProductDraft::new();
        draft.name = scalar_text(&self.name, "name")?;
        draft.code = scalar_text(&self.code, "code")?;
        draft.hsn_code = scalar_text(&self.hsn_code, "hsn_code")?;
        draft.active = self.active;

        let variants = self
            .variants
            .into_iter()
            .map(|variant| -> Result<Variant, DefinitionError> {
                let options = variant
                    .options
                    .iter()
                    .map(|option| scalar_text(option, &format!("option of {}", variant.name)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Variant::new(variant.name, options))
            })
            .collect::<Result<Vec<_>, _>>()?;
        draft.set_variants(variants);

        for (key, value) in self.stock {
            let label = normalize_label(&key);
            let mut matches = draft
                .skus()
                .iter()
                .enumerate()
                .filter(|(_, sku)| normalize_label(&sku.options.label()) == label)
                .map(|(index, _)| index);
            let index = matches
                .next()
                .ok_or_else(|| DefinitionError::UnknownSku(key.clone()))?;
            if matches.next().is_some() {
                return Err(DefinitionError::AmbiguousSku(key));
            }
            let raw = scalar_text(&value, &format!("stock for {key}"))?;
            draft
                .set_sku_stock(index, &raw)
                .map_err(|source| DefinitionError::InvalidStock { label, source })?;
        }

        Ok(draft)
    }
}

/// Text of a YAML scalar; null becomes empty.
fn scalar_text(value: &Value, field: &str) -> Result<String, DefinitionError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(DefinitionError::NotScalar {
            field: field.to_string(),
        }),
    }
}

fn normalize_label(key: &str) -> String {
    key.split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", ")
}
