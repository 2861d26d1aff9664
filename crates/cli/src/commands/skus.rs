//! Offline SKU preview.
//!
//! # Usage
//!
//! ```bash
//! stockroom skus preview t-shirt.yaml
//! ```

use std::path::Path;

use tracing::{info, warn};

use stockroom_core::{ProductDraft, sku_code_preview};

use super::CliError;
use super::definition::ProductDefinition;

/// One previewed SKU row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    /// Code the backend is expected to assign.
    pub sku_code: String,
    /// Option labels, e.g. "Red, S".
    pub label: String,
    /// Initial stock.
    pub stock: String,
}

/// Preview rows for a draft, in generation order.
#[must_use]
pub fn preview_rows(draft: &ProductDraft) -> Vec<PreviewRow> {
    let code = draft.code.trim();
    draft
        .skus()
        .iter()
        .map(|sku| PreviewRow {
            sku_code: sku_code_preview(code, &sku.options),
            label: sku.options.label(),
            stock: sku.stock.to_string(),
        })
        .collect()
}

/// Load a definition and log the SKUs it would create.
///
/// # Errors
///
/// Returns an error if the definition cannot be loaded.
pub async fn preview(path: &Path) -> Result<(), CliError> {
    let draft = ProductDefinition::load(path).await?.into_draft()?;
    let rows = preview_rows(&draft);

    if rows.is_empty() {
        warn!("No valid variants; the product would be created without SKUs");
        return Ok(());
    }

    info!(count = rows.len(), "SKUs for {}", draft.name.trim());
    for row in rows {
        info!(sku_code = %row.sku_code, stock = %row.stock, "{}", row.label);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use stockroom_core::Variant;

    #[test]
    fn test_preview_rows() {
        let mut draft = ProductDraft::new();
        draft.code = " TS ".to_string();
        draft.set_variants(vec![
            Variant::new("size", ["S", "X Large"]),
            Variant::new("color", ["Navy Blue"]),
        ]);
        draft.set_sku_stock(1, "3").unwrap();

        let rows = preview_rows(&draft);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku_code, "TS-NAVYBLUE-S");
        assert_eq!(rows[1].label, "Navy Blue, X Large");
        assert_eq!(rows[1].sku_code, "TS-NAVYBLUE-XLARGE");
        assert_eq!(rows[1].stock, "3");
    }

    #[test]
    fn test_preview_rows_empty_without_variants() {
        assert!(preview_rows(&ProductDraft::new()).is_empty());
    }
}
