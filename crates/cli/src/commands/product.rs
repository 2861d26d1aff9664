//! Product commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a product (variants and initial stock from the file)
//! stockroom product create t-shirt.yaml --image t-shirt.jpg
//!
//! # List active products whose name contains "shirt"
//! stockroom product list --name shirt --active true
//! ```

use std::path::Path;

use tracing::info;

use stockroom_client::ImageUpload;
use stockroom_core::api::{Product, ProductFilter};

use super::definition::ProductDefinition;
use super::{CliError, connect};

/// Create a product from a definition file.
///
/// The definition is validated before any request is made.
///
/// # Errors
///
/// Returns an error if the definition is invalid, the image cannot be read,
/// or the backend rejects the product.
pub async fn create(path: &Path, image: Option<&Path>) -> Result<(), CliError> {
    let request = ProductDefinition::load(path).await?.into_draft()?.to_request()?;
    let client = connect()?;

    let product = match image {
        Some(image) => {
            let upload = ImageUpload::from_path(image).await?;
            client.create_product_with_image(&request, upload).await?
        }
        None => client.create_product(&request).await?,
    };

    info!(id = %product.id, "Product created successfully!");
    log_product(&product);
    Ok(())
}

/// List products matching a filter.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(filter: &ProductFilter) -> Result<(), CliError> {
    let products = connect()?.list_products(filter).await?;

    if products.is_empty() {
        info!("No products found.");
        return Ok(());
    }

    for product in &products {
        log_product(product);
    }
    info!(count = products.len(), "Products listed");
    Ok(())
}

fn log_product(product: &Product) {
    info!(
        id = %product.id,
        active = product.active,
        total_stock = %product.total_stock,
        "{}",
        product.label()
    );
    for sku in &product.product_skus {
        info!(sku_id = %sku.id, "  {}", sku.label());
    }
}
