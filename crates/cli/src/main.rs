//! Stockroom CLI - Products, SKUs and stock from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Preview the SKUs a definition would create (no backend needed)
//! stockroom skus preview t-shirt.yaml
//!
//! # Create the product
//! stockroom product create t-shirt.yaml --image t-shirt.jpg
//!
//! # List products
//! stockroom product list --name shirt
//!
//! # Adjust stock
//! stockroom stock add --product <uuid> --sku <uuid> --quantity 5
//! stockroom stock remove --product <uuid> --sku <uuid> --quantity 1
//!
//! # Stock transaction report
//! stockroom stock report --from 2024-05-01 --to 2024-05-31
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_API_URL` - Inventory API base URL (default: `http://localhost:8000/api`)
//! - `STOCKROOM_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `STOCKROOM_LOG_JSON` - Emit JSON logs when set
//! - `RUST_LOG` - Log filter (default: `stockroom_cli=info,stockroom_client=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom_core::api::{ProductFilter, StockReportFilter};
use stockroom_core::{AdjustmentQuantity, ProductId, ProductSkuId, TransactionType};

mod commands;

use commands::stock::Adjustment;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom inventory CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview generated SKUs
    Skus {
        #[command(subcommand)]
        action: SkusAction,
    },
    /// Create and list products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Adjust stock and view transactions
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
}

#[derive(Subcommand)]
enum SkusAction {
    /// Show the SKUs a product definition would create
    Preview {
        /// Product definition file (YAML)
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product from a definition file
    Create {
        /// Product definition file (YAML)
        file: PathBuf,

        /// Product image to upload
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// List products
    List {
        /// Name contains (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Exact product code
        #[arg(short, long)]
        code: Option<String>,

        /// Only active (true) or inactive (false) products
        #[arg(short, long)]
        active: Option<bool>,
    },
}

#[derive(clap::Args)]
struct AdjustArgs {
    /// Product ID
    #[arg(short, long)]
    product: ProductId,

    /// Product SKU ID
    #[arg(short, long)]
    sku: ProductSkuId,

    /// Quantity to move (positive)
    #[arg(short, long)]
    quantity: AdjustmentQuantity,
}

#[derive(Subcommand)]
enum StockAction {
    /// Add stock to a SKU
    Add(AdjustArgs),
    /// Remove stock from a SKU
    Remove(AdjustArgs),
    /// List stock transactions
    Report {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only this product
        #[arg(short, long)]
        product: Option<ProductId>,

        /// Only this SKU
        #[arg(short, long)]
        sku: Option<ProductSkuId>,

        /// Only `in` or `out` transactions
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
    },
}

/// Install the tracing subscriber.
///
/// JSON output is used when `STOCKROOM_LOG_JSON` is set, text otherwise.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockroom_cli=info,stockroom_client=info".into());

    let is_json = std::env::var_os("STOCKROOM_LOG_JSON").is_some();
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Skus { action } => match action {
            SkusAction::Preview { file } => commands::skus::preview(&file).await?,
        },
        Commands::Product { action } => match action {
            ProductAction::Create { file, image } => {
                commands::product::create(&file, image.as_deref()).await?;
            }
            ProductAction::List { name, code, active } => {
                let filter = ProductFilter {
                    name_contains: name,
                    code,
                    active,
                };
                commands::product::list(&filter).await?;
            }
        },
        Commands::Stock { action } => match action {
            StockAction::Add(args) => {
                commands::stock::adjust(Adjustment::Add, args.product, args.sku, args.quantity)
                    .await?;
            }
            StockAction::Remove(args) => {
                commands::stock::adjust(Adjustment::Remove, args.product, args.sku, args.quantity)
                    .await?;
            }
            StockAction::Report {
                from,
                to,
                product,
                sku,
                transaction_type,
            } => {
                let filter = StockReportFilter {
                    from,
                    to,
                    product_id: product,
                    product_sku_id: sku,
                    transaction_type,
                };
                commands::stock::report(&filter).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let parsed = Cli::try_parse_from([
            "stockroom",
            "stock",
            "add",
            "--product",
            "1f2e3d4c-5b6a-4978-8a7b-6c5d4e3f2a1b",
            "--sku",
            "2f2e3d4c-5b6a-4978-8a7b-6c5d4e3f2a1b",
            "--quantity",
            "0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parses_report_filters() {
        let parsed = Cli::try_parse_from([
            "stockroom", "stock", "report", "--from", "2024-05-01", "--type", "out",
        ]);
        assert!(parsed.is_ok());
    }
}
