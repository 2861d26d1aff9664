//! Command implementations.

pub mod definition;
pub mod product;
pub mod skus;
pub mod stock;

use thiserror::Error;

use stockroom_client::{ClientConfig, ClientError, ConfigError, StockroomClient};
use stockroom_core::DraftError;

use definition::DefinitionError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),

    /// Product form is incomplete.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Definition file could not be used.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Build a backend client from the environment.
fn connect() -> Result<StockroomClient, CliError> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Using inventory backend");
    Ok(StockroomClient::new(&config)?)
}
