//! Status enums for stock transactions.

use serde::{Deserialize, Serialize};

/// Direction of a stock transaction.
///
/// Maps to the backend's `IN` / `OUT` transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Stock in (purchase).
    In,
    /// Stock out (sale).
    Out,
}

impl TransactionType {
    /// Wire value used by the backend and its query filters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// Human-readable label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::In => "Stock In",
            Self::Out => "Stock Out",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => Err(format!("invalid transaction type: {s}")),
        }
    }
}
