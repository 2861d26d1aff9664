//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The backend keys
//! every row by UUID, so the wrappers hold a [`Uuid`].

use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `Uuid` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_uuid()`
/// - `From<Uuid>`, `Into<Uuid>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use stockroom_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(ShelfId);
///
/// let raw = uuid::Uuid::nil();
/// let warehouse = WarehouseId::new(raw);
/// let shelf = ShelfId::new(raw);
///
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = shelf;
/// # let _ = (warehouse, shelf);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a UUID.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Backend entity IDs
define_id!(ProductId);
define_id!(ProductSkuId);
define_id!(VariantId);
define_id!(SubVariantId);
define_id!(StockTransactionId);

impl ProductId {
    /// Generate a random product ID.
    ///
    /// Only useful for fixtures; real IDs are assigned by the backend.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl ProductSkuId {
    /// Generate a random SKU ID.
    ///
    /// Only useful for fixtures; real IDs are assigned by the backend.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_and_display() {
        let raw = "6f1c2f0e-8a47-4b8f-9d7e-3b0c1a2d4e5f";
        let id: ProductId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_id_parse_trims_whitespace() {
        let id: ProductSkuId = " 6f1c2f0e-8a47-4b8f-9d7e-3b0c1a2d4e5f\n".parse().unwrap();
        assert_eq!(id.to_string(), "6f1c2f0e-8a47-4b8f-9d7e-3b0c1a2d4e5f");
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ProductId::new(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
