//! Type-safe ID wrappers.
//!
//! Use the `define_id!` macro to create integer ID newtypes. The product API
//! assigns integer identifiers and the cart is persisted as a JSON array of
//! them, so the wrappers serialize transparently.

use thiserror::Error;

/// Error parsing an ID from text (e.g., a route parameter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} id: {input:?}")]
pub struct ParseIdError {
    kind: &'static str,
    input: String,
}

impl ParseIdError {
    #[doc(hidden)]
    #[must_use]
    pub fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_owned(),
        }
    }

    /// The rejected text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `FromStr` (surrounding whitespace ignored), failing with [`ParseIdError`]
///
/// # Example
///
/// ```rust
/// # use catalog_core::define_id;
/// define_id!(OrderId, "order");
///
/// let id: OrderId = " 7 ".parse().unwrap();
/// assert_eq!(id, OrderId::new(7));
/// assert_eq!(
///     "seven".parse::<OrderId>().unwrap_err().to_string(),
///     "invalid order id: \"seven\""
/// );
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $kind:literal) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|_| $crate::types::ParseIdError::new($kind, s))
            }
        }
    };
}

define_id!(ProductId, "product");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = "abc".parse::<ProductId>().unwrap_err();
        assert_eq!(err.to_string(), "invalid product id: \"abc\"");
        assert_eq!(err.input(), "abc");
        assert!("".parse::<ProductId>().is_err());
        assert!("1.5".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_conversions() {
        let id = ProductId::from(12);
        assert_eq!(id.as_i32(), 12);
        assert_eq!(i32::from(id), 12);
        assert_eq!(id.to_string(), "12");
    }

    #[test]
    fn test_cart_list_deserializes_from_json_array() {
        let ids: Vec<ProductId> = serde_json::from_str("[3, 1, 2]").unwrap();
        assert_eq!(ids, vec![ProductId::new(3), ProductId::new(1), ProductId::new(2)]);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&ProductId::new(42)).unwrap(), "42");
    }
}
