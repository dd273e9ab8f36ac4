//! Newtype IDs for type-safe entity references.
//!
//! Ids are generated by the document store on insert and travel as the
//! 24-character lowercase hex form of an object id. Use the `define_id!` macro
//! to create wrappers that prevent accidentally mixing ids of different
//! entity types.

use thiserror::Error;

/// Length of the hex form of a document id.
pub const ID_HEX_LENGTH: usize = 24;

/// Errors that can occur when parsing an id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The input does not have exactly 24 characters.
    #[error("id must be {expected} hex characters (got {actual})")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },
    /// The input contains a non-hex character.
    #[error("id contains non-hex character '{0}'")]
    InvalidCharacter(char),
}

/// Validate the hex form of a document id.
///
/// # Errors
///
/// Returns [`IdError`] if the input is not exactly 24 hex digits.
pub fn validate_hex_id(s: &str) -> Result<(), IdError> {
    if s.len() != ID_HEX_LENGTH {
        return Err(IdError::InvalidLength {
            expected: ID_HEX_LENGTH,
            actual: s.len(),
        });
    }

    if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(IdError::InvalidCharacter(c));
    }

    Ok(())
}

/// Macro to define a type-safe id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - A validating `parse()` plus `as_str()`
/// - `FromStr` and `Display` implementations
/// - `From<ObjectId>` and `to_object_id()` (with `mongodb` feature)
///
/// # Example
///
/// ```rust
/// # use restaurant_orders_core::define_id;
/// define_id!(TableId);
///
/// let id = TableId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
/// assert!(TableId::parse("42").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an id from its hex form.
            ///
            /// Upper-case hex is normalised to lower case.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is not exactly 24 hex digits.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::IdError> {
                $crate::validate_hex_id(s)?;
                Ok(Self(s.to_ascii_lowercase()))
            }

            /// Get the hex form of the id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        #[cfg(feature = "mongodb")]
        impl From<::bson::oid::ObjectId> for $name {
            fn from(oid: ::bson::oid::ObjectId) -> Self {
                Self(oid.to_hex())
            }
        }

        #[cfg(feature = "mongodb")]
        impl $name {
            /// Convert to a `bson` object id.
            ///
            /// Returns `None` only for ids that bypassed `parse()` (e.g. deserialized).
            #[must_use]
            pub fn to_object_id(&self) -> Option<::bson::oid::ObjectId> {
                ::bson::oid::ObjectId::parse_str(&self.0).ok()
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(OrderId);
