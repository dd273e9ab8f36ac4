//! Payment method accepted for an order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a payment method string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payment method: {0}")]
pub struct PaymentMethodError(pub String);

/// How the customer pays for an order.
///
/// Serialized as the lower-case literals `"cash"` and `"card"`; matching is
/// exact, so `"Cash"` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    /// The wire literal for this payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            _ => Err(PaymentMethodError(s.to_string())),
        }
    }
}
