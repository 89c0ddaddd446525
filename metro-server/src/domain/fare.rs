//! Fare amounts.

use std::fmt;
use std::ops::Add;

use serde::Serialize;

use super::DomainError;

/// A fare in rupees.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Fare(f64);

impl Fare {
    pub const ZERO: Fare = Fare(0.0);

    /// Create a fare, rejecting negative, NaN, and infinite amounts.
    pub fn new(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidFare(amount));
        }
        Ok(Self(amount))
    }

    /// For compile-time tables whose amounts are known to be valid.
    pub(crate) const fn from_static(amount: f64) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> f64 {
        self.0
    }
}

impl Add for Fare {
    type Output = Fare;

    fn add(self, rhs: Fare) -> Fare {
        Fare(self.0 + rhs.0)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.0}", self.0)
    }
}
