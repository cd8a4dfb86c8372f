//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog quotes every price in a single implied currency, so [`Price`]
//! wraps a bare [`Decimal`] amount rather than carrying a currency code.
//! Decimal arithmetic keeps line totals exact (no float drift when summing
//! `price * quantity` across cart entries).

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store's implied currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price. Subtotals of empty carts collapse to this.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a raw decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole currency units (e.g., dollars).
    #[must_use]
    pub fn from_major_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A closed price interval used for filtering.
///
/// `max` of `None` means the interval is unbounded above. Both ends are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lower bound (inclusive).
    pub min: Price,
    /// Upper bound (inclusive), or `None` for no upper bound.
    pub max: Option<Price>,
}

impl PriceRange {
    /// Create a bounded range `[min, max]`.
    #[must_use]
    pub const fn new(min: Price, max: Price) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// The full range `[0, +inf)`, matching every non-negative price.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: Price::ZERO,
            max: None,
        }
    }

    /// Whether a price falls inside the range, inclusive on both ends.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}
