//! Prices, charges and tax.

use serde::{Deserialize, Serialize};

use crate::error::{BookstoreError, BookstoreResult};
use crate::value_object::ValueObject;

const MINOR_PER_MAJOR: u64 = 100;
const BASIS_POINTS_PER_UNIT: u128 = 10_000;

/// Amount of money in minor currency units (piastres for EGP).
///
/// Unsigned, so a price can never be negative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Whole currency units; `u32` so the conversion cannot overflow.
    pub const fn from_major(major: u32) -> Self {
        Self(major as u64 * MINOR_PER_MAJOR)
    }

    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// `self * quantity`, or `AmountOverflow`.
    pub fn times(self, quantity: u32) -> BookstoreResult<Self> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Self)
            .ok_or(BookstoreError::AmountOverflow)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

/// Sales tax rate in basis points (1400 = 14%).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl ValueObject for TaxRate {}

impl TaxRate {
    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Gross amount `net * (1 + rate)`, rounded half-up to the minor unit.
    pub fn apply(self, net: Money) -> BookstoreResult<Money> {
        let factor = BASIS_POINTS_PER_UNIT + u128::from(self.0);
        let gross = u128::from(net.0) * factor;
        let rounded = (gross + BASIS_POINTS_PER_UNIT / 2) / BASIS_POINTS_PER_UNIT;
        u64::try_from(rounded)
            .map(Money)
            .map_err(|_| BookstoreError::AmountOverflow)
    }
}

impl core::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}
