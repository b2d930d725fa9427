//! Store configuration (tax rate, reference year).

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use bookstore_core::TaxRate;

/// 14% sales tax.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_basis_points(1400);

const ENV_TAX_RATE_BPS: &str = "BOOKSTORE_TAX_RATE_BPS";
const ENV_CURRENT_YEAR: &str = "BOOKSTORE_CURRENT_YEAR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Applied on top of `price * quantity` for every purchase.
    pub tax_rate: TaxRate,
    /// Reference year for `Bookstore::remove_expired`.
    pub current_year: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            current_year: Utc::now().year(),
        }
    }
}

impl StoreConfig {
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn with_current_year(mut self, current_year: i32) -> Self {
        self.current_year = current_year;
        self
    }

    /// Defaults overridden by `BOOKSTORE_TAX_RATE_BPS` / `BOOKSTORE_CURRENT_YEAR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparsable values are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TAX_RATE_BPS) {
            match raw.trim().parse::<u32>() {
                Ok(bps) => config.tax_rate = TaxRate::from_basis_points(bps),
                Err(err) => tracing::warn!(
                    "{ENV_TAX_RATE_BPS}={raw:?} is not a valid basis-point value ({err}); using {}",
                    config.tax_rate
                ),
            }
        }

        if let Some(raw) = lookup(ENV_CURRENT_YEAR) {
            match raw.trim().parse::<i32>() {
                Ok(year) => config.current_year = year,
                Err(err) => tracing::warn!(
                    "{ENV_CURRENT_YEAR}={raw:?} is not a valid year ({err}); using {}",
                    config.current_year
                ),
            }
        }

        config
    }
}
