#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pre-filled field values offered to the user. Not enforced anywhere.
pub mod defaults {
    pub const MORTGAGE_RATE: &str = "2.89";
    pub const MORTGAGE_YEARS: &str = "30";
    pub const CASH_LOAN_RATE: &str = "4.5";
    pub const CASH_LOAN_YEARS: &str = "10";
}

/// Range limits applied by `validate::validate_inputs`.
///
/// Interest bounds are in percentage points and are checked before the rate
/// is converted to a fraction.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationConfig {
    pub min_price_per_sqm: f64,
    pub max_price_per_sqm: f64,
    pub min_area: f64,
    pub max_area: f64,
    pub min_interest: f64,
    pub max_interest: f64,
    pub min_years: f64,
    pub max_years: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_price_per_sqm: 0.,
            max_price_per_sqm: 10000.,
            min_area: 20.,
            max_area: 1000.,
            min_interest: 0.1,
            max_interest: 20.,
            min_years: 1.,
            max_years: 40.,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    pub currency: String,
    pub dec_places: usize,
    // cash-loan figures at or below this are shown as "not required"
    pub not_required_threshold: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            dec_places: 2,
            not_required_threshold: 10.,
        }
    }
}
