use crate::config::ValidationConfig;
use crate::error::{FinanceError, Result};
use log::{debug, warn};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The nine text fields collected from the user, exactly as typed.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawInputs {
    pub price_per_sqm: String,
    pub total_sqm: String,
    pub parking_price: String,
    pub own_funds: String,
    pub down_payment_percentage: String,
    pub mortgage_rate: String,
    pub mortgage_years: String,
    pub cash_loan_rate: String,
    pub cash_loan_years: String,
}

impl RawInputs {
    /// Builds the record from a string-keyed field map. Fails on the first
    /// missing key.
    pub fn from_map(fields: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| -> Result<String> {
            fields
                .get(key)
                .cloned()
                .ok_or_else(|| FinanceError::MissingField(key.to_string()))
        };

        Ok(Self {
            price_per_sqm: get("price_per_sqm")?,
            total_sqm: get("total_sqm")?,
            parking_price: get("parking_price")?,
            own_funds: get("own_funds")?,
            down_payment_percentage: get("down_payment_percentage")?,
            mortgage_rate: get("mortgage_rate")?,
            mortgage_years: get("mortgage_years")?,
            cash_loan_rate: get("cash_loan_rate")?,
            cash_loan_years: get("cash_loan_years")?,
        })
    }
}

/// Typed, range-checked inputs. Rates are fractions (0.0289 for 2.89 %).
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidatedInputs {
    pub price_per_sqm: f64,
    pub total_sqm: f64,
    pub parking_price: f64,
    pub own_funds: f64,
    pub down_payment_percentage: f64,
    pub mortgage_rate: f64,
    pub mortgage_years: u32,
    pub cash_loan_rate: f64,
    pub cash_loan_years: u32,
}

/// Parses `raw` and checks it against the optional bounds. The value is
/// returned as parsed, never clamped.
pub fn validate_numeric(raw: &str, min: Option<f64>, max: Option<f64>) -> Result<f64> {
    let invalid = || FinanceError::InvalidNumber {
        raw: raw.to_string(),
    };

    let num: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !num.is_finite() {
        return Err(invalid());
    }

    if min.is_some_and(|min| num < min) || max.is_some_and(|max| num > max) {
        return Err(FinanceError::OutOfRange {
            value: num,
            min,
            max,
        });
    }
    Ok(num)
}

fn check(field: &str, raw: &str, min: Option<f64>, max: Option<f64>) -> Result<f64> {
    validate_numeric(raw, min, max).inspect_err(|e| warn!("{} rejected: {}", field, e))
}

pub fn validate_inputs(raw: &RawInputs, cfg: &ValidationConfig) -> Result<ValidatedInputs> {
    let rate_bounds = (Some(cfg.min_interest), Some(cfg.max_interest));
    let year_bounds = (Some(cfg.min_years), Some(cfg.max_years));

    let validated = ValidatedInputs {
        price_per_sqm: check(
            "price_per_sqm",
            &raw.price_per_sqm,
            Some(cfg.min_price_per_sqm),
            Some(cfg.max_price_per_sqm),
        )?,
        total_sqm: check(
            "total_sqm",
            &raw.total_sqm,
            Some(cfg.min_area),
            Some(cfg.max_area),
        )?,
        parking_price: check("parking_price", &raw.parking_price, Some(0.), None)?,
        own_funds: check("own_funds", &raw.own_funds, Some(0.), None)?,
        down_payment_percentage: check(
            "down_payment_percentage",
            &raw.down_payment_percentage,
            Some(0.),
            Some(100.),
        )?,
        mortgage_rate: check(
            "mortgage_rate",
            &raw.mortgage_rate,
            rate_bounds.0,
            rate_bounds.1,
        )? / 100.,
        // bounds are checked first, so truncation always lands in range
        mortgage_years: check(
            "mortgage_years",
            &raw.mortgage_years,
            year_bounds.0,
            year_bounds.1,
        )? as u32,
        cash_loan_rate: check(
            "cash_loan_rate",
            &raw.cash_loan_rate,
            rate_bounds.0,
            rate_bounds.1,
        )? / 100.,
        cash_loan_years: check(
            "cash_loan_years",
            &raw.cash_loan_years,
            year_bounds.0,
            year_bounds.1,
        )? as u32,
    };
    debug!("validated inputs {:?}", validated);
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::{validate_inputs, validate_numeric, RawInputs, ValidatedInputs};
    use crate::config::ValidationConfig;
    use crate::error::{FinanceError, Result};
    use std::collections::HashMap;
    use test_log::test;

    fn raw() -> RawInputs {
        RawInputs {
            price_per_sqm: "2970".to_string(),
            total_sqm: "57.7".to_string(),
            parking_price: "0".to_string(),
            own_funds: "5000".to_string(),
            down_payment_percentage: "10".to_string(),
            mortgage_rate: "2.89".to_string(),
            mortgage_years: "30".to_string(),
            cash_loan_rate: "4.5".to_string(),
            cash_loan_years: "10".to_string(),
        }
    }

    fn validate_with(edit: &dyn Fn(&mut RawInputs)) -> Result<ValidatedInputs> {
        let mut input = raw();
        edit(&mut input);
        validate_inputs(&input, &ValidationConfig::default())
    }

    #[test]
    fn test_validate_numeric() {
        assert_eq!(validate_numeric("5", Some(0.), Some(10.)), Ok(5.));
        assert_eq!(validate_numeric(" 7.25 ", None, None), Ok(7.25));
        assert_eq!(validate_numeric("0", Some(0.), Some(10.)), Ok(0.));
        assert_eq!(validate_numeric("10", Some(0.), Some(10.)), Ok(10.));
        assert_eq!(validate_numeric("1e3", Some(0.), None), Ok(1000.));

        assert_eq!(
            validate_numeric("abc", Some(0.), Some(10.)),
            Err(FinanceError::InvalidNumber {
                raw: "abc".to_string()
            })
        );
        assert!(matches!(
            validate_numeric("", Some(0.), Some(10.)),
            Err(FinanceError::InvalidNumber { .. })
        ));
        assert!(matches!(
            validate_numeric("NaN", None, None),
            Err(FinanceError::InvalidNumber { .. })
        ));
        assert!(matches!(
            validate_numeric("inf", None, None),
            Err(FinanceError::InvalidNumber { .. })
        ));
        assert_eq!(
            validate_numeric("50", Some(0.), Some(10.)),
            Err(FinanceError::OutOfRange {
                value: 50.,
                min: Some(0.),
                max: Some(10.)
            })
        );
        assert!(matches!(
            validate_numeric("-0.5", Some(0.), None),
            Err(FinanceError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_inputs() {
        let v = validate_inputs(&raw(), &ValidationConfig::default()).unwrap();

        assert_eq!(v.price_per_sqm, 2970.);
        assert_eq!(v.total_sqm, 57.7);
        assert_eq!(v.parking_price, 0.);
        assert_eq!(v.own_funds, 5000.);
        assert_eq!(v.down_payment_percentage, 10.);
        assert_eq!(v.mortgage_rate, 2.89 / 100.);
        assert_eq!(v.mortgage_years, 30);
        assert_eq!(v.cash_loan_rate, 0.045);
        assert_eq!(v.cash_loan_years, 10);
    }

    #[test]
    fn test_validate_inputs_bounds() {
        let cfg = ValidationConfig::default();

        let mut input = raw();
        input.total_sqm = "19.9".to_string();
        assert!(matches!(
            validate_inputs(&input, &cfg),
            Err(FinanceError::OutOfRange { value, .. }) if value == 19.9
        ));

        // rate bounds are in percentage points
        let mut input = raw();
        input.mortgage_rate = "0.05".to_string();
        assert!(matches!(
            validate_inputs(&input, &cfg),
            Err(FinanceError::OutOfRange { .. })
        ));
        input.mortgage_rate = "20".to_string();
        assert_eq!(validate_inputs(&input, &cfg).unwrap().mortgage_rate, 0.2);

        let mut input = raw();
        input.cash_loan_years = "0".to_string();
        assert!(matches!(
            validate_inputs(&input, &cfg),
            Err(FinanceError::OutOfRange { .. })
        ));
        input.cash_loan_years = "41".to_string();
        assert!(matches!(
            validate_inputs(&input, &cfg),
            Err(FinanceError::OutOfRange { .. })
        ));

        // fractional terms truncate after the range check
        input.cash_loan_years = "12.9".to_string();
        assert_eq!(validate_inputs(&input, &cfg).unwrap().cash_loan_years, 12);
    }

    #[test]
    fn test_validate_inputs_price_bounds() {
        assert_eq!(
            validate_with(&|r| r.parking_price = "-1".to_string()),
            Err(FinanceError::OutOfRange {
                value: -1.,
                min: Some(0.),
                max: None
            })
        );
        assert_eq!(
            validate_with(&|r| r.own_funds = "-1".to_string()),
            Err(FinanceError::OutOfRange {
                value: -1.,
                min: Some(0.),
                max: None
            })
        );
        assert_eq!(
            validate_with(&|r| r.down_payment_percentage = "100.5".to_string()),
            Err(FinanceError::OutOfRange {
                value: 100.5,
                min: Some(0.),
                max: Some(100.)
            })
        );
        assert_eq!(
            validate_with(&|r| r.down_payment_percentage = "-0.1".to_string()),
            Err(FinanceError::OutOfRange {
                value: -0.1,
                min: Some(0.),
                max: Some(100.)
            })
        );
        assert_eq!(
            validate_with(&|r| r.price_per_sqm = "10001".to_string()),
            Err(FinanceError::OutOfRange {
                value: 10001.,
                min: Some(0.),
                max: Some(10000.)
            })
        );

        let v = validate_with(&|r| r.down_payment_percentage = "100".to_string()).unwrap();
        assert_eq!(v.down_payment_percentage, 100.);
        let v = validate_with(&|r| r.down_payment_percentage = "0".to_string()).unwrap();
        assert_eq!(v.down_payment_percentage, 0.);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut input = raw();
        input.price_per_sqm = "lots".to_string();
        input.mortgage_years = "99".to_string();

        assert_eq!(
            validate_inputs(&input, &ValidationConfig::default()),
            Err(FinanceError::InvalidNumber {
                raw: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_from_map() {
        let mut fields: HashMap<String, String> = [
            ("price_per_sqm", "2970"),
            ("total_sqm", "57.7"),
            ("parking_price", "0"),
            ("own_funds", "5000"),
            ("down_payment_percentage", "10"),
            ("mortgage_rate", "2.89"),
            ("mortgage_years", "30"),
            ("cash_loan_rate", "4.5"),
            ("cash_loan_years", "10"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(RawInputs::from_map(&fields), Ok(raw()));

        fields.remove("mortgage_years");
        assert_eq!(
            RawInputs::from_map(&fields),
            Err(FinanceError::MissingField("mortgage_years".to_string()))
        );
    }
}
