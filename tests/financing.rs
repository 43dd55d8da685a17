use home_finance::config::{DisplayConfig, ValidationConfig};
use home_finance::loan::{calculate_from_inputs, calculate_loan_details};
use home_finance::report::render;
use home_finance::validate::{validate_inputs, RawInputs};
use home_finance::FinanceError;
use std::collections::HashMap;
use test_log::test;

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn one_bedroom() -> HashMap<String, String> {
    fields(&[
        ("price_per_sqm", "2970"),
        ("total_sqm", "57.7"),
        ("parking_price", "0"),
        ("own_funds", "5000"),
        ("down_payment_percentage", "10"),
        ("mortgage_rate", "2.89"),
        ("mortgage_years", "30"),
        ("cash_loan_rate", "4.5"),
        ("cash_loan_years", "10"),
    ])
}

#[test]
fn test_field_map_to_report() {
    let raw = RawInputs::from_map(&one_bedroom()).unwrap();
    let inputs = validate_inputs(&raw, &ValidationConfig::default()).unwrap();
    let details = calculate_from_inputs(&inputs).unwrap();

    assert!((details.total_price - 171369.).abs() < 1e-6);
    assert!((details.cash_loan_amount - 12136.9).abs() < 1e-6);
    assert!((details.mortgage_amount - 154232.1).abs() < 1e-6);

    let out = render(&details, &DisplayConfig::default());
    assert!(out.contains("Total property price: 171369.00 EUR"));
    assert!(out.contains("Cash loan amount: 12136.90 EUR"));
    assert!(out.contains("Monthly payment: 641.13 EUR"));
    assert!(out.contains("Monthly payment: 125.78 EUR"));
    assert!(out.contains("Total monthly payment: 766.92 EUR"));
}

#[test]
fn test_validation_error_stops_pipeline() {
    let mut map = one_bedroom();
    map.insert("total_sqm".to_string(), "15".to_string());
    let raw = RawInputs::from_map(&map).unwrap();

    let err = validate_inputs(&raw, &ValidationConfig::default()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err,
        FinanceError::OutOfRange {
            value: 15.,
            min: Some(20.),
            max: Some(1000.)
        }
    );
}

#[test]
fn test_annuity_identities() {
    for principal in [1000., 54321.5, 250000.] {
        for rate in [0., 0.001, 0.0289, 0.2] {
            for years in [1, 10, 40] {
                let result = calculate_loan_details(principal, rate, years).unwrap();
                let months = f64::from(years * 12);
                assert_eq!(result.total_payment, result.monthly_payment * months);
                assert_eq!(result.total_interest, result.total_payment - principal);
                assert!(result.total_interest > -1e-6);
            }
        }
    }
}
