//! Tests for simple interest and chained division failures

use rstest::rstest;

use lineage::application::services::{ArithmeticService, InterestReport};
use lineage::application::ApplicationError;
use lineage::config::InterestConfig;

fn service() -> ArithmeticService {
    ArithmeticService::from_config(&InterestConfig::default()).unwrap()
}

#[rstest]
#[case(800.0, 6.0, 8.0, 384.0)]
#[case(1000.0, 1.0, 100.0, 1000.0)]
#[case(500.0, 2.0, 0.0, 0.0)]
fn given_rate_in_range_when_computing_interest_then_reports_amount(
    #[case] amount: f64,
    #[case] years: f64,
    #[case] rate: f64,
    #[case] expected: f64,
) {
    let report = service().interest(amount, years, rate).unwrap();

    assert_eq!(report, InterestReport::Interest(expected));
}

#[test]
fn given_rate_above_maximum_when_computing_interest_then_reports_out_of_range() {
    // Act
    let report = service().interest(800.0, 6.0, 800.0).unwrap();

    // Assert
    assert_eq!(report, InterestReport::RateOutOfRange(800.0));
}

#[test]
fn given_rate_above_maximum_when_calling_unguarded_then_raises_value_error() {
    let failure = service().simple_interest(800.0, 6.0, 800.0).unwrap_err();

    assert_eq!(failure.kind_name, "ValueError");
    assert_eq!(failure.message, "800");
}

#[test]
fn given_nonzero_divisor_when_dividing_then_returns_quotient() {
    assert_eq!(service().divide(10.0, 4.0), Ok(2.5));
}

#[test]
fn given_zero_divisor_when_dividing_then_value_error_caused_by_zero_division() {
    // Act
    let failure = service().divide(1.0, 0.0).unwrap_err();

    // Assert
    let chain: Vec<String> = failure.chain().map(ToString::to_string).collect();
    assert_eq!(
        chain,
        vec!["ValueError: Division failed", "ZeroDivisionError: division by zero"]
    );
}

#[test]
fn given_negative_max_rate_when_creating_then_config_error() {
    assert!(matches!(
        ArithmeticService::new(-1.0),
        Err(ApplicationError::Config { .. })
    ));
}
