//! Tests for the range prompt service

use std::io::Cursor;

use rstest::rstest;

use lineage::application::services::{
    Attempt, RangeService, ABOVE_RANGE, BELOW_RANGE, IN_RANGE, NOT_A_NUMBER,
};
use lineage::application::ApplicationError;
use lineage::config::RangeConfig;

#[rstest]
#[case("5", Attempt::Retry(BELOW_RANGE))]
#[case("9\n", Attempt::Retry(BELOW_RANGE))]
#[case("10", Attempt::Accepted(10))]
#[case(" 30 \n", Attempt::Accepted(30))]
#[case("50", Attempt::Accepted(50))]
#[case("51", Attempt::Retry(ABOVE_RANGE))]
#[case("abc", Attempt::Retry(NOT_A_NUMBER))]
#[case("3.5", Attempt::Retry(NOT_A_NUMBER))]
fn given_default_range_when_attempting_then_classifies_input(
    #[case] line: &str,
    #[case] expected: Attempt,
) {
    let service = RangeService::from_config(&RangeConfig::default()).unwrap();

    assert_eq!(service.attempt(line).unwrap(), expected);
}

#[test]
fn given_mixed_input_when_running_then_retries_until_value_in_range() {
    // Arrange
    let service = RangeService::new(10, 50).unwrap();
    let input = Cursor::new("5\n60\nabc\n30\n");
    let mut output = Vec::new();

    // Act
    let value = service.run(input, &mut output).unwrap();

    // Assert
    assert_eq!(value, 30);
    let text = String::from_utf8(output).unwrap();
    let prompt = "Enter any value in 10 to 50 range: ";
    assert_eq!(text.matches(prompt).count(), 4);
    let messages: Vec<&str> = text
        .split(prompt)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(messages, vec![BELOW_RANGE, ABOVE_RANGE, NOT_A_NUMBER, IN_RANGE]);
}

#[test]
fn given_input_ending_early_when_running_then_input_error() {
    let service = RangeService::new(10, 50).unwrap();
    let mut output = Vec::new();

    let result = service.run(Cursor::new("1\n2\n"), &mut output);

    assert!(matches!(result, Err(ApplicationError::Input { .. })));
}

#[test]
fn given_inverted_bounds_when_creating_then_config_error() {
    assert!(matches!(
        RangeService::new(50, 10),
        Err(ApplicationError::Config { .. })
    ));
}

#[test]
fn given_out_of_range_value_when_checking_then_raises_matching_kind() {
    let service = RangeService::new(10, 50).unwrap();

    let small = service.check(3).unwrap_err();
    let large = service.check(70).unwrap_err();

    assert_eq!(small.kind_name, "ValueTooSmallError");
    assert_eq!(small.message, "3");
    assert_eq!(large.kind_name, "ValueTooLargeError");
    assert_eq!(service.check(10), Ok(10));
}
