#![cfg(feature = "func")]
//! Unit tests for CheckedFunc, CheckedScalar and IoCheckedFunc.
//!
//! Tests cover:
//! - Pass-through of successful results
//! - Translation of failures into the declared error type
//! - Single-layer translation (translator panics escape untouched)
//! - Nesting and `Func` interoperability
//! - Shared use across threads

use plait::func::{CheckedFunc, CheckedScalar, Func, IoCheckedFunc};
use rstest::rstest;
use std::cell::Cell;
use std::num::ParseIntError;
use std::panic::{AssertUnwindSafe, catch_unwind};

#[derive(Debug, Clone, PartialEq, Eq)]
enum PortError {
    NotANumber(String),
    Reserved(u16),
}

impl From<ParseIntError> for PortError {
    fn from(error: ParseIntError) -> Self {
        Self::NotANumber(error.to_string())
    }
}

fn parse_port(text: &str) -> Result<u16, ParseIntError> {
    text.parse()
}

// =============================================================================
// Success Path
// =============================================================================

#[rstest]
#[case("80", 80)]
#[case("8080", 8080)]
#[case("65535", 65535)]
fn checked_func_returns_origin_result_on_success(#[case] input: &str, #[case] expected: u16) {
    let checked = CheckedFunc::new(parse_port, |error: ParseIntError| {
        PortError::NotANumber(error.to_string())
    });
    assert_eq!(checked.apply(input), Ok(expected));
}

#[rstest]
fn checked_func_never_invokes_translator_on_success() {
    let translations = Cell::new(0);
    let checked = CheckedFunc::new(parse_port, |error: ParseIntError| {
        translations.set(translations.get() + 1);
        PortError::NotANumber(error.to_string())
    });

    for input in ["1", "2", "3"] {
        assert!(checked.apply(input).is_ok());
    }
    assert_eq!(translations.get(), 0);
}

// =============================================================================
// Failure Path
// =============================================================================

#[rstest]
fn checked_func_translates_failure() {
    let checked = CheckedFunc::new(parse_port, |error: ParseIntError| {
        PortError::NotANumber(error.to_string())
    });

    assert_eq!(
        checked.apply("http"),
        Err(PortError::NotANumber("invalid digit found in string".to_string()))
    );
}

#[rstest]
fn checked_func_translates_domain_failure() {
    let reject_privileged = |port: u16| -> Result<u16, u16> {
        if port < 1024 { Err(port) } else { Ok(port) }
    };
    let checked = CheckedFunc::new(reject_privileged, PortError::Reserved);

    assert_eq!(checked.apply(22), Err(PortError::Reserved(22)));
    assert_eq!(checked.apply(2222), Ok(2222));
}

#[rstest]
fn checked_func_with_from_uses_conversion() {
    let checked: CheckedFunc<_, fn(ParseIntError) -> PortError> =
        CheckedFunc::with_from(parse_port);

    assert_eq!(checked.apply("443"), Ok(443));
    assert_eq!(
        checked.apply(""),
        Err(PortError::NotANumber(
            "cannot parse integer from empty string".to_string()
        ))
    );
}

#[derive(Debug, PartialEq, Eq)]
struct TranslatorFailure(&'static str);

#[rstest]
fn checked_func_translator_panic_escapes_unwrapped() {
    let checked = CheckedFunc::new(
        |_: i32| -> Result<i32, String> { Err("origin failed".to_string()) },
        |_: String| -> PortError { std::panic::panic_any(TranslatorFailure("translator failed")) },
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| checked.apply(1)));
    let payload = outcome.expect_err("translator panic must propagate");

    assert_eq!(
        payload.downcast_ref::<TranslatorFailure>(),
        Some(&TranslatorFailure("translator failed"))
    );
}

#[rstest]
fn checked_func_origin_panic_is_not_translated() {
    let translations = Cell::new(0);
    let checked = CheckedFunc::new(
        |_: i32| -> Result<i32, String> { panic!("origin panicked") },
        |error: String| {
            translations.set(translations.get() + 1);
            error
        },
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| checked.apply(1)));
    assert!(outcome.is_err());
    assert_eq!(translations.get(), 0);
}

// =============================================================================
// Composition
// =============================================================================

#[rstest]
fn checked_func_nests_one_translation_per_layer() {
    let inner = CheckedFunc::new(parse_port, |error: ParseIntError| error.to_string());
    let outer = CheckedFunc::new(inner, |message: String| message.len());

    assert_eq!(outer.apply("7"), Ok(7));
    assert_eq!(outer.apply("x"), Err("invalid digit found in string".len()));
}

fn apply_all<F>(function: &F, inputs: &[&'static str]) -> Vec<Result<u16, F::Error>>
where
    F: Func<&'static str, u16>,
{
    inputs.iter().map(|input| function.apply(*input)).collect()
}

#[rstest]
fn checked_func_is_a_func() {
    let checked = CheckedFunc::new(parse_port, |_: ParseIntError| PortError::Reserved(0));
    let results = apply_all(&checked, &["1", "no"]);
    assert_eq!(results, vec![Ok(1), Err(PortError::Reserved(0))]);
}

#[rstest]
fn checked_scalar_defers_and_translates() {
    let evaluated = Cell::new(false);
    let scalar = CheckedScalar::new(
        || {
            evaluated.set(true);
            parse_port("99999")
        },
        PortError::from,
    );

    assert!(!evaluated.get());
    assert_eq!(
        scalar.value(),
        Err(PortError::NotANumber(
            "number too large to fit in target type".to_string()
        ))
    );
    assert!(evaluated.get());
}

#[rstest]
fn io_checked_func_reports_io_error() {
    let checked = IoCheckedFunc::new(parse_port);

    assert_eq!(checked.apply("21").unwrap(), 21);

    let error = checked.apply("-1").unwrap_err();
    assert_eq!(error.kind(), std::io::ErrorKind::Other);
    assert!(
        error
            .get_ref()
            .is_some_and(|inner| inner.is::<ParseIntError>())
    );
}

// =============================================================================
// Sharing
// =============================================================================

#[rstest]
fn checked_func_is_shareable_across_threads() {
    let checked = CheckedFunc::new(
        |value: u64| -> Result<u64, &'static str> { value.checked_mul(2).ok_or("overflow") },
        |error: &'static str| error.len(),
    );

    std::thread::scope(|scope| {
        for value in 0..4_u64 {
            let checked = &checked;
            scope.spawn(move || {
                assert_eq!(checked.apply(value), Ok(value * 2));
            });
        }
    });

    assert_eq!(checked.apply(u64::MAX), Err("overflow".len()));
}
