//! Fallible transformations and error translation.
//!
//! This module provides the two callable abstractions of the crate and the
//! wrappers that translate their failures:
//!
//! - [`Func`]: A single-argument transformation that may fail
//! - [`Scalar`]: A zero-argument deferred computation that may fail
//! - [`CheckedScalar`]: A `Scalar` whose failure is translated by a function
//! - [`CheckedFunc`]: A `Func` whose failure is translated by a function
//! - [`IoCheckedFunc`]: A `Func` whose failure is translated into [`std::io::Error`]
//!
//! Both traits are implemented for plain closures, so any
//! `Fn(X) -> Result<Y, E>` is a `Func<X, Y>` and any `FnOnce() -> Result<V, E>`
//! is a `Scalar<V>`.
//!
//! # Examples
//!
//! ```rust
//! use plait::func::{CheckedFunc, Func};
//! use std::num::ParseIntError;
//!
//! #[derive(Debug, PartialEq)]
//! struct ConfigError(String);
//!
//! let parse = CheckedFunc::new(
//!     |text: &str| text.parse::<u16>(),
//!     |error: ParseIntError| ConfigError(error.to_string()),
//! );
//!
//! assert_eq!(parse.apply("8080"), Ok(8080));
//! assert!(parse.apply("http").is_err());
//! ```

mod checked_func;
mod checked_scalar;
mod io_checked;

pub use checked_func::CheckedFunc;
pub use checked_scalar::CheckedScalar;
pub use io_checked::IoCheckedFunc;

/// A transformation from `X` to `Y` that may fail.
///
/// Every closure or function of shape `Fn(X) -> Result<Y, E>` implements
/// this trait with `Error = E`.
///
/// # Examples
///
/// ```rust
/// use plait::func::Func;
///
/// fn halve(value: i32) -> Result<i32, String> {
///     if value % 2 == 0 {
///         Ok(value / 2)
///     } else {
///         Err(format!("{value} is odd"))
///     }
/// }
///
/// assert_eq!(halve.apply(10), Ok(5));
/// assert_eq!(halve.apply(3), Err("3 is odd".to_string()));
/// ```
pub trait Func<X, Y> {
    /// The failure produced by [`Func::apply`].
    type Error;

    /// Applies the transformation to `input`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the transformation fails.
    fn apply(&self, input: X) -> Result<Y, Self::Error>;
}

impl<X, Y, E, Function> Func<X, Y> for Function
where
    Function: Fn(X) -> Result<Y, E>,
{
    type Error = E;

    #[inline]
    fn apply(&self, input: X) -> Result<Y, E> {
        self(input)
    }
}

/// A deferred computation producing a `V` that may fail.
///
/// Evaluation consumes the scalar, so a computation that moves captured
/// values out (the call `origin.apply(input)` inside [`CheckedFunc`], for
/// instance) is a valid scalar. Every `FnOnce() -> Result<V, E>` implements
/// this trait with `Error = E`.
///
/// # Examples
///
/// ```rust
/// use plait::func::Scalar;
///
/// let greeting = String::from("hello");
/// let scalar = move || -> Result<usize, ()> { Ok(greeting.len()) };
/// assert_eq!(scalar.value(), Ok(5));
/// ```
pub trait Scalar<V> {
    /// The failure produced by [`Scalar::value`].
    type Error;

    /// Runs the computation.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the computation fails.
    fn value(self) -> Result<V, Self::Error>;
}

impl<V, E, Computation> Scalar<V> for Computation
where
    Computation: FnOnce() -> Result<V, E>,
{
    type Error = E;

    #[inline]
    fn value(self) -> Result<V, E> {
        self()
    }
}
