//! Transformation with translate-on-failure.
//!
//! [`CheckedFunc`] narrows whatever a transformation fails with down to a
//! single error type chosen by the caller. It holds no mutable state, so a
//! single instance can be applied any number of times, and shared across
//! threads whenever the wrapped transformation and translator allow it.

use super::{CheckedScalar, Func};

/// A [`Func`] whose failure is converted into a caller-chosen error type.
///
/// Applying a `CheckedFunc` runs the wrapped transformation. A success is
/// returned unchanged and the translator is not called. A failure is passed
/// to the translator and the translator's result is returned as the error.
///
/// Translation happens exactly once. If the translator panics, the panic
/// unwinds through [`CheckedFunc::apply`] untouched; it is never caught or
/// translated a second time.
///
/// # Type Parameters
///
/// * `O` - The wrapped transformation (`O: Func<X, Y>`)
/// * `T` - The translator (`T: Fn(O::Error) -> E`)
///
/// # Examples
///
/// ```rust
/// use plait::func::CheckedFunc;
///
/// #[derive(Debug, PartialEq)]
/// enum LookupError {
///     Missing(String),
/// }
///
/// let ports = [("http", 80), ("https", 443)];
/// let lookup = CheckedFunc::new(
///     |name: &str| {
///         ports
///             .iter()
///             .find(|(key, _)| *key == name)
///             .map(|(_, port)| *port)
///             .ok_or(name.to_string())
///     },
///     LookupError::Missing,
/// );
///
/// assert_eq!(lookup.apply("https"), Ok(443));
/// assert_eq!(lookup.apply("gopher"), Err(LookupError::Missing("gopher".to_string())));
/// ```
///
/// Checked functions are themselves [`Func`]s and can be nested:
///
/// ```rust
/// use plait::func::{CheckedFunc, Func};
///
/// let inner = CheckedFunc::new(|value: i32| -> Result<i32, i32> { Err(value) }, |code: i32| code + 1);
/// let outer = CheckedFunc::new(inner, |code: i32| format!("code {code}"));
///
/// assert_eq!(outer.apply(41), Err("code 42".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct CheckedFunc<O, T> {
    origin: O,
    translator: T,
}

impl<O, T> CheckedFunc<O, T> {
    /// Creates a checked function from a transformation and a translator.
    #[inline]
    pub const fn new(origin: O, translator: T) -> Self {
        Self { origin, translator }
    }

    /// Applies the wrapped transformation, translating its failure.
    ///
    /// The call is deferred into a [`CheckedScalar`] together with a borrow
    /// of the translator and evaluated immediately.
    ///
    /// # Errors
    ///
    /// Returns the translator's result when the wrapped transformation fails.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by the transformation or the translator.
    #[inline]
    pub fn apply<X, Y, E>(&self, input: X) -> Result<Y, E>
    where
        O: Func<X, Y>,
        T: Fn(O::Error) -> E,
    {
        CheckedScalar::new(move || self.origin.apply(input), &self.translator).value()
    }

    /// Returns the wrapped transformation.
    #[inline]
    pub const fn origin(&self) -> &O {
        &self.origin
    }

    /// Returns the translator.
    #[inline]
    pub const fn translator(&self) -> &T {
        &self.translator
    }

    /// Splits the checked function into its transformation and translator.
    #[inline]
    pub fn into_parts(self) -> (O, T) {
        (self.origin, self.translator)
    }
}

impl<O, S, E> CheckedFunc<O, fn(S) -> E>
where
    E: From<S>,
{
    /// Creates a checked function that translates through [`From`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plait::func::CheckedFunc;
    /// use std::num::ParseIntError;
    ///
    /// #[derive(Debug)]
    /// struct AppError(ParseIntError);
    ///
    /// impl From<ParseIntError> for AppError {
    ///     fn from(error: ParseIntError) -> Self {
    ///         Self(error)
    ///     }
    /// }
    ///
    /// let parse: CheckedFunc<_, fn(ParseIntError) -> AppError> =
    ///     CheckedFunc::with_from(|text: &str| text.parse::<i64>());
    ///
    /// assert_eq!(parse.apply("-7").unwrap(), -7);
    /// assert!(parse.apply("seven").is_err());
    /// ```
    #[inline]
    pub fn with_from(origin: O) -> Self {
        Self::new(origin, E::from)
    }
}

impl<X, Y, E, O, T> Func<X, Y> for CheckedFunc<O, T>
where
    O: Func<X, Y>,
    T: Fn(O::Error) -> E,
{
    type Error = E;

    #[inline]
    fn apply(&self, input: X) -> Result<Y, E> {
        Self::apply(self, input)
    }
}

impl<O, T> std::fmt::Debug for CheckedFunc<O, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("CheckedFunc").finish_non_exhaustive()
    }
}
