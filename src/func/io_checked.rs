//! Translation of arbitrary failures into [`std::io::Error`].

use super::{CheckedScalar, Func};
use std::error::Error;
use std::io;

/// A [`Func`] whose failure is reported as an [`io::Error`].
///
/// Any error convertible into `Box<dyn Error + Send + Sync>` is wrapped with
/// [`io::Error::other`], so the original error stays reachable through
/// [`io::Error::get_ref`] and [`io::Error::into_inner`].
///
/// # Examples
///
/// ```rust
/// use plait::func::IoCheckedFunc;
/// use std::io;
///
/// let parse = IoCheckedFunc::new(|text: &str| text.parse::<u8>());
///
/// assert_eq!(parse.apply("200").unwrap(), 200);
///
/// let error = parse.apply("300").unwrap_err();
/// assert_eq!(error.kind(), io::ErrorKind::Other);
/// assert_eq!(error.to_string(), "number too large to fit in target type");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IoCheckedFunc<O> {
    origin: O,
}

impl<O> IoCheckedFunc<O> {
    /// Wraps a transformation.
    #[inline]
    pub const fn new(origin: O) -> Self {
        Self { origin }
    }

    /// Applies the wrapped transformation.
    ///
    /// # Errors
    ///
    /// Returns an [`io::ErrorKind::Other`] error carrying the original failure.
    #[inline]
    pub fn apply<X, Y>(&self, input: X) -> io::Result<Y>
    where
        O: Func<X, Y>,
        O::Error: Into<Box<dyn Error + Send + Sync>>,
    {
        CheckedScalar::new(move || self.origin.apply(input), io::Error::other).value()
    }

    /// Returns the wrapped transformation.
    #[inline]
    pub fn into_inner(self) -> O {
        self.origin
    }
}

impl<X, Y, O> Func<X, Y> for IoCheckedFunc<O>
where
    O: Func<X, Y>,
    O::Error: Into<Box<dyn Error + Send + Sync>>,
{
    type Error = io::Error;

    #[inline]
    fn apply(&self, input: X) -> io::Result<Y> {
        Self::apply(self, input)
    }
}
