//! Deferred computation with translate-on-failure.

use super::Scalar;

/// A [`Scalar`] whose failure is converted into a caller-chosen error type.
///
/// `CheckedScalar` pairs a deferred computation with a translator. Nothing
/// runs until [`CheckedScalar::value`] is called. On success the computed
/// value is returned unchanged and the translator is dropped unused; on
/// failure the error is handed to the translator and its result becomes the
/// failure of the whole evaluation.
///
/// Translation is single-layer: a translator that panics unwinds through
/// `value` as-is.
///
/// # Type Parameters
///
/// * `S` - The deferred computation
/// * `T` - The translator, a function from `S::Error` to the target error
///
/// # Examples
///
/// ```rust
/// use plait::func::CheckedScalar;
///
/// let checked = CheckedScalar::new(
///     || "forty-two".parse::<i32>(),
///     |error: std::num::ParseIntError| format!("bad answer: {error}"),
/// );
///
/// assert_eq!(
///     checked.value(),
///     Err("bad answer: invalid digit found in string".to_string())
/// );
/// ```
#[derive(Clone, Copy)]
pub struct CheckedScalar<S, T> {
    origin: S,
    translator: T,
}

impl<S, T> CheckedScalar<S, T> {
    /// Creates a checked scalar from a computation and a translator.
    #[inline]
    pub const fn new(origin: S, translator: T) -> Self {
        Self { origin, translator }
    }

    /// Runs the computation, translating its failure.
    ///
    /// # Errors
    ///
    /// Returns the translator's result when the computation fails.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by the computation or the translator.
    #[inline]
    pub fn value<V, E>(self) -> Result<V, E>
    where
        S: Scalar<V>,
        T: FnOnce(S::Error) -> E,
    {
        self.origin.value().map_err(self.translator)
    }
}

impl<V, E, S, T> Scalar<V> for CheckedScalar<S, T>
where
    S: Scalar<V>,
    T: FnOnce(S::Error) -> E,
{
    type Error = E;

    #[inline]
    fn value(self) -> Result<V, E> {
        Self::value(self)
    }
}

impl<S, T> std::fmt::Debug for CheckedScalar<S, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("CheckedScalar").finish_non_exhaustive()
    }
}
