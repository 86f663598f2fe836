//! Mutable reversed view over a lazily drained source.
//!
//! This module provides the `Reversed<T, I>` collection. It holds a source
//! iterable untouched until the first read or mutation, drains it once into
//! a backing [`VecDeque`], and from then on presents the backing in reverse
//! order.
//!
//! # Examples
//!
//! ```rust
//! use plait::collection::Reversed;
//!
//! let mut reversed = Reversed::new(vec![1, 2, 3, 4]);
//! assert_eq!(reversed, [4, 3, 2, 1]);
//!
//! reversed.add(6);
//! assert_eq!(reversed, [4, 3, 2, 1, 6]);
//!
//! reversed.remove(&1);
//! assert_eq!(reversed, [4, 3, 2, 6]);
//! ```

use std::cell::{Cell, OnceCell};
use std::collections::VecDeque;
use std::collections::vec_deque;
use std::fmt;
use std::iter::{FusedIterator, Rev};

/// Whether a [`Reversed`] has drained its source yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReversedState {
    /// The source has not been touched.
    Unmaterialized,
    /// The source has been drained into the backing sequence.
    Materialized,
    /// Draining the source panicked; every later access panics too.
    Poisoned,
}

/// A mutable collection presenting its source in reverse order.
///
/// `Reversed<T, I>` wraps any finite `I: IntoIterator<Item = T>`. The source
/// is drained exactly once, on the first call to any read or mutating
/// method, and the result is cached for the rest of the instance's life. A
/// stateful or one-shot source is therefore consumed a single time.
///
/// Every operation works on the reversed view: position `i` of the view is
/// position `len - 1 - i` of the backing sequence, recomputed from the
/// current length on every call.
///
/// Mutations are defined in view terms:
///
/// - [`add`](Self::add) appends to the end of the view (the front of the
///   backing sequence)
/// - [`add_all`](Self::add_all) appends several elements to the end of the
///   view, keeping their iteration order
/// - [`remove`](Self::remove) removes one equal element, wherever it is
/// - [`remove_all`](Self::remove_all) and [`retain_all`](Self::retain_all)
///   filter by membership
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `I` - The source type (defaults to `Vec<T>`)
///
/// # Thread Safety
///
/// Materialization goes through a `Cell` and a `OnceCell`, so this type is
/// `Send` when `T` and `I` are, but never `Sync`. Wrap it in a `Mutex` for
/// shared access across threads.
///
/// # Examples
///
/// ```rust
/// use plait::collection::Reversed;
///
/// let mut reversed = Reversed::new(vec![1, 2, 3, 4]);
/// reversed.add_all([5, 6, 7]);
///
/// let view: Vec<i32> = reversed.iter().copied().collect();
/// assert_eq!(view, vec![4, 3, 2, 1, 5, 6, 7]);
/// ```
///
/// A one-shot source is drained once:
///
/// ```rust
/// use plait::collection::Reversed;
/// use std::cell::Cell;
///
/// let pulls = Cell::new(0);
/// let source = (1..=3).inspect(|_| pulls.set(pulls.get() + 1));
/// let reversed = Reversed::new(source);
///
/// assert_eq!(pulls.get(), 0);
/// assert_eq!(reversed.len(), 3);
/// assert_eq!(reversed.first(), Some(&3));
/// assert_eq!(pulls.get(), 3);
/// ```
pub struct Reversed<T, I = Vec<T>> {
    source: Cell<Option<I>>,
    backing: OnceCell<VecDeque<T>>,
    poisoned: Cell<bool>,
}

/// Maps a view position onto the backing sequence.
#[inline]
const fn backing_index(length: usize, index: usize) -> Option<usize> {
    if index < length {
        Some(length - 1 - index)
    } else {
        None
    }
}

fn materialize<T, I>(source: Option<I>) -> VecDeque<T>
where
    I: IntoIterator<Item = T>,
{
    let backing: VecDeque<T> =
        source.map_or_else(VecDeque::new, |source| source.into_iter().collect());
    #[cfg(feature = "tracing")]
    tracing::trace!(elements = backing.len(), "materialized reversed view");
    backing
}

impl<T, I> Reversed<T, I>
where
    I: IntoIterator<Item = T>,
{
    /// Creates a reversed view over `source` without touching it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plait::collection::Reversed;
    ///
    /// let reversed = Reversed::new(vec!["item", "last"]);
    /// assert!(!reversed.is_materialized());
    /// assert_eq!(reversed.iter().next(), Some(&"last"));
    /// ```
    #[inline]
    pub const fn new(source: I) -> Self {
        Self {
            source: Cell::new(Some(source)),
            backing: OnceCell::new(),
            poisoned: Cell::new(false),
        }
    }

    /// Drains the source on first use.
    ///
    /// The instance is marked poisoned while the source is being drained, so
    /// a panicking source leaves it poisoned rather than silently empty.
    ///
    /// # Panics
    ///
    /// Panics if an earlier drain of the source panicked.
    fn backing(&self) -> &VecDeque<T> {
        self.backing.get_or_init(|| {
            assert!(
                !self.poisoned.replace(true),
                "Reversed instance has been poisoned"
            );
            let backing = materialize(self.source.take());
            self.poisoned.set(false);
            backing
        })
    }

    fn backing_mut(&mut self) -> &mut VecDeque<T> {
        self.backing();
        match self.backing.get_mut() {
            Some(backing) => backing,
            None => unreachable!("backing is initialized by the call above"),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.backing().len()
    }

    /// Returns `true` if the view holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.backing().is_empty()
    }

    /// Returns an iterator over the view, last source element first.
    ///
    /// Each call starts a fresh traversal of the current contents.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plait::collection::Reversed;
    ///
    /// let reversed = Reversed::new(vec![1, 2, 3]);
    /// let collected: Vec<_> = reversed.iter().collect();
    /// assert_eq!(collected, vec![&3, &2, &1]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.backing().iter().rev(),
        }
    }

    /// Returns the element at view position `index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plait::collection::Reversed;
    ///
    /// let reversed = Reversed::new(vec!['a', 'b', 'c']);
    /// assert_eq!(reversed.get(0), Some(&'c'));
    /// assert_eq!(reversed.get(2), Some(&'a'));
    /// assert_eq!(reversed.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let backing = self.backing();
        let position = backing_index(backing.len(), index)?;
        backing.get(position)
    }

    /// Returns a mutable reference to the element at view position `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let backing = self.backing_mut();
        let position = backing_index(backing.len(), index)?;
        backing.get_mut(position)
    }

    /// Returns the first element of the view (the last source element).
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.backing().back()
    }

    /// Returns the last element of the view (the first source element).
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.backing().front()
    }

    /// Returns `true` if an equal element is present.
    #[inline]
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.backing().contains(element)
    }

    /// Returns `true` if every element of `elements` is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plait::collection::Reversed;
    ///
    /// let reversed = Reversed::new(vec!["first", "second", "third"]);
    /// assert!(reversed.contains_all(&["first", "second"]));
    /// assert!(!reversed.contains_all(&["first", "fourth"]));
    /// ```
    pub fn contains_all<'a, J>(&self, elements: J) -> bool
    where
        J: IntoIterator<Item = &'a T>,
        T: PartialEq + 'a,
    {
        let backing = self.backing();
        elements.into_iter().all(|element| backing.contains(element))
    }

    /// Copies the view into a new vector of exactly [`len`](Self::len) elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut result = Vec::with_capacity(self.len());
        result.extend(self.iter().cloned());
        result
    }

    /// Copies the view into `target`, reusing it when it is long enough.
    ///
    /// When `target.len() >= self.len()`, the first `self.len()` slots are
    /// overwritten in view order and the remaining slots keep their previous
    /// values. Otherwise `target` is dropped and a new vector of exactly
    /// `self.len()` elements is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plait::collection::Reversed;
    ///
    /// let reversed = Reversed::new(vec![1, 2]);
    /// assert_eq!(reversed.to_vec_in(vec![0, 0, 9]), vec![2, 1, 9]);
    /// assert_eq!(reversed.to_vec_in(vec![0]), vec![2, 1]);
    /// ```
    pub fn to_vec_in(&self, mut target: Vec<T>) -> Vec<T>
    where
        T: Clone,
    {
        if target.len() < self.len() {
            return self.to_vec();
        }
        for (slot, element) in target.iter_mut().zip(self.iter()) {
            slot.clone_from(element);
        }
        target
    }

    /// Appends `element` to the end of the view.
    ///
    /// Always returns `true`.
    pub fn add(&mut self, element: T) -> bool {
        self.backing_mut().push_front(element);
        true
    }

    /// Appends every element of `elements` to the end of the view, in order.
    ///
    /// Returns `true` if at least one element was added.
    pub fn add_all<J>(&mut self, elements: J) -> bool
    where
        J: IntoIterator<Item = T>,
    {
        let backing = self.backing_mut();
        let before = backing.len();
        for element in elements {
            backing.push_front(element);
        }
        backing.len() != before
    }

    /// Removes the first element equal to `element`, scanning the source order.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove(&mut self, element: &T) -> bool
    where
        T: PartialEq,
    {
        let backing = self.backing_mut();
        let Some(position) = backing.iter().position(|candidate| candidate == element) else {
            return false;
        };
        backing.remove(position).is_some()
    }

    /// Removes every element that is present in `elements`.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_all<'a, J>(&mut self, elements: J) -> bool
    where
        J: IntoIterator<Item = &'a T>,
        T: PartialEq + 'a,
    {
        let elements: Vec<&T> = elements.into_iter().collect();
        self.retain(|element| !elements.contains(&element))
    }

    /// Removes every element that is not present in `elements`.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain_all<'a, J>(&mut self, elements: J) -> bool
    where
        J: IntoIterator<Item = &'a T>,
        T: PartialEq + 'a,
    {
        let elements: Vec<&T> = elements.into_iter().collect();
        self.retain(|element| elements.contains(&element))
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain<P>(&mut self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let backing = self.backing_mut();
        let before = backing.len();
        backing.retain(predicate);
        backing.len() != before
    }

    /// Removes every element.
    #[inline]
    pub fn clear(&mut self) {
        self.backing_mut().clear();
    }
}

impl<T, I> Reversed<T, I> {
    /// Returns the materialization state without triggering it.
    #[inline]
    pub fn state(&self) -> ReversedState {
        if self.backing.get().is_some() {
            ReversedState::Materialized
        } else if self.poisoned.get() {
            ReversedState::Poisoned
        } else {
            ReversedState::Unmaterialized
        }
    }

    /// Returns `true` once the source has been drained.
    #[inline]
    pub fn is_materialized(&self) -> bool {
        self.state() == ReversedState::Materialized
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to the elements of a [`Reversed`], in view order.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: Rev<vec_deque::Iter<'a, T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of a [`Reversed`], in view order.
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: Rev<vec_deque::IntoIter<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, I> IntoIterator for Reversed<T, I>
where
    I: IntoIterator<Item = T>,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.backing();
        let backing = self.backing.into_inner().unwrap_or_default();
        IntoIter {
            inner: backing.into_iter().rev(),
        }
    }
}

impl<'a, T, I> IntoIterator for &'a Reversed<T, I>
where
    I: IntoIterator<Item = T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, I> Extend<T> for Reversed<T, I>
where
    I: IntoIterator<Item = T>,
{
    fn extend<J: IntoIterator<Item = T>>(&mut self, elements: J) {
        self.add_all(elements);
    }
}

impl<T> FromIterator<T> for Reversed<T> {
    fn from_iter<J: IntoIterator<Item = T>>(iter: J) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T, I: Default> Default for Reversed<T, I> {
    fn default() -> Self {
        Self {
            source: Cell::new(Some(I::default())),
            backing: OnceCell::new(),
            poisoned: Cell::new(false),
        }
    }
}

/// Cloning materializes `self` and copies the backing sequence, so the
/// source is never drained twice.
impl<T: Clone, I> Clone for Reversed<T, I>
where
    I: IntoIterator<Item = T>,
{
    fn clone(&self) -> Self {
        Self {
            source: Cell::new(None),
            backing: OnceCell::from(self.backing().clone()),
            poisoned: Cell::new(false),
        }
    }
}

impl<T, I, J> PartialEq<Reversed<T, J>> for Reversed<T, I>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
    J: IntoIterator<Item = T>,
{
    fn eq(&self, other: &Reversed<T, J>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, I> Eq for Reversed<T, I> where I: IntoIterator<Item = T> {}

impl<T, I> PartialEq<Vec<T>> for Reversed<T, I>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    fn eq(&self, other: &Vec<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, I, const N: usize> PartialEq<[T; N]> for Reversed<T, I>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    fn eq(&self, other: &[T; N]) -> bool {
        self.len() == N && self.iter().eq(other.iter())
    }
}

/// Formatting never drains the source; an untouched view prints as
/// `Reversed(<unmaterialized>)` and a poisoned one as `Reversed(<poisoned>)`.
impl<T: fmt::Debug, I> fmt::Debug for Reversed<T, I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(backing) = self.backing.get() {
            return formatter.debug_list().entries(backing.iter().rev()).finish();
        }
        let placeholder = if self.poisoned.get() {
            "<poisoned>"
        } else {
            "<unmaterialized>"
        };
        formatter
            .debug_tuple("Reversed")
            .field(&format_args!("{placeholder}"))
            .finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, I> serde::Serialize for Reversed<T, I>
where
    T: serde::Serialize,
    I: IntoIterator<Item = T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Reversed<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut view = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        view.reverse();
        Ok(Self::new(view))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    static_assertions::assert_impl_all!(Reversed<i32>: Send);
    static_assertions::assert_not_impl_any!(Reversed<i32>: Sync);

    #[rstest]
    #[case(0, 0, None)]
    #[case(3, 0, Some(2))]
    #[case(3, 2, Some(0))]
    #[case(3, 3, None)]
    fn test_backing_index(
        #[case] length: usize,
        #[case] index: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(backing_index(length, index), expected);
    }

    #[rstest]
    fn test_new_does_not_materialize() {
        let reversed = Reversed::new(vec![1, 2, 3]);
        assert_eq!(reversed.state(), ReversedState::Unmaterialized);
    }

    #[rstest]
    fn test_read_materializes() {
        let reversed = Reversed::new(vec![1, 2, 3]);
        assert_eq!(reversed.len(), 3);
        assert_eq!(reversed.state(), ReversedState::Materialized);
    }

    #[rstest]
    fn test_mutation_materializes() {
        let mut reversed = Reversed::new(vec![1]);
        reversed.clear();
        assert!(reversed.is_materialized());
        assert!(reversed.is_empty());
    }

    #[rstest]
    fn test_get_mut_writes_through_view_position() {
        let mut reversed = Reversed::new(vec![1, 2, 3]);
        if let Some(element) = reversed.get_mut(0) {
            *element = 30;
        }
        assert_eq!(reversed, [30, 2, 1]);
        assert_eq!(reversed.get_mut(3), None);
    }

    #[rstest]
    fn test_debug_does_not_materialize() {
        let reversed = Reversed::new(vec![1, 2]);
        assert_eq!(format!("{reversed:?}"), "Reversed(<unmaterialized>)");
        assert!(!reversed.is_materialized());

        let _ = reversed.len();
        assert_eq!(format!("{reversed:?}"), "[2, 1]");
    }

    #[rstest]
    fn test_clone_copies_backing() {
        let mut original = Reversed::new(vec![1, 2]);
        let copy = original.clone();
        original.add(3);

        assert_eq!(copy, [2, 1]);
        assert_eq!(original, [2, 1, 3]);
        assert!(copy.is_materialized());
    }

    #[rstest]
    fn test_panicking_source_poisons_view() {
        let reversed = Reversed::new((1..=3).map(|value| {
            assert!(value != 3, "source failed");
            value
        }));

        let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| reversed.len()));
        assert!(first.is_err());
        assert_eq!(reversed.state(), ReversedState::Poisoned);
        assert_eq!(format!("{reversed:?}"), "Reversed(<poisoned>)");

        let second = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| reversed.len()));
        let payload = second.expect_err("a poisoned view must not be read");
        assert_eq!(
            payload.downcast_ref::<&str>(),
            Some(&"Reversed instance has been poisoned")
        );
        assert_eq!(reversed.state(), ReversedState::Poisoned);
    }

    #[rstest]
    fn test_default_is_empty() {
        let reversed: Reversed<String> = Reversed::default();
        assert!(reversed.is_empty());
    }
}
