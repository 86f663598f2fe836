//! Collection decorators.
//!
//! This module provides collections that wrap a source iterable instead of
//! copying it up front:
//!
//! - [`Reversed`]: A mutable view presenting its source in reverse order,
//!   drained from the source on first use
//!
//! # Examples
//!
//! ```rust
//! use plait::collection::Reversed;
//!
//! let mut reversed = Reversed::new(vec![1, 2, 3, 4]);
//! reversed.remove_all(&[2, 1]);
//! assert_eq!(reversed, [4, 3]);
//!
//! // Reversing the view again restores the source order.
//! let restored: Vec<i32> = Reversed::new(reversed).into_iter().collect();
//! assert_eq!(restored, vec![3, 4]);
//! ```

mod reversed;

pub use reversed::{IntoIter, Iter, Reversed, ReversedState};
