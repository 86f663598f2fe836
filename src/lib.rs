//! # plait
//!
//! Small composable wrapper primitives over fallible transformations and
//! mutable collections.
//!
//! ## Overview
//!
//! Behavior is added by wrapping one primitive in another rather than by
//! mutating shared state. The library includes:
//!
//! - **Error Translation**: `CheckedFunc` and `CheckedScalar` narrow any
//!   failure down to a caller-chosen error type; `IoCheckedFunc` narrows it
//!   to `std::io::Error`
//! - **Collection Decorators**: `Reversed`, a mutable reversed view that
//!   drains its source lazily and exactly once
//!
//! ## Feature Flags
//!
//! - `func`: `Func`, `Scalar` and the checked wrappers
//! - `collection`: Collection decorators
//! - `serde`: Serialization of collection decorators
//! - `tracing`: Trace events when a decorator materializes its source
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use plait::prelude::*;
//!
//! let parse = CheckedFunc::new(
//!     |text: &str| text.parse::<i32>(),
//!     |error: std::num::ParseIntError| format!("rejected: {error}"),
//! );
//!
//! let mut reversed = Reversed::new(vec!["1", "2", "x"]);
//! reversed.add("4");
//!
//! let parsed: Vec<Result<i32, String>> = reversed.iter().map(|text| parse.apply(*text)).collect();
//! assert_eq!(parsed[0], Err("rejected: invalid digit found in string".to_string()));
//! assert_eq!(parsed[3], Ok(4));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use plait::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "func")]
    pub use crate::func::*;

    #[cfg(feature = "collection")]
    pub use crate::collection::*;
}

#[cfg(feature = "func")]
pub mod func;

#[cfg(feature = "collection")]
pub mod collection;
