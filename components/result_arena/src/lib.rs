//! Result Arena - fixed-capacity storage for flattened call results
//!
//! This component provides:
//! - Byte arenas that pack NUL-terminated strings back to back
//! - A span table addressing each key/value pair in O(1)
//! - Borrowed entry views whose lifetime is tied to the result set
//!
//! Nothing here grows: every buffer is sized at compile time and an append
//! that would not fit is rejected whole, never truncated.
//!
//! # Example
//!
//! ```
//! use result_arena::ResultSet;
//!
//! let mut results: ResultSet = ResultSet::new();
//! results.push(Some(b"answer"), Some(b"42")).unwrap();
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results.value_by_key(b"answer").unwrap(), "42");
//! assert_eq!(results.key(0).unwrap().encoded_len(), 7);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod arena;
pub mod entry;
pub mod result_set;

pub use arena::{ByteArena, Span};
pub use entry::Entry;
pub use result_set::{PairSpans, Pairs, ResultSet};
