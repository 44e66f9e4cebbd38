//! Shared types for the Lua call bridge.
//!
//! This crate provides the vocabulary used by every other component:
//! the error taxonomy, the thread-mode tag, and the compile-time capacity
//! limits that bound the output arenas.
//!
//! # Overview
//!
//! - [`BridgeError`] - Every failure the bridge can report
//! - [`ErrorKind`] - Small distinct result codes for those failures
//! - [`ThreadMode`] - Whether a context serializes access internally
//! - [`limits`] - Arena and error-message capacities
//!
//! # Examples
//!
//! ```
//! use core_types::{BridgeError, ErrorKind, limits};
//!
//! let error = BridgeError::TooManyPairs { max: limits::PAIRS_MAXNUM };
//! assert_eq!(error.kind(), ErrorKind::TooManyPairs);
//! assert_eq!(error.to_string(), "too many out pairs: more than 254.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
pub mod limits;
mod mode;

pub use error::{BridgeError, BridgeResult, ErrorKind};
pub use mode::ThreadMode;
