//! Lua Call Bridge CLI Library
//!
//! Provides the argument parser, the context runner, and the REPL used by
//! the `luactx` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod repl;
pub mod runner;

pub use cli::{Cli, OutputFormat};
pub use error::{CliError, CliResult};
pub use runner::{CallOutput, OutputPair, Runner};
