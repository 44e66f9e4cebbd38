//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use script_context::{ContextConfig, ThreadMode};

/// How result pairs are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `key=value` line per pair
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Call named Lua functions through a script's `__trycall` trampoline
#[derive(Debug, Parser)]
#[command(name = "luactx", version)]
pub struct Cli {
    /// Script that defines `__trycall` and the functions it dispatches to
    #[arg(short, long)]
    pub script: PathBuf,

    /// Function to call once, then exit
    #[arg(short, long, conflicts_with = "repl")]
    pub call: Option<String>,

    /// Arguments passed to the function, as KEY=VALUE
    #[arg(value_parser = parse_pair, requires = "call")]
    pub args: Vec<(String, String)>,

    /// Output format for result pairs
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Use a lock-protected context
    #[arg(long)]
    pub multi: bool,

    /// Cap the interpreter heap, in bytes
    #[arg(long, value_name = "BYTES")]
    pub memory_limit: Option<usize>,

    /// Install the built-in trampoline before loading the script
    #[arg(long)]
    pub default_trampoline: bool,

    /// Start interactive REPL
    #[arg(short, long)]
    pub repl: bool,
}

impl Cli {
    /// Thread mode selected by `--multi`.
    pub fn thread_mode(&self) -> ThreadMode {
        if self.multi {
            ThreadMode::Multi
        } else {
            ThreadMode::Single
        }
    }

    /// Interpreter settings selected on the command line.
    pub fn config(&self) -> ContextConfig {
        let mut config = ContextConfig::default().with_default_trampoline(self.default_trampoline);
        if let Some(limit) = self.memory_limit {
            config = config.with_memory_limit(limit);
        }
        config
    }
}

/// Splits `KEY=VALUE` at the first `=`.
///
/// The value may be empty or contain further `=`; the key may not be empty.
pub fn parse_pair(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some(("", _)) => Err(format!("empty key in '{arg}'")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}
