//! Call bridge into an embedded Lua interpreter
//!
//! This crate lets native code invoke named Lua functions and read their
//! results back as flat string key/value pairs:
//! - One interpreter per [`ScriptContext`], primed once at creation
//! - Calls dispatched by name through the script's `__trycall` trampoline
//! - Results flattened into fixed-capacity arenas, failing instead of
//!   truncating when a limit is hit
//! - Thread model chosen by type: [`Single`] for caller-synchronized use,
//!   [`Multi`] for a context shared between threads
//!
//! # Example
//!
//! ```
//! use script_context::{ContextConfig, ScriptSource, SingleContext};
//!
//! let source = ScriptSource::chunk(
//!     "greeter",
//!     r#"function greet(args) return { greeting = "hello " .. args.name } end"#,
//! );
//! let config = ContextConfig::default().with_default_trampoline(true);
//! let ctx = SingleContext::with_config(source, config).unwrap();
//!
//! let mut bridge = ctx.acquire().unwrap();
//! bridge.call("greet", Some(("name", "lua"))).unwrap();
//! assert_eq!(bridge.value_by_key("greeting").unwrap(), "hello lua");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod config;
pub mod context;
pub mod library;
pub mod model;
pub mod trampoline;

// Re-export main types at crate root
pub use bridge::CallBridge;
pub use config::{ContextConfig, ScriptSource};
pub use context::{ContextGuard, ScriptContext, SharedContext, SingleContext};
pub use library::{LibraryOpener, LibraryRegistration};
pub use model::{Multi, Single, ThreadModel};
pub use trampoline::DEFAULT_TRAMPOLINE;

pub use core_types::{limits, BridgeError, BridgeResult, ErrorKind, ThreadMode};
pub use result_arena::{Entry, ResultSet};
