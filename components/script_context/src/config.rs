//! Context configuration and script sources.

use std::path::{Path, PathBuf};

use core_types::{BridgeError, BridgeResult};
use mlua::{Function, Lua, StdLib};

use crate::library::LibraryRegistration;

/// Where the script that primes a context comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// A script file, read when the context is created
    File(PathBuf),
    /// In-memory source with a display name
    Chunk {
        /// Name shown in error messages
        name: String,
        /// Lua source text
        code: String,
    },
}

impl ScriptSource {
    /// Script read from `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ScriptSource::File(path.into())
    }

    /// In-memory script.
    pub fn chunk(name: impl Into<String>, code: impl Into<String>) -> Self {
        ScriptSource::Chunk {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Chunk name as the interpreter reports it: `@path` for files,
    /// `=name` for in-memory chunks.
    pub fn chunk_name(&self) -> String {
        match self {
            ScriptSource::File(path) => format!("@{}", path.display()),
            ScriptSource::Chunk { name, .. } => format!("={name}"),
        }
    }

    /// Reads and compiles the source without running it.
    pub(crate) fn compile(&self, lua: &Lua) -> BridgeResult<Function> {
        let chunk_name = self.chunk_name();
        let load_error = |message: String| BridgeError::Load {
            chunk: chunk_name.clone(),
            message,
        };

        let chunk = match self {
            ScriptSource::File(path) => {
                let code = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
                lua.load(code)
            }
            ScriptSource::Chunk { code, .. } => lua.load(code.as_str()),
        };

        chunk
            .set_name(chunk_name.clone())
            .into_function()
            .map_err(|e| load_error(e.to_string()))
    }
}

impl From<PathBuf> for ScriptSource {
    fn from(path: PathBuf) -> Self {
        ScriptSource::File(path)
    }
}

impl From<&Path> for ScriptSource {
    fn from(path: &Path) -> Self {
        ScriptSource::File(path.to_path_buf())
    }
}

/// Interpreter settings applied when a context is created.
///
/// Output capacities are not configured here; they are compile-time
/// limits in [`core_types::limits`].
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Standard libraries opened in the interpreter
    pub std_libs: StdLib,
    /// Interpreter heap cap in bytes
    pub memory_limit: Option<usize>,
    /// Install [`DEFAULT_TRAMPOLINE`](crate::DEFAULT_TRAMPOLINE) before the
    /// priming run
    pub default_trampoline: bool,
    /// Libraries to require, in order
    pub libraries: Vec<LibraryRegistration>,
}

impl ContextConfig {
    /// Select the standard libraries to open
    pub fn with_std_libs(mut self, libs: StdLib) -> Self {
        self.std_libs = libs;
        self
    }

    /// Cap the interpreter heap
    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit = Some(bytes);
        self
    }

    /// Install the default trampoline
    pub fn with_default_trampoline(mut self, enabled: bool) -> Self {
        self.default_trampoline = enabled;
        self
    }

    /// Append a library registration
    pub fn with_library(mut self, library: LibraryRegistration) -> Self {
        self.libraries.push(library);
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            std_libs: StdLib::ALL_SAFE,
            memory_limit: None,
            default_trampoline: false,
            libraries: Vec::new(),
        }
    }
}
