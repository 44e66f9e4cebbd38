//! Bridge error types.
//!
//! Every fallible operation returns a [`BridgeError`]. Errors that originate
//! in the scripting engine carry the engine's message verbatim; capacity
//! errors carry a formatted message naming the exceeded limit.

use thiserror::Error;

/// Small distinct codes for each failure class.
///
/// Accessor misses are not errors and have no code here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Allocation failure inside the interpreter
    OutOfMemory,
    /// Lock could not be acquired
    Lock,
    /// The context has been destroyed
    Unavailable,
    /// The interpreter instance could not be created
    NewState,
    /// A library registration failed
    Library,
    /// The script could not be read or compiled
    Load,
    /// The priming run raised an error
    Prime,
    /// The invocation raised an error
    Call,
    /// The keys arena would overflow
    KeysOverflow,
    /// The values arena would overflow
    ValuesOverflow,
    /// The pair maximum was exceeded
    TooManyPairs,
    /// Caller passed malformed arguments
    InvalidArguments,
}

impl ErrorKind {
    /// Numeric result code, compatible with the `LUACTX_*` constants.
    ///
    /// Failures without a dedicated historical code report the generic
    /// error code `-1`.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::OutOfMemory => -4,
            ErrorKind::Lock | ErrorKind::Unavailable => -5,
            ErrorKind::NewState => -11,
            ErrorKind::Load => -12,
            ErrorKind::Prime => -13,
            ErrorKind::Library
            | ErrorKind::Call
            | ErrorKind::KeysOverflow
            | ErrorKind::ValuesOverflow
            | ErrorKind::TooManyPairs
            | ErrorKind::InvalidArguments => -1,
        }
    }

    /// True for the three output-capacity failures.
    pub fn is_capacity(self) -> bool {
        matches!(
            self,
            ErrorKind::KeysOverflow | ErrorKind::ValuesOverflow | ErrorKind::TooManyPairs
        )
    }
}

/// An error reported by the Lua call bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The interpreter ran out of memory.
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// The context lock could not be acquired.
    #[error("lock error: {0}")]
    Lock(String),

    /// The interpreter has been torn down.
    #[error("interpreter unavailable: context destroyed")]
    Unavailable,

    /// The interpreter instance could not be created.
    #[error("failed to create interpreter: {0}")]
    NewState(String),

    /// A library registration failed.
    #[error("failed to register library '{name}': {message}")]
    Library {
        /// Library name as registered
        name: String,
        /// Engine message
        message: String,
    },

    /// The script could not be read or compiled.
    #[error("failed to load script '{chunk}': {message}")]
    Load {
        /// Chunk name (`@path` for files)
        chunk: String,
        /// Reader or compiler message
        message: String,
    },

    /// The priming run failed.
    #[error("priming run failed: {0}")]
    Prime(String),

    /// The invocation raised an error.
    #[error("lua_pcall fail: {message}")]
    Call {
        /// Target function name
        function: String,
        /// Engine message
        message: String,
    },

    /// Output keys did not fit in the keys arena.
    #[error("too large out keys: more than {capacity} bytes.")]
    KeysOverflow {
        /// Keys arena capacity in bytes
        capacity: usize,
    },

    /// Output values did not fit in the values arena.
    #[error("too large out values: more than {capacity} bytes.")]
    ValuesOverflow {
        /// Values arena capacity in bytes
        capacity: usize,
    },

    /// The result table had more entries than allowed.
    #[error("too many out pairs: more than {max}.")]
    TooManyPairs {
        /// Maximum pair count
        max: usize,
    },

    /// Malformed caller arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl BridgeError {
    /// Returns the failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::OutOfMemory(_) => ErrorKind::OutOfMemory,
            BridgeError::Lock(_) => ErrorKind::Lock,
            BridgeError::Unavailable => ErrorKind::Unavailable,
            BridgeError::NewState(_) => ErrorKind::NewState,
            BridgeError::Library { .. } => ErrorKind::Library,
            BridgeError::Load { .. } => ErrorKind::Load,
            BridgeError::Prime(_) => ErrorKind::Prime,
            BridgeError::Call { .. } => ErrorKind::Call,
            BridgeError::KeysOverflow { .. } => ErrorKind::KeysOverflow,
            BridgeError::ValuesOverflow { .. } => ErrorKind::ValuesOverflow,
            BridgeError::TooManyPairs { .. } => ErrorKind::TooManyPairs,
            BridgeError::InvalidArguments(_) => ErrorKind::InvalidArguments,
        }
    }

    /// Numeric result code for this error.
    pub fn code(&self) -> i32 {
        self.kind().code()
    }
}

/// Result alias used throughout the bridge.
pub type BridgeResult<T> = Result<T, BridgeError>;
