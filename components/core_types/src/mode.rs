//! Thread-mode tag.

use std::fmt;

/// Selects whether a context serializes access to its interpreter.
///
/// The numeric values match the historical `LUACTX_THREAD_MODE_*` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThreadMode {
    /// No internal locking; the caller guarantees exclusive access.
    #[default]
    Single = 0,
    /// A mutex guards the interpreter and the output buffers as one unit.
    Multi = 1,
}

impl ThreadMode {
    /// Returns true if this mode takes a lock on every acquire.
    pub fn is_locking(self) -> bool {
        matches!(self, ThreadMode::Multi)
    }
}

impl fmt::Display for ThreadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadMode::Single => write!(f, "single"),
            ThreadMode::Multi => write!(f, "multi"),
        }
    }
}
