//! Compile-time capacity bounds.
//!
//! These constants bound every allocation the bridge makes for call
//! results. They are fixed at build time; there is no dynamic growth.

/// Maximum length of a stored error message, excluding the terminator.
pub const ERROR_MAXLEN: usize = 255;

/// Maximum number of key/value pairs one invocation may produce.
pub const PAIRS_MAXNUM: usize = 254;

/// Byte capacity of the keys arena, terminators included.
pub const KEYS_BUFSIZE: usize = 4096;

/// Byte capacity of the values arena, terminators included.
pub const VALUES_BUFSIZE: usize = 16384;

/// Global name of the dispatcher every script must define.
pub const TRAMPOLINE_NAME: &str = "__trycall";
