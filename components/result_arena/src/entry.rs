//! Borrowed views into a result set.

use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt;
use std::str::Utf8Error;

/// A key or value stored in a [`ResultSet`](crate::ResultSet).
///
/// The view borrows the result set, so it cannot outlive the next call that
/// resets it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    raw: &'a [u8],
}

impl<'a> Entry<'a> {
    pub(crate) fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    /// Encoded length: content bytes plus the terminator, 0 when absent.
    pub fn encoded_len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the script produced a key or value that has no
    /// string form.
    pub fn is_absent(&self) -> bool {
        self.raw.is_empty()
    }

    /// Content bytes without the terminator.
    pub fn as_bytes(&self) -> &'a [u8] {
        match self.raw.split_last() {
            Some((_, content)) => content,
            None => &[],
        }
    }

    /// Content bytes followed by the terminator. Empty when absent.
    pub fn as_bytes_with_nul(&self) -> &'a [u8] {
        self.raw
    }

    /// Content as UTF-8.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// Content as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Content as a C string, up to the first NUL.
    ///
    /// Returns `None` for absent entries.
    pub fn as_c_str(&self) -> Option<&'a CStr> {
        CStr::from_bytes_until_nul(self.raw).ok()
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absent() {
            write!(f, "Entry(<absent>)")
        } else {
            write!(f, "Entry({:?})", self.to_string_lossy())
        }
    }
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl PartialEq<[u8]> for Entry<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        !self.is_absent() && self.as_bytes() == other
    }
}

impl PartialEq<str> for Entry<'_> {
    fn eq(&self, other: &str) -> bool {
        *self == *other.as_bytes()
    }
}

impl PartialEq<&str> for Entry<'_> {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}
