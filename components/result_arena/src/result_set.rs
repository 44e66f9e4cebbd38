//! Flattened key/value results with fixed capacity.
//!
//! A [`ResultSet`] holds one invocation's output: a keys arena, a values
//! arena, and a table of spans addressing pair `i` in both. Spans are
//! recorded when a pair is written so reads never scan.

use std::collections::BTreeMap;
use std::ffi::CStr;
use std::fmt;

use arrayvec::ArrayVec;
use core_types::limits::{KEYS_BUFSIZE, PAIRS_MAXNUM, VALUES_BUFSIZE};
use core_types::{BridgeError, BridgeResult};

use crate::arena::{ByteArena, Span};
use crate::entry::Entry;

/// Key and value spans of one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairSpans {
    /// Span in the keys arena
    pub key: Span,
    /// Span in the values arena
    pub value: Span,
}

/// Output of one invocation.
///
/// Capacities are compile-time parameters; the defaults are the bridge
/// limits from [`core_types::limits`].
pub struct ResultSet<
    const PAIRS: usize = PAIRS_MAXNUM,
    const KEYS: usize = KEYS_BUFSIZE,
    const VALUES: usize = VALUES_BUFSIZE,
> {
    keys: ByteArena<KEYS>,
    values: ByteArena<VALUES>,
    pairs: ArrayVec<PairSpans, PAIRS>,
}

impl<const PAIRS: usize, const KEYS: usize, const VALUES: usize> ResultSet<PAIRS, KEYS, VALUES> {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self {
            keys: ByteArena::new(),
            values: ByteArena::new(),
            pairs: ArrayVec::new(),
        }
    }

    /// Maximum number of pairs.
    pub const fn max_pairs(&self) -> usize {
        PAIRS
    }

    /// Number of pairs currently stored.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Bytes used in the keys arena.
    pub fn keys_used(&self) -> usize {
        self.keys.len()
    }

    /// Bytes used in the values arena.
    pub fn values_used(&self) -> usize {
        self.values.len()
    }

    /// Invalidates every stored pair.
    pub fn reset(&mut self) {
        self.pairs.clear();
        self.keys.clear();
        self.values.clear();
    }

    /// Appends one pair.
    ///
    /// The keys arena, the values arena and the pair limit are checked in
    /// that order before anything is written. On error the set keeps every
    /// pair stored before this one, unchanged.
    pub fn push(&mut self, key: Option<&[u8]>, value: Option<&[u8]>) -> BridgeResult<()> {
        if !self.keys.fits(ByteArena::<KEYS>::encoded_len(key)) {
            return Err(BridgeError::KeysOverflow { capacity: KEYS });
        }
        if !self.values.fits(ByteArena::<VALUES>::encoded_len(value)) {
            return Err(BridgeError::ValuesOverflow { capacity: VALUES });
        }
        if self.pairs.is_full() {
            return Err(BridgeError::TooManyPairs { max: PAIRS });
        }

        let key = self
            .keys
            .append(key)
            .map_err(|_| BridgeError::KeysOverflow { capacity: KEYS })?;
        let value = self
            .values
            .append(value)
            .map_err(|_| BridgeError::ValuesOverflow { capacity: VALUES })?;
        self.pairs
            .try_push(PairSpans { key, value })
            .map_err(|_| BridgeError::TooManyPairs { max: PAIRS })
    }

    /// Spans of pair `index`, if stored.
    pub fn spans(&self, index: usize) -> Option<PairSpans> {
        self.pairs.get(index).copied()
    }

    /// Key of pair `index`; `None` at or beyond [`len`](Self::len).
    pub fn key(&self, index: usize) -> Option<Entry<'_>> {
        self.pairs
            .get(index)
            .map(|spans| Entry::new(self.keys.get(spans.key)))
    }

    /// Value of pair `index`; `None` at or beyond [`len`](Self::len).
    pub fn value(&self, index: usize) -> Option<Entry<'_>> {
        self.pairs
            .get(index)
            .map(|spans| Entry::new(self.values.get(spans.value)))
    }

    /// Key and value of pair `index`.
    pub fn pair(&self, index: usize) -> Option<(Entry<'_>, Entry<'_>)> {
        Some((self.key(index)?, self.value(index)?))
    }

    /// Index of the first pair whose key equals `key` byte for byte.
    ///
    /// Keys that could never fit in the keys arena never match.
    pub fn find_key(&self, key: &[u8]) -> Option<usize> {
        if key.len() >= KEYS {
            return None;
        }
        self.pairs.iter().position(|spans| {
            spans.key.len == key.len() + 1 && self.keys.get(spans.key)[..key.len()] == *key
        })
    }

    /// [`find_key`](Self::find_key) for a NUL-terminated key.
    pub fn find_key_cstr(&self, key: &CStr) -> Option<usize> {
        self.find_key(key.to_bytes())
    }

    /// Value paired with `key`.
    pub fn value_by_key(&self, key: &[u8]) -> Option<Entry<'_>> {
        self.value(self.find_key(key)?)
    }

    /// Iterates pairs in stored order.
    pub fn iter(&self) -> Pairs<'_, PAIRS, KEYS, VALUES> {
        Pairs {
            set: self,
            index: 0,
        }
    }

    /// Copies the pairs into an owned map.
    ///
    /// Pairs with an absent key are skipped; absent values become empty
    /// strings.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .filter(|(key, _)| !key.is_absent())
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}

impl<const PAIRS: usize, const KEYS: usize, const VALUES: usize> Default
    for ResultSet<PAIRS, KEYS, VALUES>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const PAIRS: usize, const KEYS: usize, const VALUES: usize> fmt::Debug
    for ResultSet<PAIRS, KEYS, VALUES>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the pairs of a [`ResultSet`].
pub struct Pairs<'a, const PAIRS: usize, const KEYS: usize, const VALUES: usize> {
    set: &'a ResultSet<PAIRS, KEYS, VALUES>,
    index: usize,
}

impl<'a, const PAIRS: usize, const KEYS: usize, const VALUES: usize> Iterator
    for Pairs<'a, PAIRS, KEYS, VALUES>
{
    type Item = (Entry<'a>, Entry<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.set.pair(self.index)?;
        self.index += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<const PAIRS: usize, const KEYS: usize, const VALUES: usize> ExactSizeIterator
    for Pairs<'_, PAIRS, KEYS, VALUES>
{
}

impl<'a, const PAIRS: usize, const KEYS: usize, const VALUES: usize> IntoIterator
    for &'a ResultSet<PAIRS, KEYS, VALUES>
{
    type Item = (Entry<'a>, Entry<'a>);
    type IntoIter = Pairs<'a, PAIRS, KEYS, VALUES>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
