//! Path parameters captured during lookup.

use tracing::trace;

use crate::path::unescape;

/// A single captured URL parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    /// The capture name, without its `:` or `*` sigil.
    pub key: String,
    /// The captured text.
    pub value: String,
}

/// Ordered captures, outermost first.
///
/// The buffer is meant to be reused across requests: the router clears it
/// at the start of every lookup but keeps its allocation, and grows it to
/// the tree's capture bound the first time a capture is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: Vec<Param>,
}

impl Params {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer able to hold `capacity` captures without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            params: Vec::with_capacity(capacity),
        }
    }

    /// Returns the first value captured under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_str())
    }

    /// Returns the value captured under `key`, or `""` when absent.
    pub fn by_name(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Returns an iterator over `(key, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|param| (param.key.as_str(), param.value.as_str()))
    }

    /// Returns the captures as a slice.
    pub fn as_slice(&self) -> &[Param] {
        &self.params
    }

    /// Returns the number of captures.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns how many captures fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.params.capacity()
    }

    /// Removes every capture, keeping the allocation.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Appends a capture, growing the buffer to `bound` entries first if it
    /// is smaller.
    pub(crate) fn capture(&mut self, bound: u8, key: &[u8], raw: &[u8], decode: bool) {
        let bound = usize::from(bound);
        if self.params.capacity() < bound {
            self.params.reserve(bound - self.params.len());
        }

        let raw = String::from_utf8_lossy(raw);
        let value = if decode {
            unescape(&raw).unwrap_or_else(|| {
                trace!(value = %raw, "path value is not valid percent-encoding, keeping raw text");
                raw.into_owned()
            })
        } else {
            raw.into_owned()
        };

        self.params.push(Param {
            key: String::from_utf8_lossy(key).into_owned(),
            value,
        });
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
