//! Path helpers: pattern scanning, normalization and value decoding.

use percent_encoding::percent_decode_str;

use crate::error::{Result, RouterError};

/// A wildcard found in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Wildcard<'a> {
    /// The wildcard as written, sigil included (`:id`, `*filepath`).
    pub(crate) name: &'a [u8],
    /// Byte offset of the sigil.
    pub(crate) start: usize,
    /// False when the segment holds a second sigil.
    pub(crate) valid: bool,
}

impl Wildcard<'_> {
    pub(crate) fn is_catch_all(&self) -> bool {
        self.name[0] == b'*'
    }

    pub(crate) fn to_lossy_string(self) -> String {
        String::from_utf8_lossy(self.name).into_owned()
    }
}

/// Length of the longest common byte prefix of `a` and `b`.
pub(crate) fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Number of wildcards in a pattern, saturating at `u8::MAX`.
pub(crate) fn count_params(path: &[u8]) -> u8 {
    let n = path.iter().filter(|&&c| c == b':' || c == b'*').count();
    u8::try_from(n).unwrap_or(u8::MAX)
}

/// Finds the first wildcard segment in `path`.
///
/// The wildcard runs from its sigil up to the next `/` or the end of the
/// path. A second sigil inside that range marks it invalid.
pub(crate) fn find_wildcard(path: &[u8]) -> Option<Wildcard<'_>> {
    let start = path.iter().position(|&c| c == b':' || c == b'*')?;
    let rest = &path[start + 1..];
    let len = rest.iter().position(|&c| c == b'/').unwrap_or(rest.len());
    let valid = !rest[..len].iter().any(|&c| c == b':' || c == b'*');
    Some(Wildcard {
        name: &path[start..=start + len],
        start,
        valid,
    })
}

/// Checks the wildcard syntax of a whole pattern before it touches a tree.
pub(crate) fn check_pattern(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(RouterError::EmptyPath(path.to_string()));
    }

    let bytes = path.as_bytes();
    let mut offset = 0;
    while let Some(wildcard) = find_wildcard(&bytes[offset..]) {
        if !wildcard.valid || wildcard.name.len() < 2 {
            return Err(RouterError::InvalidWildcardName {
                path: path.to_string(),
                wildcard: wildcard.to_lossy_string(),
            });
        }

        let start = offset + wildcard.start;
        let end = start + wildcard.name.len();
        if wildcard.is_catch_all() && (end != bytes.len() || bytes[start - 1] != b'/') {
            return Err(RouterError::MisplacedCatchAll(path.to_string()));
        }
        offset = end;
    }
    Ok(())
}

/// Returns the canonical form of a URL path.
///
/// Repeated slashes collapse into one, `.` elements are dropped and `..`
/// removes the element before it (never climbing above the root). The
/// result always starts with `/` and keeps a trailing slash when the input
/// ended in one (or in a `.` element).
///
/// ```
/// use trellis_router::clean_path;
///
/// assert_eq!(clean_path("abc//def/./../ghi/"), "/abc/ghi/");
/// assert_eq!(clean_path(""), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut elements: Vec<&str> = Vec::new();
    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                elements.pop();
            }
            element => elements.push(element),
        }
    }

    let trailing = path.len() > 1 && (path.ends_with('/') || path.ends_with("/."))
        || path == ".";

    let mut cleaned = String::with_capacity(path.len() + 1);
    for element in &elements {
        cleaned.push('/');
        cleaned.push_str(element);
    }
    if cleaned.is_empty() {
        cleaned.push('/');
    } else if trailing {
        cleaned.push('/');
    }
    cleaned
}

/// Joins a group prefix and a relative pattern.
///
/// A trailing slash survives only when the relative part has one.
pub(crate) fn join_paths(absolute: &str, relative: &str) -> String {
    if relative.is_empty() {
        return absolute.to_string();
    }

    let mut joined = clean_path(&format!("{absolute}/{relative}"));
    if !relative.ends_with('/') && joined.len() > 1 && joined.ends_with('/') {
        joined.pop();
    }
    joined
}

/// Decodes a captured path value the way query strings are decoded: `+`
/// becomes a space and `%XX` escapes are expanded.
///
/// Returns `None` when the value holds a malformed escape or decodes to
/// invalid UTF-8; callers then keep the raw text.
pub(crate) fn unescape(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &c)| {
        c != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }

    let value = value.replace('+', " ");
    percent_decode_str(&value)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}
