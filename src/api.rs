// api.rs - Idiomatic Rust API for luapat.
//
// Wraps the engine core (MatchState, Status) with Rust-native types:
// Match, Captures, Group, CapturesIter, FindIter, and free functions for
// the common entry points.

use std::ffi::CStr;
use std::ops::Range;

use smallvec::SmallVec;

use crate::error::PatternError;
use crate::exec::{Capture, CaptureLen, MatchState, Status, MAX_CAPTURES};

/// Find the first match of `pattern` in `haystack`.
///
/// Returns `Ok(None)` when the pattern is well-formed but matches
/// nowhere, and `Err` when the pattern itself is malformed.
///
/// # Examples
///
/// ```
/// let caps = luapat::api::find("Date: 2026-02-12", "(%d+)-(%d+)-(%d+)")
///     .unwrap()
///     .unwrap();
/// assert_eq!(caps.whole().as_str(), "2026-02-12");
/// assert_eq!(caps.get(1).unwrap().as_match().unwrap().as_str(), "2026");
/// ```
pub fn find<'h>(haystack: &'h str, pattern: &str) -> Result<Option<Captures<'h>>, PatternError> {
    find_bytes(haystack.as_bytes(), pattern.as_bytes())
}

/// Like [`find`], starting the search at byte offset `start`. A negative
/// `start` counts from the end of the haystack.
pub fn find_at<'h>(
    haystack: &'h str,
    pattern: &str,
    start: isize,
) -> Result<Option<Captures<'h>>, PatternError> {
    find_bytes_at(haystack.as_bytes(), pattern.as_bytes(), start)
}

/// Find the first match of `pattern` in a byte haystack. Both sides may
/// contain arbitrary bytes, including zeros.
pub fn find_bytes<'h>(
    haystack: &'h [u8],
    pattern: &[u8],
) -> Result<Option<Captures<'h>>, PatternError> {
    find_bytes_at(haystack, pattern, 0)
}

/// Like [`find_bytes`], starting the search at byte offset `start`.
pub fn find_bytes_at<'h>(
    haystack: &'h [u8],
    pattern: &[u8],
    start: isize,
) -> Result<Option<Captures<'h>>, PatternError> {
    let mut state = MatchState::new(haystack, pattern);
    let status = state.search(start);
    if let Some(err) = state.error() {
        return Err(err);
    }
    match status {
        Status::Match => Ok(Captures::from_state(haystack, &state)),
        _ => Ok(None),
    }
}

/// NUL-terminated convenience entry point: the haystack ends at its
/// terminator, so embedded zero bytes cannot be searched through this
/// (use [`find_bytes`] with an explicit length instead).
pub fn find_cstr<'h>(
    haystack: &'h CStr,
    pattern: &str,
) -> Result<Option<Captures<'h>>, PatternError> {
    find_bytes(haystack.to_bytes(), pattern.as_bytes())
}

/// Like [`find_cstr`], starting the search at byte offset `start`.
pub fn find_cstr_at<'h>(
    haystack: &'h CStr,
    pattern: &str,
    start: isize,
) -> Result<Option<Captures<'h>>, PatternError> {
    find_bytes_at(haystack.to_bytes(), pattern.as_bytes(), start)
}

/// Check whether `pattern` matches anywhere in `haystack`.
pub fn is_match(haystack: &str, pattern: &str) -> Result<bool, PatternError> {
    is_match_bytes(haystack.as_bytes(), pattern.as_bytes())
}

/// Check whether `pattern` matches anywhere in a byte haystack.
pub fn is_match_bytes(haystack: &[u8], pattern: &[u8]) -> Result<bool, PatternError> {
    let mut state = MatchState::new(haystack, pattern);
    let status = state.search(0);
    if let Some(err) = state.error() {
        return Err(err);
    }
    Ok(status == Status::Match)
}

/// Iterate over all non-overlapping matches in `haystack`.
///
/// # Examples
///
/// ```
/// let words: Vec<&str> = luapat::api::find_iter("one two three", "%a+")
///     .map(|caps| caps.unwrap().whole().as_str())
///     .collect();
/// assert_eq!(words, vec!["one", "two", "three"]);
/// ```
pub fn find_iter<'h, 'p>(haystack: &'h str, pattern: &'p str) -> FindIter<'h, 'p> {
    find_iter_bytes(haystack.as_bytes(), pattern.as_bytes())
}

/// Iterate over all non-overlapping matches in a byte haystack.
pub fn find_iter_bytes<'h, 'p>(haystack: &'h [u8], pattern: &'p [u8]) -> FindIter<'h, 'p> {
    FindIter {
        haystack,
        pattern,
        last_end: 0,
        last_was_empty: false,
        done: false,
    }
}

// === Match ===

/// A matched byte range referencing the original haystack.
#[derive(Debug, Clone, Copy)]
pub struct Match<'h> {
    text: &'h [u8],
    start: usize,
    end: usize,
}

impl<'h> Match<'h> {
    /// Byte offset of the start of the match.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the end of the match (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range of the match.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched text as a byte slice.
    pub fn as_bytes(&self) -> &'h [u8] {
        &self.text[self.start..self.end]
    }

    /// The matched text as a `&str`.
    ///
    /// # Panics
    ///
    /// Panics if the matched bytes are not valid UTF-8.
    pub fn as_str(&self) -> &'h str {
        std::str::from_utf8(self.as_bytes()).expect("match is not valid UTF-8")
    }

    /// Returns the length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the match is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// === Group ===

/// One capture group of a match: either a byte span or, for the `()`
/// idiom, a zero-width position marker.
#[derive(Debug, Clone, Copy)]
pub enum Group<'h> {
    /// A captured byte range.
    Span(Match<'h>),
    /// A position capture; carries only the byte offset it recorded.
    Position(usize),
}

impl<'h> Group<'h> {
    /// Returns `true` for a `()` position capture.
    pub fn is_position(&self) -> bool {
        matches!(self, Group::Position(_))
    }

    /// Byte offset where the group starts (for position captures, the
    /// recorded position itself).
    pub fn offset(&self) -> usize {
        match self {
            Group::Span(m) => m.start(),
            Group::Position(pos) => *pos,
        }
    }

    /// The captured span, or `None` for a position capture.
    pub fn as_match(&self) -> Option<Match<'h>> {
        match self {
            Group::Span(m) => Some(*m),
            Group::Position(_) => None,
        }
    }
}

// === Captures ===

/// All capture groups from a single match.
///
/// Group 0 is the entire match. Groups 1..N correspond to `(...)` in the
/// pattern, numbered by the position of their opening parenthesis.
pub struct Captures<'h> {
    text: &'h [u8],
    whole: Range<usize>,
    slots: SmallVec<[Capture; MAX_CAPTURES]>,
}

impl<'h> Captures<'h> {
    fn from_state(text: &'h [u8], state: &MatchState<'_, '_>) -> Option<Self> {
        let slots: SmallVec<[Capture; MAX_CAPTURES]> = SmallVec::from_slice(state.captures());
        let first = slots.first()?;
        let whole = match first.len {
            CaptureLen::Closed(len) => first.start..first.start + len,
            _ => return None,
        };
        Some(Captures { text, whole, slots })
    }

    /// The entire match (group 0).
    pub fn whole(&self) -> Match<'h> {
        Match {
            text: self.text,
            start: self.whole.start,
            end: self.whole.end,
        }
    }

    /// Get capture group `i`, or `None` if there is no such group.
    /// Group 0 is the entire match.
    pub fn get(&self, i: usize) -> Option<Group<'h>> {
        let cap = self.slots.get(i)?;
        match cap.len {
            CaptureLen::Closed(len) => Some(Group::Span(Match {
                text: self.text,
                start: cap.start,
                end: cap.start + len,
            })),
            CaptureLen::Position => Some(Group::Position(cap.start)),
            CaptureLen::Unfinished => None,
        }
    }

    /// Number of capture groups (including group 0).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no capture groups (never the case for
    /// a value produced by a successful match).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over all capture groups, group 0 first.
    pub fn iter(&self) -> CapturesIter<'_, 'h> {
        CapturesIter {
            captures: self,
            index: 0,
        }
    }
}

impl std::fmt::Debug for Captures<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for i in 0..self.len() {
            list.entry(&self.get(i));
        }
        list.finish()
    }
}

// === CapturesIter ===

/// Iterator over capture groups in a [`Captures`].
pub struct CapturesIter<'c, 'h> {
    captures: &'c Captures<'h>,
    index: usize,
}

impl<'c, 'h> Iterator for CapturesIter<'c, 'h> {
    type Item = Group<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.captures.get(self.index)?;
        self.index += 1;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.captures.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CapturesIter<'_, '_> {}

// === FindIter ===

/// Iterator over all non-overlapping matches in a haystack.
///
/// Yields `Err` once and then stops if the pattern is malformed. Empty
/// matches advance the scan by one byte so iteration always makes
/// progress.
pub struct FindIter<'h, 'p> {
    haystack: &'h [u8],
    pattern: &'p [u8],
    last_end: usize,
    last_was_empty: bool,
    done: bool,
}

impl<'h, 'p> Iterator for FindIter<'h, 'p> {
    type Item = Result<Captures<'h>, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.last_end > self.haystack.len() {
            return None;
        }

        let caps = match find_bytes_at(self.haystack, self.pattern, self.last_end as isize) {
            Ok(Some(caps)) => caps,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };

        let m = caps.whole();
        if m.is_empty() {
            if self.last_was_empty {
                if self.last_end >= self.haystack.len() {
                    self.done = true;
                    return None;
                }
                // Skip one byte to avoid looping on the same empty match.
                self.last_end += 1;
                self.last_was_empty = false;
                return self.next();
            }
            self.last_was_empty = true;
        } else {
            self.last_was_empty = false;
        }

        self.last_end = m.end();
        Some(Ok(caps))
    }
}
