// error.rs - Structural pattern errors with source locations.
//
// Malformed patterns are reported through these types, never panics. Each
// error carries a byte offset into the pattern text, precise enough for a
// caret-style display (see `PatternError::render`).

use std::fmt;

/// The kinds of structural defect a pattern can have.
///
/// These describe the pattern, not the haystack: a pattern that simply
/// fails to match is a no-match outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// More captures opened than the engine can track (see
    /// [`MAX_CAPTURES`](crate::exec::MAX_CAPTURES)).
    MaxCaptures,
    /// A `)` with no capture left open.
    UnexpectedCaptureClose,
    /// A `(` that was never closed.
    UnclosedCapture,
    /// A backreference to a capture that is out of range, still open, or
    /// position-only.
    InvalidCaptureIndex,
    /// A `%` with nothing after it.
    IncompleteEscape,
    /// A `[` with no terminating `]`.
    UnclosedClass,
    /// A `%b` missing its two delimiter bytes.
    InvalidBalanced,
    /// A `%f` missing or not closing its `[set]`.
    UnclosedFrontier,
}

impl ErrorKind {
    /// Human-readable description of the defect.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::MaxCaptures => "max capture number exceeded",
            ErrorKind::UnexpectedCaptureClose => "unexpected capture close",
            ErrorKind::UnclosedCapture => "capture not closed",
            ErrorKind::InvalidCaptureIndex => "invalid capture index",
            ErrorKind::IncompleteEscape => "incomplete escape",
            ErrorKind::UnclosedClass => "unclosed character class",
            ErrorKind::InvalidBalanced => "invalid balanced pattern (expected %bxy)",
            ErrorKind::UnclosedFrontier => "unclosed frontier pattern (expected %f[set])",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A structural pattern defect plus the byte offset in the pattern text
/// where it was discovered.
///
/// Only the first error found during a match call is reported; later
/// defects (including the same defect rediscovered at retried start
/// offsets) never overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternError {
    /// What is wrong with the pattern.
    pub kind: ErrorKind,
    /// Byte offset into the pattern text.
    pub offset: usize,
}

impl PatternError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        PatternError { kind, offset }
    }

    /// Render the error as a three-line caret display:
    ///
    /// ```text
    /// column:2: capture not closed
    ///   (.
    ///   ^
    /// ```
    ///
    /// `pattern` should be the pattern the error came from; non-UTF-8
    /// bytes are shown lossily.
    pub fn render(&self, pattern: &[u8]) -> String {
        let mut out = String::new();
        out.push_str(&format!("column:{}: {}\n", self.offset, self.kind));
        out.push_str(&String::from_utf8_lossy(pattern));
        out.push('\n');
        for _ in 0..self.offset {
            out.push(' ');
        }
        out.push_str("^\n");
        out
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern offset {}: {}", self.offset, self.kind)
    }
}

impl std::error::Error for PatternError {}
