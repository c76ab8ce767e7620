// exec.rs - The backtracking matcher: match state, recursive descent,
// search driver.
//
// One `MatchState` exists per top-level call. The descent walks
// (haystack position, pattern position) in lock-step; every construct
// recurses back into `do_match` for the rest of the pattern, so the
// whole interpreter is a single continuation-passing recursion. Captures
// live in a bounded inline stack and are rolled back when the branch
// that touched them fails; structural pattern errors latch into the
// state (first one wins) and abort all backtracking.

use smallvec::SmallVec;

use crate::class::{self, ESCAPE};
use crate::error::{ErrorKind, PatternError};

/// Maximum number of capture slots, including the implicit whole-match
/// slot 0. Opening a capture beyond this reports
/// [`ErrorKind::MaxCaptures`] instead of growing storage.
pub const MAX_CAPTURES: usize = 31;

/// Outcome of a [`MatchState::search`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The pattern matched; captures are available on the state.
    Match,
    /// The pattern is well-formed but matched nowhere.
    NoMatch,
    /// The pattern is malformed; the error is available on the state.
    Error,
}

/// The length component of a capture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureLen {
    /// Opened by `(` but not yet closed. Outside a successful descent
    /// this is the sentinel for "not meaningful yet" (slot 0 carries it
    /// until the driver finishes).
    Unfinished,
    /// A zero-width `()` position marker; only `start` is meaningful.
    Position,
    /// Both bounds known.
    Closed(usize),
}

/// One capture slot: a start offset into the haystack plus the tri-state
/// length. Slot 0 is the whole match, written by the search driver.
#[derive(Debug, Clone, Copy)]
pub struct Capture {
    /// Byte offset into the haystack where the capture begins.
    pub start: usize,
    /// State and, when closed, length of the capture.
    pub len: CaptureLen,
}

/// Per-call match context: borrowed haystack and pattern, the capture
/// stack, and the latched error.
///
/// A state is cheap to build and holds no heap resources; `search` fully
/// resets it, so one state can be reused across calls on the same
/// buffers. It is not meant for concurrent mutation, but independent
/// states are independent.
pub struct MatchState<'h, 'p> {
    data: &'h [u8],
    pattern: &'p [u8],
    captures: SmallVec<[Capture; MAX_CAPTURES]>,
    error: Option<PatternError>,
}

impl<'h, 'p> MatchState<'h, 'p> {
    /// Create a state over `haystack` and `pattern`. Nothing is matched
    /// until [`search`](Self::search) runs.
    pub fn new(haystack: &'h [u8], pattern: &'p [u8]) -> Self {
        MatchState {
            data: haystack,
            pattern,
            captures: SmallVec::new(),
            error: None,
        }
    }

    /// The capture slots of the last attempt. Meaningful after `search`
    /// returned [`Status::Match`]; slot 0 is the whole match.
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// The latched error, if `search` returned [`Status::Error`].
    pub fn error(&self) -> Option<PatternError> {
        self.error
    }

    /// The pattern this state matches against (for diagnostics rendering).
    pub fn pattern(&self) -> &'p [u8] {
        self.pattern
    }

    /// Search for the pattern starting at byte offset `init`.
    ///
    /// A negative `init` counts from the end of the haystack. An
    /// effective offset outside `0..=haystack.len()` is a caller bug and
    /// panics.
    ///
    /// A pattern starting with `^` is tried exactly once at `init`;
    /// otherwise every start offset from `init` through the end of the
    /// haystack is tried in turn. Each attempt gets a fresh capture
    /// stack, but an error latched by any attempt ends the search
    /// immediately.
    pub fn search(&mut self, init: isize) -> Status {
        let len = self.data.len();
        let start = if init < 0 { init + len as isize } else { init };
        assert!(
            start >= 0 && start as usize <= len,
            "start offset out of bounds"
        );
        let mut s = start as usize;
        self.error = None;

        let (anchored, p0) = if self.pattern.first() == Some(&b'^') {
            (true, 1)
        } else {
            (false, 0)
        };
        let first = if anchored {
            None
        } else {
            literal_first_byte(self.pattern)
        };

        loop {
            // A match can only begin on the mandatory first literal, so
            // jump between its occurrences instead of retrying every
            // offset. Skipped offsets can neither match nor error.
            if let Some(b) = first {
                match memchr::memchr(b, &self.data[s..]) {
                    Some(off) => s += off,
                    None => {
                        self.reset_attempt(len);
                        return Status::NoMatch;
                    }
                }
            }
            self.reset_attempt(s);
            let res = self.do_match(s, p0);
            self.check_unclosed();
            if self.error.is_some() {
                return Status::Error;
            }
            if let Some(end) = res {
                self.captures[0] = Capture {
                    start: s,
                    len: CaptureLen::Closed(end - s),
                };
                return Status::Match;
            }
            if anchored || s >= len {
                return Status::NoMatch;
            }
            s += 1;
        }
    }

    fn reset_attempt(&mut self, s: usize) {
        self.captures.clear();
        self.captures.push(Capture {
            start: s,
            len: CaptureLen::Unfinished,
        });
    }

    fn set_error(&mut self, kind: ErrorKind, offset: usize) {
        if self.error.is_none() {
            self.error = Some(PatternError::new(kind, offset));
        }
    }

    fn latch(&mut self, err: PatternError) {
        self.set_error(err.kind, err.offset);
    }

    /// Match the pattern from `p` against the haystack from `s`,
    /// returning the haystack position just past the match.
    fn do_match(&mut self, s: usize, p: usize) -> Option<usize> {
        if p == self.pattern.len() {
            return Some(s);
        }
        match self.pattern[p] {
            b'(' => self.start_capture(s, p),
            b')' => self.end_capture(s, p),
            // `$` anchors only as the final pattern byte; elsewhere it is
            // an ordinary literal.
            b'$' if p + 1 == self.pattern.len() => {
                if s == self.data.len() {
                    Some(s)
                } else {
                    None
                }
            }
            ESCAPE => match self.pattern.get(p + 1) {
                Some(c) if c.is_ascii_digit() => self.match_backref(s, p),
                Some(&b'b') => self.match_balanced(s, p),
                Some(&b'f') => self.match_frontier(s, p),
                _ => self.match_default(s, p),
            },
            _ => self.match_default(s, p),
        }
    }

    /// One atom plus its optional repetition operator.
    fn match_default(&mut self, s: usize, p: usize) -> Option<usize> {
        let ep = match class::atom_end(self.pattern, p) {
            Ok(ep) => ep,
            Err(err) => {
                self.latch(err);
                return None;
            }
        };
        let matched = self.single_match(s, p, ep);
        match self.pattern.get(ep).copied() {
            Some(b'?') => {
                // Prefer consuming the atom; fall back to absent only if
                // the consuming continuation failed without erroring.
                if matched {
                    if let Some(res) = self.do_match(s + 1, ep + 1) {
                        return Some(res);
                    }
                    if self.error.is_some() {
                        return None;
                    }
                }
                self.do_match(s, ep + 1)
            }
            Some(b'+') => {
                if matched {
                    self.max_expand(s + 1, p, ep)
                } else {
                    None
                }
            }
            Some(b'*') => self.max_expand(s, p, ep),
            Some(b'-') => self.min_expand(s, p, ep),
            _ => {
                if matched {
                    self.do_match(s + 1, ep)
                } else {
                    None
                }
            }
        }
    }

    /// Does the haystack byte at `s` satisfy the atom at `p..ep`?
    fn single_match(&self, s: usize, p: usize, ep: usize) -> bool {
        match self.data.get(s) {
            Some(&b) => class::match_atom(b, self.pattern, p, ep),
            None => false,
        }
    }

    /// Greedy `*`/`+` body: consume the maximal run, then hand shorter
    /// and shorter runs to the continuation until one succeeds.
    fn max_expand(&mut self, s: usize, p: usize, ep: usize) -> Option<usize> {
        let mut i = 0;
        while self.single_match(s + i, p, ep) {
            i += 1;
        }
        loop {
            if let Some(res) = self.do_match(s + i, ep + 1) {
                return Some(res);
            }
            if self.error.is_some() {
                return None;
            }
            if i == 0 {
                return None;
            }
            i -= 1;
        }
    }

    /// Lazy `-` body: try the continuation before consuming each
    /// additional atom.
    fn min_expand(&mut self, s: usize, p: usize, ep: usize) -> Option<usize> {
        let mut s = s;
        loop {
            if let Some(res) = self.do_match(s, ep + 1) {
                return Some(res);
            }
            if self.error.is_some() {
                return None;
            }
            if self.single_match(s, p, ep) {
                s += 1;
            } else {
                return None;
            }
        }
    }

    /// `(`: push an open capture (or a finalized position capture for
    /// `()`), recurse, and pop it again if the branch fails.
    fn start_capture(&mut self, s: usize, p: usize) -> Option<usize> {
        if self.captures.len() >= MAX_CAPTURES {
            self.set_error(ErrorKind::MaxCaptures, p);
            return None;
        }
        let (len, cont) = if self.pattern.get(p + 1) == Some(&b')') {
            (CaptureLen::Position, p + 2)
        } else {
            (CaptureLen::Unfinished, p + 1)
        };
        self.captures.push(Capture { start: s, len });
        let res = self.do_match(s, cont);
        if res.is_none() {
            self.captures.pop();
        }
        res
    }

    /// `)`: close the innermost open capture, recurse, and reopen it if
    /// the branch fails so an enclosing retry sees a consistent stack.
    fn end_capture(&mut self, s: usize, p: usize) -> Option<usize> {
        let Some(i) = self.innermost_open() else {
            self.set_error(ErrorKind::UnexpectedCaptureClose, p);
            return None;
        };
        self.captures[i].len = CaptureLen::Closed(s - self.captures[i].start);
        let res = self.do_match(s, p + 1);
        if res.is_none() {
            self.captures[i].len = CaptureLen::Unfinished;
        }
        res
    }

    fn innermost_open(&self) -> Option<usize> {
        (1..self.captures.len())
            .rev()
            .find(|&i| self.captures[i].len == CaptureLen::Unfinished)
    }

    /// `%N`: the haystack must repeat capture `N`'s bytes exactly.
    fn match_backref(&mut self, s: usize, p: usize) -> Option<usize> {
        let mut dp = p + 1;
        let mut idx = 0usize;
        while dp < self.pattern.len() && self.pattern[dp].is_ascii_digit() {
            idx = idx
                .saturating_mul(10)
                .saturating_add((self.pattern[dp] - b'0') as usize);
            dp += 1;
        }
        let cap = match self.captures.get(idx) {
            Some(&cap) => cap,
            None => {
                self.set_error(ErrorKind::InvalidCaptureIndex, p + 1);
                return None;
            }
        };
        let len = match cap.len {
            CaptureLen::Closed(len) => len,
            _ => {
                self.set_error(ErrorKind::InvalidCaptureIndex, p + 1);
                return None;
            }
        };
        if self.data.len() - s < len
            || self.data[s..s + len] != self.data[cap.start..cap.start + len]
        {
            return None;
        }
        self.do_match(s + len, dp)
    }

    /// `%bxy`: a balanced run of `x`..`y`, nesting tracked by depth.
    fn match_balanced(&mut self, s: usize, p: usize) -> Option<usize> {
        if p + 3 >= self.pattern.len() {
            self.set_error(ErrorKind::InvalidBalanced, p);
            return None;
        }
        let open = self.pattern[p + 2];
        let close = self.pattern[p + 3];
        if self.data.get(s) != Some(&open) {
            return None;
        }
        let mut depth = 1usize;
        let mut i = s + 1;
        while i < self.data.len() {
            if self.data[i] == open {
                depth += 1;
            } else if self.data[i] == close {
                depth -= 1;
                if depth == 0 {
                    return self.do_match(i + 1, p + 4);
                }
            }
            i += 1;
        }
        None
    }

    /// `%f[set]`: zero-width frontier between a byte outside the set and
    /// a byte inside it. Positions before the haystack and past its end
    /// read as the zero byte.
    fn match_frontier(&mut self, s: usize, p: usize) -> Option<usize> {
        let pat = self.pattern;
        if p + 2 >= pat.len() || pat[p + 2] != b'[' {
            self.set_error(ErrorKind::UnclosedFrontier, p);
            return None;
        }
        let set_start = p + 2;
        let mut set_end = set_start + 1;
        while set_end < pat.len() && pat[set_end] != b']' {
            if pat[set_end] == ESCAPE && set_end + 1 < pat.len() {
                set_end += 2;
            } else {
                set_end += 1;
            }
        }
        if set_end >= pat.len() {
            self.set_error(ErrorKind::UnclosedFrontier, p);
            return None;
        }

        let prev = if s > 0 { self.data[s - 1] } else { 0 };
        let curr = self.data.get(s).copied().unwrap_or(0);
        if !class::match_bracket(prev, pat, set_start, set_end)
            && class::match_bracket(curr, pat, set_start, set_end)
        {
            self.do_match(s, set_end + 1)
        } else {
            None
        }
    }

    /// After every attempt: a capture still open is a pattern defect.
    /// Its position is found by counting unescaped `(` in the pattern
    /// text up to the offending ordinal.
    fn check_unclosed(&mut self) {
        for i in 1..self.captures.len() {
            if self.captures[i].len == CaptureLen::Unfinished {
                let offset = self.unclosed_offset(i);
                self.set_error(ErrorKind::UnclosedCapture, offset);
                return;
            }
        }
    }

    fn unclosed_offset(&self, ordinal: usize) -> usize {
        let pat = self.pattern;
        let mut seen = 0;
        let mut p = 0;
        while p < pat.len() {
            if pat[p] == ESCAPE {
                p += 2;
                continue;
            }
            if pat[p] == b'(' {
                seen += 1;
                if seen == ordinal {
                    return p;
                }
            }
            p += 1;
        }
        pat.len()
    }
}

/// The byte every match must start with, when the pattern pins one down:
/// a plain literal first atom whose operator (none, or `+`) requires at
/// least one occurrence. `*`, `-` and `?` can match the atom zero times,
/// so they pin nothing.
fn literal_first_byte(pat: &[u8]) -> Option<u8> {
    let &b = pat.first()?;
    if matches!(
        b,
        b'^' | b'$' | b'*' | b'+' | b'?' | b'-' | b'.' | b'(' | b')' | b'[' | b']' | ESCAPE
    ) {
        return None;
    }
    match pat.get(1) {
        Some(&b'*') | Some(&b'-') | Some(&b'?') => None,
        _ => Some(b),
    }
}
