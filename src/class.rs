// class.rs - Pattern atoms: class predicates and atom span scanning.
//
// The two stateless leaves of the engine. `match_class`/`match_bracket`/
// `match_atom` decide whether a single haystack byte satisfies a pattern
// atom; `atom_end` finds where an atom's syntax ends in the pattern text.
// Everything here is byte-oriented and binary-safe.

use crate::error::{ErrorKind, PatternError};

/// The pattern escape byte, `%`.
pub const ESCAPE: u8 = b'%';

/// `isspace` over bytes: space, `\t`, `\n`, `\v`, `\f`, `\r`.
///
/// `u8::is_ascii_whitespace` omits vertical tab, so spell the set out.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Does `b` satisfy the class named by `cls`?
///
/// Lowercase letters name a class, uppercase letters its negation, and any
/// other byte only matches itself (so `%%` matches a literal `%`).
pub fn match_class(b: u8, cls: u8) -> bool {
    let res = match cls.to_ascii_lowercase() {
        b'a' => b.is_ascii_alphabetic(),
        b'c' => b.is_ascii_control(),
        b'd' => b.is_ascii_digit(),
        b'g' => b.is_ascii_graphic(),
        b'l' => b.is_ascii_lowercase(),
        b'p' => b.is_ascii_punctuation(),
        b's' => is_space(b),
        b'u' => b.is_ascii_uppercase(),
        b'w' => b.is_ascii_alphanumeric(),
        b'x' => b.is_ascii_hexdigit(),
        b'z' => b == 0,
        _ => return b == cls,
    };
    if cls.is_ascii_uppercase() {
        !res
    } else {
        res
    }
}

/// Does `b` belong to the bracket set `pat[start..=end]`?
///
/// `start` indexes the `[`, `end` the terminating `]` (both verified by the
/// caller via `atom_end` or the frontier scanner). Members are literal
/// bytes, `%`-escaped classes, and `a-b` ranges; a range needs at least one
/// more member byte before the `]`, so a trailing `-` stays literal.
pub fn match_bracket(b: u8, pat: &[u8], start: usize, end: usize) -> bool {
    let mut hit = true;
    let mut p = start;
    if pat[p + 1] == b'^' {
        hit = false;
        p += 1;
    }
    loop {
        p += 1;
        if p >= end {
            return !hit;
        }
        if pat[p] == ESCAPE {
            p += 1;
            if match_class(b, pat[p]) {
                return hit;
            }
        } else if pat[p + 1] == b'-' && p + 2 < end {
            p += 2;
            if pat[p - 2] <= b && b <= pat[p] {
                return hit;
            }
        } else if pat[p] == b {
            return hit;
        }
    }
}

/// Does `b` satisfy the atom starting at `pat[p]`?
///
/// `ep` is the atom's span end as computed by `atom_end`; bracket atoms use
/// it to locate their terminating `]`.
pub fn match_atom(b: u8, pat: &[u8], p: usize, ep: usize) -> bool {
    match pat[p] {
        b'.' => true,
        ESCAPE => match_class(b, pat[p + 1]),
        b'[' => match_bracket(b, pat, p, ep - 1),
        _ => pat[p] == b,
    }
}

/// Scan past the atom starting at `pat[p]`, returning the position of the
/// byte that follows it (a repetition operator, or the next atom).
///
/// A lone `%` at the end of the pattern is an incomplete escape, reported
/// at the `%`. An unterminated bracket set is reported at the `[`; the scan
/// steps over escape pairs and treats the first member byte as literal even
/// when it is `]`, so `[]]` is the one-member set containing `]`.
pub fn atom_end(pat: &[u8], p: usize) -> Result<usize, PatternError> {
    let mut p = p;
    let c = pat[p];
    p += 1;
    match c {
        ESCAPE => {
            if p >= pat.len() {
                return Err(PatternError::new(ErrorKind::IncompleteEscape, p - 1));
            }
            Ok(p + 1)
        }
        b'[' => {
            let start = p - 1;
            if pat.get(p) == Some(&b'^') {
                p += 1;
            }
            loop {
                if p >= pat.len() {
                    return Err(PatternError::new(ErrorKind::UnclosedClass, start));
                }
                let c = pat[p];
                p += 1;
                if c == ESCAPE && p < pat.len() {
                    p += 1;
                }
                if pat.get(p) == Some(&b']') {
                    return Ok(p + 1);
                }
            }
        }
        _ => Ok(p),
    }
}
