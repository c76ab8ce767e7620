//! # Luapat
//!
//! Lua-style pattern matching over byte buffers, with precise pattern
//! diagnostics and SIMD-accelerated unanchored search via
//! [`memchr`](https://crates.io/crates/memchr).
//!
//! Patterns are interpreted in place by a recursive backtracking matcher;
//! there is no compilation step. The engine is binary-safe: haystacks and
//! patterns are byte slices, and embedded zero bytes are ordinary data.
//!
//! Supported syntax: literals, `.`, `%a`-style character classes (with
//! uppercase negation), `[...]` sets with ranges and negation, the
//! repetition operators `*` `+` `-` `?`, the anchors `^` and `$`,
//! captures `(...)` and position captures `()`, backreferences `%1`,
//! balanced matches `%bxy`, and frontier assertions `%f[set]`. There is
//! no alternation and no lookaround, and backtracking can take
//! exponential time on adversarial patterns; callers handling untrusted
//! patterns should impose external limits.
//!
//! ## Quick Start
//!
//! ```rust
//! use luapat::prelude::*;
//!
//! let caps = luapat::api::find("Date: 2026-02-12", "(%d+)-(%d+)-(%d+)")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(caps.whole().as_str(), "2026-02-12");
//! assert_eq!(caps.whole().start(), 6);
//! assert_eq!(caps.get(3).unwrap().as_match().unwrap().as_str(), "12");
//! ```
//!
//! Malformed patterns are reported as structured errors with a byte
//! offset into the pattern, ready for caret-style display:
//!
//! ```rust
//! use luapat::prelude::*;
//!
//! let err = luapat::api::find("  a", "  (.").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::UnclosedCapture);
//! assert_eq!(err.offset, 2);
//! assert_eq!(
//!     err.render(b"  (."),
//!     "column:2: capture not closed\n  (.\n  ^\n"
//! );
//! ```
//!
//! ## Low-Level API
//!
//! The engine core is available directly for callers that want the
//! three-way status and raw capture slots:
//!
//! ```rust
//! use luapat::exec::{MatchState, Status};
//!
//! let mut state = MatchState::new(b"hello world", b"wor");
//! assert_eq!(state.search(0), Status::Match);
//! assert_eq!(state.captures()[0].start, 6);
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | Idiomatic entry points: find, iterate, captures |
//! | [`exec`] | Backtracking matcher core and search driver |
//! | [`class`] | Class predicates and atom span scanning |
//! | [`error`] | Error taxonomy and caret rendering |
//! | [`prelude`] | Convenient re-exports |

pub mod api;
pub mod class;
pub mod error;
pub mod exec;
pub mod prelude;
