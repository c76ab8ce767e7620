// prelude.rs - Convenient re-exports for the idiomatic API.
//
//! # Prelude
//!
//! ```
//! use luapat::prelude::*;
//!
//! let caps = luapat::api::find("answer: 42", "%d+").unwrap().unwrap();
//! assert_eq!(caps.whole().as_str(), "42");
//! ```

pub use crate::api::{Captures, CapturesIter, FindIter, Group, Match};
pub use crate::error::{ErrorKind, PatternError};
pub use crate::exec::{MatchState, Status, MAX_CAPTURES};
