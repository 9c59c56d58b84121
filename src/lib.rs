//! tagjump - tag-based caret navigation over a text document.
//!
//! Module layout:
//! - models: the document view a session searches (rope, caret, viewport, folds)
//! - kernel: search, tag assignment, jumping and the session that drives them

pub mod kernel;
pub mod models;

pub use kernel::{JumpError, Result};
