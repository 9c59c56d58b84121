//! Data models

pub mod document;

pub use document::{chars_equal, is_word_part, slice_to_cow, Document};
