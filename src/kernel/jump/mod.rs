//! Jump search: query scanning, tag assignment and caret placement.

pub mod boundaries;
pub mod jumper;
pub mod layout;
pub mod pattern;
pub mod processor;
pub mod query;
pub mod scanner;
pub mod solver;
pub mod tag_map;
pub mod tagger;

pub use boundaries::{Boundaries, Intersection, StandardBoundaries};
pub use jumper::{JumpMode, JumpModeTracker, Motion};
pub use layout::{KeyLayout, TagAlphabet};
pub use pattern::Pattern;
pub use processor::SearchProcessor;
pub use query::SearchQuery;
pub use scanner::find_matching_sites;
pub use tag_map::{Tag, TagMap};
pub use tagger::{Tagger, TaggingResult};
