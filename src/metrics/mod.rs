//! Metrics calculation module
//!
//! Line classification for snippets of any language.

pub mod loc_counter;

pub use loc_counter::{comment_percentage, LocCounter};
