//! Headless presentation adapters
//!
//! Each adapter turns snapshots into output. None of them hold simulation logic.

mod json;
mod text;

pub use json::JsonLinesAdapter;
pub use text::TextAdapter;
