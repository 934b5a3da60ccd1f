//! Catalog search.
//!
//! - [`filter`]: pure query filtering and match highlighting

pub mod filter;

pub use filter::{filter, filter_with, highlight_ranges, MatchMode};
