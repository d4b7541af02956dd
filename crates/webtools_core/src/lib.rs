//! # `webtools_core`
//!
//! This is the `webtools_core` library!
//! It contains the stateless helpers shared by the webtools front-end.
//!
//! The helpers are used from two places right now:
//! 1. Rust callers, directly
//! 2. Web (via `webtools_wasm`)
//!
//! The centerpiece is [`tree::handle_tree`], which nests flat parent-linked
//! records (menus, departments, categories) into the tree a UI component
//! renders. Around it sit date formatting, "time ago" text, deep cloning,
//! masking, distance, and data URL helpers.

#![warn(missing_docs)]

/// Deep clone docs
pub mod clone;

/// Date docs
pub mod date;

/// Error docs
pub mod error;

/// Tree docs
pub mod tree;

/// Utility docs
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use clone::{Datum, deep_clone};
pub use date::{TimeInput, TimestampPrecision, get_timestamp, parse_time, time_ago, time_ago_now};
pub use error::{Result, ToolsError};
pub use tree::{TreeOptions, handle_tree};
