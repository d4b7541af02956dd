//! Test utilities for webtools_core
//!
//! Record fixtures shared by the tree tests.

use serde_json::{Value, json};

/// A department-style record with the default field names.
pub fn dept(id: i64, parent_id: i64) -> Value {
    json!({ "id": id, "parentId": parent_id })
}

/// Build records from `(id, parent_id)` pairs (builder for larger fixtures).
pub fn records_with(pairs: &[(i64, i64)]) -> Vec<Value> {
    pairs.iter().map(|&(id, parent)| dept(id, parent)).collect()
}
