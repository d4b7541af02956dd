//! Flat-to-tree conversion for parent-linked records.
//!
//! Records carry an identifier and a parent reference. [`build_forest`] groups
//! every record under the records whose identifier equals its parent
//! reference and returns the nodes whose parent reference equals the root
//! marker. It is generic over the record type through [`TreeKeys`], so typed
//! structs and JSON objects go through the same grouping rule.
//!
//! [`handle_tree`] is the JSON front door used by the browser bindings:
//!
//! ```
//! use serde_json::json;
//! use webtools_core::tree::{TreeOptions, handle_tree};
//!
//! let records = vec![
//!     json!({"id": 1, "parentId": 0}),
//!     json!({"id": 2, "parentId": 1}),
//! ];
//! let tree = handle_tree(&records, &TreeOptions::default());
//! assert_eq!(
//!     tree,
//!     vec![json!({"id": 1, "parentId": 0, "children": [{"id": 2, "parentId": 1}]})]
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use ts_rs::TS;

/// Default name of the identifier field.
pub const DEFAULT_ID_FIELD: &str = "id";
/// Default name of the parent-reference field.
pub const DEFAULT_PARENT_ID_FIELD: &str = "parentId";
/// Default name under which nested children are attached.
pub const DEFAULT_CHILDREN_FIELD: &str = "children";

// ============================================================================
// Key extraction
// ============================================================================

/// Extracts the identifier and parent reference of a record.
///
/// A `None` key never matches anything, so records missing either field are
/// neither parents nor children.
pub trait TreeKeys<R> {
    /// Comparable key type shared by identifiers and parent references.
    type Key: PartialEq;

    /// The record's own identifier.
    fn id(&self, record: &R) -> Option<Self::Key>;

    /// The identifier of the record's parent, or the root marker.
    fn parent_id(&self, record: &R) -> Option<Self::Key>;
}

/// Closure-backed [`TreeKeys`] for typed records.
///
/// ```
/// use webtools_core::tree::{FnKeys, build_forest};
///
/// #[derive(Clone)]
/// struct Dept { id: u32, parent: u32 }
///
/// let depts = vec![Dept { id: 1, parent: 0 }, Dept { id: 2, parent: 1 }];
/// let keys = FnKeys::new(|d: &Dept| Some(d.id), |d: &Dept| Some(d.parent));
/// let forest = build_forest(&depts, &keys, &0);
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].children[0].record.id, 2);
/// ```
pub struct FnKeys<I, P> {
    id: I,
    parent_id: P,
}

impl<I, P> FnKeys<I, P> {
    /// Pair an identifier getter with a parent-reference getter.
    pub fn new(id: I, parent_id: P) -> Self {
        Self { id, parent_id }
    }
}

impl<R, K, I, P> TreeKeys<R> for FnKeys<I, P>
where
    K: PartialEq,
    I: Fn(&R) -> Option<K>,
    P: Fn(&R) -> Option<K>,
{
    type Key = K;

    fn id(&self, record: &R) -> Option<K> {
        (self.id)(record)
    }

    fn parent_id(&self, record: &R) -> Option<K> {
        (self.parent_id)(record)
    }
}

/// A JSON value used as a tree key.
///
/// Numbers compare by numeric value (`1 == 1.0`); everything else compares
/// structurally.
#[derive(Debug, Clone)]
pub struct JsonKey(pub Value);

impl PartialEq for JsonKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (a, b) => a == b,
        }
    }
}

impl From<Value> for JsonKey {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// [`TreeKeys`] over JSON objects with configurable field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFieldKeys {
    id_field: String,
    parent_id_field: String,
}

impl JsonFieldKeys {
    /// Create keys for the given field names. Empty names fall back to the defaults.
    pub fn new(id_field: &str, parent_id_field: &str) -> Self {
        Self {
            id_field: or_default(id_field, DEFAULT_ID_FIELD),
            parent_id_field: or_default(parent_id_field, DEFAULT_PARENT_ID_FIELD),
        }
    }
}

impl Default for JsonFieldKeys {
    fn default() -> Self {
        Self::new(DEFAULT_ID_FIELD, DEFAULT_PARENT_ID_FIELD)
    }
}

impl TreeKeys<Value> for JsonFieldKeys {
    type Key = JsonKey;

    fn id(&self, record: &Value) -> Option<JsonKey> {
        record.get(&self.id_field).cloned().map(JsonKey)
    }

    fn parent_id(&self, record: &Value) -> Option<JsonKey> {
        record.get(&self.parent_id_field).cloned().map(JsonKey)
    }
}

fn or_default(name: &str, default: &str) -> String {
    if name.is_empty() {
        default.to_string()
    } else {
        name.to_string()
    }
}

// ============================================================================
// Generic forest construction
// ============================================================================

/// A record with its nested children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<R> {
    /// Copy of the input record.
    pub record: R,
    /// Immediate children, in input order.
    pub children: Vec<TreeNode<R>>,
}

impl<R> TreeNode<R> {
    /// A node without children.
    pub fn leaf(record: R) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Records of this subtree in depth-first pre-order.
    pub fn flatten(&self) -> Vec<&R> {
        let mut out = Vec::with_capacity(self.size());
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a R>) {
        out.push(&self.record);
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

/// Group `records` into a forest rooted at the records whose parent reference
/// equals `root`.
///
/// Records are copied, never borrowed into the result. Children keep input
/// order. When a parent-reference cycle would nest a record inside itself, that
/// occurrence is emitted as a leaf so the result stays finite.
pub fn build_forest<R, K>(records: &[R], keys: &K, root: &K::Key) -> Vec<TreeNode<R>>
where
    R: Clone,
    K: TreeKeys<R>,
{
    let ids: Vec<Option<K::Key>> = records.iter().map(|r| keys.id(r)).collect();
    let parents: Vec<Option<K::Key>> = records.iter().map(|r| keys.parent_id(r)).collect();

    // One left-to-right filter pass per father.
    let children: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| match id {
            Some(id) => parents
                .iter()
                .enumerate()
                .filter(|(_, parent)| parent.as_ref() == Some(id))
                .map(|(index, _)| index)
                .collect(),
            None => Vec::new(),
        })
        .collect();

    let mut ancestors = Vec::new();
    parents
        .iter()
        .enumerate()
        .filter(|(_, parent)| parent.as_ref() == Some(root))
        .map(|(index, _)| materialize(index, records, &children, &mut ancestors))
        .collect()
}

fn materialize<R: Clone>(
    index: usize,
    records: &[R],
    children: &[Vec<usize>],
    ancestors: &mut Vec<usize>,
) -> TreeNode<R> {
    let record = records[index].clone();
    if ancestors.contains(&index) {
        log::trace!("Parent-reference cycle at record #{index}, emitting as leaf");
        return TreeNode::leaf(record);
    }

    ancestors.push(index);
    let nested = children[index]
        .iter()
        .map(|&child| materialize(child, records, children, ancestors))
        .collect();
    ancestors.pop();

    TreeNode {
        record,
        children: nested,
    }
}

// ============================================================================
// JSON records
// ============================================================================

/// Field names and root marker for [`handle_tree`].
///
/// Deserializes from the camelCase option objects the front-end passes
/// (`{ idField, parentIdField, childrenField, rootValue }`); every key is
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct TreeOptions {
    /// Identifier field (default `"id"`).
    pub id_field: String,
    /// Parent-reference field (default `"parentId"`).
    pub parent_id_field: String,
    /// Field receiving nested children (default `"children"`).
    pub children_field: String,
    /// Parent-reference value of top-level records. Computed from the input
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_value: Option<Value>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            parent_id_field: DEFAULT_PARENT_ID_FIELD.to_string(),
            children_field: DEFAULT_CHILDREN_FIELD.to_string(),
            root_value: None,
        }
    }
}

impl TreeOptions {
    /// Set the identifier field (builder pattern).
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Set the parent-reference field (builder pattern).
    pub fn with_parent_id_field(mut self, field: impl Into<String>) -> Self {
        self.parent_id_field = field.into();
        self
    }

    /// Set the children field (builder pattern).
    pub fn with_children_field(mut self, field: impl Into<String>) -> Self {
        self.children_field = field.into();
        self
    }

    /// Set an explicit root marker (builder pattern).
    pub fn with_root_value(mut self, root: impl Into<Value>) -> Self {
        self.root_value = Some(root.into());
        self
    }

    fn keys(&self) -> JsonFieldKeys {
        JsonFieldKeys::new(&self.id_field, &self.parent_id_field)
    }

    fn children_field(&self) -> String {
        or_default(&self.children_field, DEFAULT_CHILDREN_FIELD)
    }
}

/// Nest JSON records under their parents and return the top-level records.
///
/// Parents with children gain a `children_field` array; leaves are left
/// untouched. The input is never modified. If no record sits at the root
/// marker, the input is returned as-is.
pub fn handle_tree(records: &[Value], options: &TreeOptions) -> Vec<Value> {
    let keys = options.keys();
    let root = match &options.root_value {
        Some(value) => JsonKey(value.clone()),
        None => default_root(records, &keys.parent_id_field),
    };
    log::debug!(
        "Building tree from {} records (root marker: {})",
        records.len(),
        root.0
    );

    let forest = build_forest(records, &keys, &root);
    if forest.is_empty() {
        log::trace!("No record matches the root marker, returning input unchanged");
        return records.to_vec();
    }

    let children_field = options.children_field();
    forest
        .into_iter()
        .map(|node| node.into_json(&children_field))
        .collect()
}

impl TreeNode<Value> {
    /// Convert back into a JSON record, attaching children under `children_field`.
    pub fn into_json(self, children_field: &str) -> Value {
        let TreeNode {
            mut record,
            children,
        } = self;
        if children.is_empty() {
            return record;
        }
        if let Value::Object(map) = &mut record {
            let nested = children
                .into_iter()
                .map(|child| child.into_json(children_field))
                .collect();
            map.insert(children_field.to_string(), Value::Array(nested));
        }
        record
    }
}

/// Minimum numeric parent reference, or `0` when that is not-a-number, zero,
/// or the input is empty.
fn default_root(records: &[Value], parent_id_field: &str) -> JsonKey {
    let min = records
        .iter()
        .map(|record| coerce_number(record.get(parent_id_field)))
        .fold(f64::INFINITY, |acc, n| {
            if acc.is_nan() || n.is_nan() {
                f64::NAN
            } else {
                acc.min(n)
            }
        });

    if !min.is_finite() || min == 0.0 {
        return JsonKey(Value::from(0));
    }
    JsonKey(number_value(min))
}

/// Numeric coercion applied to parent references when computing the root.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) | None => f64::NAN,
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or_else(|| Value::from(0), Value::Number)
    }
}
