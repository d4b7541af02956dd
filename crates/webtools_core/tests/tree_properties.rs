//! Structural properties of `handle_tree` over larger, generated inputs.

use serde_json::{Value, json};
use webtools_core::tree::{
    FnKeys, JsonFieldKeys, JsonKey, TreeNode, TreeOptions, build_forest, handle_tree,
};

/// A menu-like hierarchy: `width` roots, each with `width` children, each with
/// `width` grandchildren. Records are interleaved so parents do not always
/// precede their children.
fn menu_records(width: i64) -> Vec<Value> {
    let mut records = Vec::new();
    for root in 1..=width {
        let root_id = root * 100;
        for child in 1..=width {
            let child_id = root_id + child * 10;
            for leaf in 1..=width {
                records.push(json!({
                    "menuId": child_id + leaf,
                    "parentId": child_id,
                    "name": format!("leaf {}", child_id + leaf),
                }));
            }
            records.push(json!({"menuId": child_id, "parentId": root_id, "name": "child"}));
        }
        records.push(json!({"menuId": root_id, "parentId": 0, "name": "root"}));
    }
    records
}

fn collect_ids(nodes: &[Value], children_field: &str, out: &mut Vec<i64>) {
    for node in nodes {
        out.push(node["menuId"].as_i64().unwrap());
        if let Some(children) = node.get(children_field).and_then(Value::as_array) {
            collect_ids(children, children_field, out);
        }
    }
}

fn strip_children(node: &Value, children_field: &str) -> Value {
    let mut node = node.clone();
    if let Value::Object(map) = &mut node {
        map.remove(children_field);
    }
    node
}

fn options() -> TreeOptions {
    TreeOptions::default().with_id_field("menuId")
}

#[test]
fn every_record_appears_exactly_once() {
    let records = menu_records(4);
    let tree = handle_tree(&records, &options());

    let mut ids = Vec::new();
    collect_ids(&tree, "children", &mut ids);
    ids.sort_unstable();

    let mut expected: Vec<i64> = records
        .iter()
        .map(|r| r["menuId"].as_i64().unwrap())
        .collect();
    expected.sort_unstable();

    assert_eq!(ids, expected);
}

#[test]
fn only_roots_are_top_level() {
    let tree = handle_tree(&menu_records(3), &options());
    assert_eq!(tree.len(), 3);
    assert!(tree.iter().all(|node| node["parentId"] == json!(0)));
    let root_ids: Vec<_> = tree.iter().map(|n| n["menuId"].as_i64().unwrap()).collect();
    assert_eq!(root_ids, vec![100, 200, 300]);
}

#[test]
fn nodes_equal_their_input_apart_from_children() {
    let records = menu_records(2);
    let tree = handle_tree(&records, &options());

    fn check(nodes: &[Value], records: &[Value]) {
        for node in nodes {
            let bare = strip_children(node, "children");
            assert!(records.contains(&bare), "unexpected node {bare}");
            match node.get("children").and_then(Value::as_array) {
                Some(children) => {
                    assert!(!children.is_empty());
                    check(children, records);
                }
                None => assert!(node.get("children").is_none()),
            }
        }
    }
    check(&tree, &records);
}

#[test]
fn children_point_at_their_parent() {
    let tree = handle_tree(&menu_records(3), &options().with_children_field("items"));

    fn check(parent: &Value) {
        if let Some(items) = parent.get("items").and_then(Value::as_array) {
            for item in items {
                assert_eq!(item["parentId"], parent["menuId"]);
                check(item);
            }
        }
    }
    tree.iter().for_each(check);
    assert!(tree.iter().all(|n| n.get("children").is_none()));
}

#[test]
fn caller_records_are_untouched() {
    let records = menu_records(3);
    let snapshot = records.clone();
    let tree = handle_tree(&records, &options());
    assert!(!tree.is_empty());
    assert_eq!(records, snapshot);
}

#[test]
fn field_order_is_kept_and_children_come_last() {
    let records = vec![
        json!({"name": "root", "menuId": 1, "parentId": 0}),
        json!({"name": "leaf", "menuId": 2, "parentId": 1}),
    ];
    let tree = handle_tree(&records, &options());
    let keys: Vec<_> = tree[0].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["name", "menuId", "parentId", "children"]);
}

#[test]
fn json_and_typed_forests_agree() {
    let records = menu_records(3);
    let json_forest = build_forest(
        &records,
        &JsonFieldKeys::new("menuId", "parentId"),
        &JsonKey(json!(0)),
    );

    let pairs: Vec<(i64, i64)> = records
        .iter()
        .map(|r| (r["menuId"].as_i64().unwrap(), r["parentId"].as_i64().unwrap()))
        .collect();
    let keys = FnKeys::new(|p: &(i64, i64)| Some(p.0), |p: &(i64, i64)| Some(p.1));
    let typed_forest = build_forest(&pairs, &keys, &0);

    fn shape<R>(nodes: &[TreeNode<R>]) -> Vec<usize> {
        nodes.iter().map(TreeNode::size).collect()
    }
    assert_eq!(shape(&json_forest), shape(&typed_forest));
    assert_eq!(json_forest.iter().map(TreeNode::size).sum::<usize>(), records.len());
}

#[test]
fn unknown_root_returns_input_verbatim() {
    let records = menu_records(2);
    let tree = handle_tree(&records, &options().with_root_value(-1));
    assert_eq!(tree, records);
}
