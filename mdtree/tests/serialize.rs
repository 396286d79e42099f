#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use mdtree::{ParseOptionsBuilder, parse_markdown};
use serde_json::{Value, json};

fn to_json(markdown: &str) -> Value {
  let options = ParseOptionsBuilder::new()
    .component_block("Alert", true)
    .component_block("Chart", true)
    .build();
  serde_json::to_value(parse_markdown(markdown, &options)).expect("serializable tree")
}

#[test]
fn test_heading_json_shape() {
  assert_eq!(
    to_json("# Title"),
    json!({
      "kind": "root",
      "children": [{
        "kind": "element",
        "key": "n_1",
        "name": "h1",
        "attrs": {},
        "block": true,
        "children": [{ "kind": "text", "key": "n_0", "value": "Title" }],
      }],
    })
  );
}

#[test]
fn test_component_json_shape() {
  let tree = to_json("::: Alert type=info\nBody\n:::\n\n```component:Chart\n1,2,3\n```\n");
  let alert = &tree["children"][0];
  assert_eq!(alert["kind"], "component");
  assert_eq!(alert["syntax"], "container");
  assert_eq!(alert["props"], json!({"type": "info"}));
  assert!(alert.get("source").is_none());

  let chart = &tree["children"][1];
  assert_eq!(chart["syntax"], "fence");
  assert_eq!(chart["source"], "1,2,3\n");
  assert_eq!(chart["children"], json!([]));
}

#[test]
fn test_code_json_omits_missing_lang() {
  let tree = to_json("    indented\n\n```rust\nfn x() {}\n```\n");
  let indented = &tree["children"][0];
  assert_eq!(indented["kind"], "code");
  assert_eq!(indented["inline"], false);
  assert!(indented.get("lang").is_none());
  assert!(indented.get("info").is_none());

  let fenced = &tree["children"][1];
  assert_eq!(fenced["lang"], "rust");
  assert_eq!(fenced["info"], "rust");
}

#[test]
fn test_break_json_shape() {
  let tree = to_json("a  \nb");
  let p = &tree["children"][0];
  assert_eq!(p["children"][1], json!({"kind": "break", "key": "n_1", "hard": true}));
}

#[test]
fn test_attrs_keep_source_order() {
  let tree = to_json("[x](/path \"Title\")");
  let link = &tree["children"][0]["children"][0];
  let keys = link["attrs"]
    .as_object()
    .expect("attrs object")
    .keys()
    .cloned()
    .collect::<Vec<_>>();
  assert_eq!(keys, ["href", "title"]);
}
