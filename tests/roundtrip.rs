//! Serialization stability: output settles after a single normalization
//! pass, and reparsing never changes the tree shape.

use eggtree::{parse, snapshot_tree};

fn assert_stable(source: &str) {
    let first = parse(source).expect("first parse");
    let rendered = first.to_string();
    let second = parse(&rendered).expect("second parse");
    assert_eq!(second.to_string(), rendered);
    assert_eq!(snapshot_tree(&first), snapshot_tree(&second));
}

#[test]
fn test_already_normalized_input_is_verbatim() {
    let source = "<Group> a {\n  <Group> b {\n    <Scalar> alpha { dual }\n  }\n}";
    let tree = parse(source).expect("parses");
    assert_eq!(tree.to_string(), source);
}

#[test]
fn test_multiline_number_runs_coalesce() {
    let tree = parse(
        "<Transform> {\n  <Matrix4> {\n    1 0 0 0\n    0 1 0 0\n    0 0 1 0\n    0 0 0 1\n  }\n}",
    )
    .expect("parses");
    let matrix = tree.find_all("Matrix4");
    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix[0].value(), Some("1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1"));
    assert_eq!(
        tree.to_string(),
        "<Transform> {\n  <Matrix4> { 1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1 }\n}"
    );
    assert_stable(&tree.to_string());
}

#[test]
fn test_comments_and_irregular_whitespace_normalize_once() {
    let messy = "// exporter banner\n<Group>   a   {  <Scalar> alpha\n{ dual } /* inline */ }";
    assert_stable(messy);
    let tree = parse(messy).expect("parses");
    assert_eq!(tree.to_string(), "<Group> a {\n  <Scalar> alpha { dual }\n}");
}

#[test]
fn test_quoted_values_are_preserved() {
    assert_stable("<Texture> tex { \"maps/crate box.png\" }");
    let tree = parse("<Texture> tex { \"maps/crate box.png\" }").expect("parses");
    assert_eq!(tree.to_string(), "<Texture> tex { \"maps/crate box.png\" }");
}

#[test]
fn test_empty_branch_renders_blank_body() {
    assert_stable("<Group> empty { }");
    let tree = parse("<Group> empty { }").expect("parses");
    assert_eq!(tree.to_string(), "<Group> empty {\n\n}");
}

#[test]
fn test_mixed_contents_are_stable() {
    assert_stable(
        "<Polygon> {\n  <TRef> { tex }\n  <Normal> { 0.0 0.0 1.0 }\n  <VertexRef> { 0 1 2 3 <Ref> { pool } }\n}",
    );
}

#[test]
fn test_scientific_and_special_numbers_survive() {
    assert_stable("<Vertex> 0 { 1.5e-3 -2.25 nan }");
    let tree = parse("<Vertex> 0 { 1.5e-3 -2.25 nan }").expect("parses");
    assert_eq!(tree.get(0).and_then(|n| n.value()), Some("1.5e-3 -2.25 nan"));
}
