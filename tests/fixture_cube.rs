//! End-to-end run over a realistic exported model: parse the fixture,
//! apply a typical pipeline sequence, and check the resulting shape.

use std::fs;

use eggtree::ops;
use eggtree::{parse, snapshot_tree, AssetContext, EggNode, EggTree};

fn load_cube() -> EggTree {
    let source = fs::read_to_string("tests/data/cube.egg").expect("fixture readable");
    parse(&source).expect("fixture parses")
}

#[test]
fn test_fixture_shape() {
    let tree = load_cube();
    assert_eq!(tree.find_all("Vertex").len(), 4);
    assert_eq!(tree.find_all("UV").len(), 4);
    assert_eq!(tree.find_all("RGBA").len(), 4);
    assert_eq!(tree.find_all("Polygon").len(), 1);
    assert_eq!(tree.find_all("VertexRef").len(), 1);
    assert_eq!(tree.find_all("Ref").len(), 1);
    assert_eq!(tree.find_all("Texture").len(), 1);
    assert_eq!(tree.find_all("Group").len(), 2);
}

#[test]
fn test_fixture_serialization_is_stable() {
    let tree = load_cube();
    let rendered = tree.to_string();
    let reparsed = parse(&rendered).expect("reparses");
    assert_eq!(reparsed.to_string(), rendered);
    assert_eq!(snapshot_tree(&tree), snapshot_tree(&reparsed));
}

#[test]
fn test_pipeline_sequence() {
    let mut tree = load_cube();
    let context = AssetContext::new("/tmp/work", "/tmp/resources", "Cube");

    ops::strip_materials(&mut tree);
    assert_eq!(tree.find_all("Material").len(), 0);
    assert_eq!(tree.find_all("MRef").len(), 0);
    assert!(tree
        .find_all("Scalar")
        .iter()
        .all(|s| s.name() != Some("uv-name")));
    assert!(tree.find_all("UV").iter().all(|uv| uv.name().is_none()));

    ops::fix_default_vertex_colors(&mut tree);
    assert!(tree
        .find_all("RGBA")
        .iter()
        .all(|rgba| rgba.value() == Some("1 1 1 1")));

    ops::remove_blender_defaults(&mut tree);
    let groups: Vec<_> = tree.find_all("Group").iter().map(|g| g.name()).collect();
    assert_eq!(groups, vec![Some("Cube")]);

    ops::set_texture_prefix(&mut tree, "phase_3/maps");
    let texture = tree.find_all("Texture")[0];
    assert_eq!(
        texture.get_child(0).and_then(EggNode::value),
        Some("phase_3/maps/cube.png")
    );

    let patched = context
        .inject_collide(&mut tree, "polyset", "keep,descend", Some("0x02"))
        .expect("bitmask is valid");
    assert_eq!(patched, 1);
    let cube = tree
        .find_all("Group")
        .into_iter()
        .find(|g| g.name() == Some("Cube"))
        .expect("cube group");
    let first = cube.get_child(0).expect("collide tag");
    assert_eq!(first.tag(), Some("Collide"));
    assert_eq!(first.value(), Some("Polyset keep descend"));
    let second = cube.get_child(1).expect("mask scalar");
    assert_eq!(second.name(), Some("collide-mask"));
    assert_eq!(second.value(), Some("0x00000002"));

    ops::add_comment(&mut tree, "processed by pipeline");
    assert_eq!(tree.get(0).and_then(EggNode::tag), Some("CoordinateSystem"));
    assert_eq!(tree.get(1).and_then(EggNode::tag), Some("Comment"));

    // everything above must leave the tree in a reparseable, stable form
    let rendered = tree.to_string();
    let reparsed = parse(&rendered).expect("reparses");
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn test_group_parent_wrap_on_fixture() {
    let mut tree = load_cube();
    let context = AssetContext::new("/tmp/work", "/tmp/resources", "crate_model");
    context.ensure_group_parent(&mut tree);
    let parent = tree
        .children
        .last()
        .expect("parent group appended");
    assert_eq!(parent.name(), Some("crate_model"));
    // both former top-level groups moved under the new parent
    assert_eq!(parent.get_child(0).and_then(EggNode::name), Some("Camera"));
    assert_eq!(parent.get_child(1).and_then(EggNode::name), Some("Cube"));
}
