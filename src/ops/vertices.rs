//! Per-vertex fixups

use std::collections::HashSet;

use log::warn;

use crate::error::ValidationError;
use crate::nodes::{EggLeaf, EggNode, EggTree, NodeId};

/// Blender's default vertex color is (0, 0, 0, 0), which renders geometry
/// invisible. Rewrite it to opaque white.
pub fn fix_default_vertex_colors(tree: &mut EggTree) {
    tree.for_each_mut("Vertex", |vertex| {
        vertex.for_each_mut("RGBA", |rgba| {
            if let EggNode::Leaf(leaf) = rgba {
                if leaf.value == "0 0 0 0" {
                    leaf.value = String::from("1 1 1 1");
                }
            }
        });
    });
}

/// Remove all vertex colors.
pub fn remove_vertex_colors(tree: &mut EggTree) {
    tree.for_each_mut("Vertex", |vertex| {
        let doomed: HashSet<NodeId> = vertex
            .find_all("RGBA")
            .iter()
            .map(|node| node.id())
            .collect();
        if !doomed.is_empty() {
            vertex.remove_nodes(&doomed);
        }
    });
}

/// Clear the name of every `UV` node under every vertex, so the engine
/// binds them to the default texture stage.
pub fn clear_uv_names(tree: &mut EggTree) {
    tree.for_each_mut("Vertex", |vertex| {
        vertex.for_each_mut("UV", |uv| uv.set_name(None));
    });
}

/// Append `scroll_u` / `scroll_v` scalars to the first group named
/// `group_name`, making the engine scroll its UVs at the given speeds.
///
/// Speeds are validated before any mutation: both must parse as floats and
/// at least one must be non-zero. A missing group is a logged no-op;
/// returns whether the scroll was applied.
pub fn set_uv_scroll(
    tree: &mut EggTree,
    group_name: &str,
    speed_u: &str,
    speed_v: &str,
) -> Result<bool, ValidationError> {
    let u: f64 = speed_u
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidScrollSpeed(speed_u.to_string()))?;
    let v: f64 = speed_v
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidScrollSpeed(speed_v.to_string()))?;
    if u == 0.0 && v == 0.0 {
        return Err(ValidationError::ZeroScrollSpeeds);
    }

    let mut applied = false;
    tree.for_each_mut("Group", |group| {
        if applied || group.name() != Some(group_name) {
            return;
        }
        let Some(branch) = super::coerce_branch(group) else {
            return;
        };
        if u != 0.0 {
            branch.add_child(EggNode::Leaf(EggLeaf::new(
                "Scalar",
                Some("scroll_u".to_string()),
                speed_u.trim(),
            )));
        }
        if v != 0.0 {
            branch.add_child(EggNode::Leaf(EggLeaf::new(
                "Scalar",
                Some("scroll_v".to_string()),
                speed_v.trim(),
            )));
        }
        applied = true;
    });

    if !applied {
        warn!("uv scroll target group {group_name:?} not found");
    }
    Ok(applied)
}
