//! Material stripping
//!
//! Exported heads carry materials and UV-name bindings the engine-side
//! shader pipeline replaces wholesale; shipping them along only bloats the
//! model and confuses the palettizer.

use std::collections::HashSet;

use crate::nodes::{EggTree, NodeId};

/// Remove every `Material` and `MRef` node and every `uv-name` scalar, and
/// clear the name of any `UV` node named `UVMap` (Blender's default).
pub fn strip_materials(tree: &mut EggTree) {
    let mut doomed: HashSet<NodeId> = HashSet::new();
    doomed.extend(tree.find_all("Material").iter().map(|node| node.id()));
    doomed.extend(tree.find_all("MRef").iter().map(|node| node.id()));
    doomed.extend(
        tree.find_all("Scalar")
            .iter()
            .filter(|scalar| scalar.name() == Some("uv-name"))
            .map(|scalar| scalar.id()),
    );
    tree.remove_nodes(&doomed);

    tree.for_each_mut("UV", |uv| {
        if uv.name() == Some("UVMap") {
            uv.set_name(None);
        }
    });
}
