//! Group renaming, removal and reparenting

use std::collections::{BTreeMap, HashSet};

use log::info;

use crate::nodes::{EggBranch, EggNode, EggTree, NodeId};

use super::collide::glob_to_regex;

/// Rename every group whose name is a key of `mapping`.
pub fn rename_groups(tree: &mut EggTree, mapping: &BTreeMap<String, String>) {
    tree.for_each_mut("Group", |group| {
        let renamed = group.name().and_then(|name| mapping.get(name)).cloned();
        if renamed.is_some() {
            group.set_name(renamed);
        }
    });
}

/// Remove every group whose name matches the glob pattern, with all its
/// descendants. Returns the number of groups removed.
pub fn remove_groups(tree: &mut EggTree, pattern: &str) -> usize {
    let matcher = glob_to_regex(pattern);
    let doomed: HashSet<NodeId> = tree
        .find_all("Group")
        .iter()
        .filter(|group| group.name().map_or(false, |name| matcher.is_match(name)))
        .map(|group| group.id())
        .collect();
    let count = doomed.len();
    tree.remove_nodes(&doomed);
    count
}

/// Remove the top-level groups Blender exports by default: the `Camera`
/// group and any `Cube.*` leftover.
pub fn remove_blender_defaults(tree: &mut EggTree) {
    let doomed: HashSet<NodeId> = tree
        .children
        .iter()
        .filter(|node| {
            matches!(
                node,
                EggNode::Branch(branch) if branch.tag == "Group"
                    && branch.name.as_deref().map_or(false, |name| {
                        name == "Camera" || name.starts_with("Cube.")
                    })
            )
        })
        .map(|node| node.id())
        .collect();
    tree.remove_nodes(&doomed);
}

/// Make sure a group named `model_name` exists; if not, reparent every
/// top-level group under a fresh one with that name, appended after the
/// remaining top-level nodes.
pub fn ensure_group_parent(tree: &mut EggTree, model_name: &str) {
    let already_present = tree
        .find_all("Group")
        .iter()
        .any(|group| group.name() == Some(model_name));
    if already_present {
        return;
    }
    info!("wrapping top-level groups under parent {model_name:?}");

    let mut reparented = Vec::new();
    let mut rest = Vec::new();
    for node in tree.children.drain(..) {
        let is_group = matches!(&node, EggNode::Branch(branch) if branch.tag == "Group");
        if is_group {
            reparented.push(node);
        } else {
            rest.push(node);
        }
    }
    rest.push(EggNode::Branch(EggBranch::new(
        "Group",
        Some(model_name.to_string()),
        reparented,
    )));
    tree.children = rest;
}
