//! Tree snapshot - a normalized, serializable view of an egg tree
//!
//! Node identity is deliberately absent from snapshots: two trees with the
//! same tags, names, values and child order produce equal snapshots, which
//! makes this the right tool for structural-equality assertions (round-trip
//! tests) and for handing tree shapes to external tooling as JSON.

use serde::{Deserialize, Serialize};

use crate::nodes::{EggNode, EggTree};

/// A snapshot of a single node in a normalized, serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// The node's tag, or `"Text"` for bare text fragments.
    pub node_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Leaf value or text fragment content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

/// Snapshot one node and its subtree.
pub fn snapshot_node(node: &EggNode) -> NodeSnapshot {
    match node {
        EggNode::Text(text) => NodeSnapshot {
            node_type: String::from("Text"),
            name: None,
            value: Some(text.value.clone()),
            children: Vec::new(),
        },
        EggNode::Leaf(leaf) => NodeSnapshot {
            node_type: leaf.tag.clone(),
            name: leaf.name.clone(),
            value: Some(leaf.value.clone()),
            children: Vec::new(),
        },
        EggNode::Branch(branch) => NodeSnapshot {
            node_type: branch.tag.clone(),
            name: branch.name.clone(),
            value: None,
            children: branch.children.iter().map(snapshot_node).collect(),
        },
    }
}

/// Snapshot a whole tree as its top-level node snapshots.
pub fn snapshot_tree(tree: &EggTree) -> Vec<NodeSnapshot> {
    tree.children.iter().map(snapshot_node).collect()
}
