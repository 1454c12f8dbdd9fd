//! In-memory node model for egg trees
//!
//! An egg file is a forest of nodes. Every structured node carries a tag
//! drawn from an open vocabulary (`Group`, `Vertex`, `Scalar`, ...), an
//! optional name, and either an opaque string value (leaf) or an ordered
//! child sequence (branch). Bare text that appears between structured nodes
//! is kept as a text fragment so it survives reserialization.
//!
//! Node identity is an opaque [`NodeId`] minted at construction. Removal
//! sets are keyed by identity, never by structural equality, so two
//! structurally identical leaves are distinct removal targets.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque per-node identity, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Strip one matching pair of surrounding quote characters (`"` or `'`).
///
/// Best-effort and never fails: an already-unquoted value passes through
/// unchanged, and no nested-quote or escape parsing is attempted.
pub fn sanitize_string(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Render a name or filename the way the egg format expects: trimmed, and
/// double-quoted only when it contains whitespace.
pub fn quote_egg_string(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.contains(char::is_whitespace) {
        format!("\"{trimmed}\"")
    } else {
        trimmed.to_string()
    }
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}

/// A bare text fragment appearing as a sibling among structured nodes.
#[derive(Debug)]
pub struct EggText {
    id: NodeId,
    pub value: String,
}

impl EggText {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: NodeId::fresh(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Clone for EggText {
    // A clone is a new node: it gets a fresh identity so it never belongs
    // to removal sets built against the original.
    fn clone(&self) -> Self {
        EggText::new(self.value.clone())
    }
}

impl fmt::Display for EggText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A tagged node holding a single opaque string value.
#[derive(Debug)]
pub struct EggLeaf {
    id: NodeId,
    pub tag: String,
    pub name: Option<String>,
    pub value: String,
}

impl EggLeaf {
    pub fn new(tag: impl Into<String>, name: Option<String>, value: impl Into<String>) -> Self {
        Self {
            id: NodeId::fresh(),
            tag: tag.into(),
            name: normalize_name(name),
            value: value.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Clone for EggLeaf {
    fn clone(&self) -> Self {
        EggLeaf::new(self.tag.clone(), self.name.clone(), self.value.clone())
    }
}

impl fmt::Display for EggLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "<{}> {} {{ {} }}",
                self.tag,
                quote_egg_string(name),
                self.value.trim()
            ),
            None => write!(f, "<{}> {{ {} }}", self.tag, self.value.trim()),
        }
    }
}

/// A tagged node holding an ordered sequence of child nodes.
#[derive(Debug)]
pub struct EggBranch {
    id: NodeId,
    pub tag: String,
    pub name: Option<String>,
    pub children: Vec<EggNode>,
}

impl EggBranch {
    pub fn new(tag: impl Into<String>, name: Option<String>, children: Vec<EggNode>) -> Self {
        Self {
            id: NodeId::fresh(),
            tag: tag.into(),
            name: normalize_name(name),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn add_child(&mut self, child: EggNode) {
        self.children.push(child);
    }
}

impl Clone for EggBranch {
    fn clone(&self) -> Self {
        EggBranch::new(self.tag.clone(), self.name.clone(), self.children.clone())
    }
}

impl fmt::Display for EggBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<{}> {} {{", self.tag, quote_egg_string(name))?,
            None => write!(f, "<{}> {{", self.tag)?,
        }
        // Children indent by one two-space unit per nesting level; nested
        // newlines are reindented wholesale. Downstream diffing depends on
        // this exact layout.
        let body = self
            .children
            .iter()
            .map(|child| format!("  {child}").replace('\n', "\n  "))
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "\n{body}\n}}")
    }
}

/// Any node of an egg tree.
#[derive(Debug, Clone)]
pub enum EggNode {
    Text(EggText),
    Leaf(EggLeaf),
    Branch(EggBranch),
}

impl EggNode {
    pub fn id(&self) -> NodeId {
        match self {
            EggNode::Text(text) => text.id,
            EggNode::Leaf(leaf) => leaf.id,
            EggNode::Branch(branch) => branch.id,
        }
    }

    /// The node's tag; text fragments have none.
    pub fn tag(&self) -> Option<&str> {
        match self {
            EggNode::Text(_) => None,
            EggNode::Leaf(leaf) => Some(&leaf.tag),
            EggNode::Branch(branch) => Some(&branch.tag),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            EggNode::Text(_) => None,
            EggNode::Leaf(leaf) => leaf.name.as_deref(),
            EggNode::Branch(branch) => branch.name.as_deref(),
        }
    }

    /// Set or clear the node's name. No-op for text fragments.
    pub fn set_name(&mut self, name: Option<String>) {
        let name = normalize_name(name);
        match self {
            EggNode::Text(_) => {}
            EggNode::Leaf(leaf) => leaf.name = name,
            EggNode::Branch(branch) => branch.name = name,
        }
    }

    /// The scalar content of a leaf or text fragment; branches have none.
    pub fn value(&self) -> Option<&str> {
        match self {
            EggNode::Text(text) => Some(&text.value),
            EggNode::Leaf(leaf) => Some(&leaf.value),
            EggNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&EggBranch> {
        match self {
            EggNode::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut EggBranch> {
        match self {
            EggNode::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&EggLeaf> {
        match self {
            EggNode::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// The i-th direct child, or `None` for leaves and text fragments.
    pub fn get_child(&self, index: usize) -> Option<&EggNode> {
        match self {
            EggNode::Branch(branch) => branch.children.get(index),
            _ => None,
        }
    }

    pub fn get_child_mut(&mut self, index: usize) -> Option<&mut EggNode> {
        match self {
            EggNode::Branch(branch) => branch.children.get_mut(index),
            _ => None,
        }
    }

    /// Append a child. No-op for leaves and text fragments.
    pub fn add_child(&mut self, child: EggNode) {
        if let EggNode::Branch(branch) = self {
            branch.add_child(child);
        }
    }

    /// Every node in this subtree (including this one) whose tag equals
    /// `tag`, in depth-first pre-order. Document order is stable.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a EggNode> {
        let mut out = Vec::new();
        self.collect_matches(tag, &mut out);
        out
    }

    fn collect_matches<'a>(&'a self, tag: &str, out: &mut Vec<&'a EggNode>) {
        if self.tag() == Some(tag) {
            out.push(self);
        }
        if let EggNode::Branch(branch) = self {
            for child in &branch.children {
                child.collect_matches(tag, out);
            }
        }
    }

    /// Visit every node in this subtree (including this one) whose tag
    /// equals `tag`, in the same order as [`find_all`](Self::find_all),
    /// with mutable access.
    pub fn for_each_mut<F: FnMut(&mut EggNode)>(&mut self, tag: &str, mut f: F) {
        self.visit_mut(tag, &mut f);
    }

    fn visit_mut<F: FnMut(&mut EggNode)>(&mut self, tag: &str, f: &mut F) {
        if self.tag() == Some(tag) {
            f(self);
        }
        if let EggNode::Branch(branch) = self {
            for child in &mut branch.children {
                child.visit_mut(tag, f);
            }
        }
    }

    /// Remove every descendant whose identity is in `nodeset`, at every
    /// level still connected to this node. Descendants of removed nodes are
    /// dropped with their ancestor and never revisited.
    pub fn remove_nodes(&mut self, nodeset: &HashSet<NodeId>) {
        if let EggNode::Branch(branch) = self {
            branch.children.retain(|child| !nodeset.contains(&child.id()));
            for child in &mut branch.children {
                child.remove_nodes(nodeset);
            }
        }
    }
}

impl fmt::Display for EggNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EggNode::Text(text) => text.fmt(f),
            EggNode::Leaf(leaf) => leaf.fmt(f),
            EggNode::Branch(branch) => branch.fmt(f),
        }
    }
}

/// The root of a parsed egg file: an ordered forest of top-level nodes.
///
/// The tree exclusively owns all its nodes. Removing a node drops the only
/// reference to it and all its descendants.
#[derive(Debug, Clone, Default)]
pub struct EggTree {
    pub children: Vec<EggNode>,
}

impl EggTree {
    pub fn new(children: Vec<EggNode>) -> Self {
        Self { children }
    }

    pub fn get(&self, index: usize) -> Option<&EggNode> {
        self.children.get(index)
    }

    pub fn push(&mut self, node: EggNode) {
        self.children.push(node);
    }

    /// See [`EggNode::find_all`].
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a EggNode> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_matches(tag, &mut out);
        }
        out
    }

    /// See [`EggNode::for_each_mut`].
    pub fn for_each_mut<F: FnMut(&mut EggNode)>(&mut self, tag: &str, mut f: F) {
        for child in &mut self.children {
            child.visit_mut(tag, &mut f);
        }
    }

    /// See [`EggNode::remove_nodes`].
    pub fn remove_nodes(&mut self, nodeset: &HashSet<NodeId>) {
        self.children.retain(|child| !nodeset.contains(&child.id()));
        for child in &mut self.children {
            child.remove_nodes(nodeset);
        }
    }
}

impl fmt::Display for EggTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for child in &self.children {
            if !first {
                f.write_str("\n")?;
            }
            child.fmt(f)?;
            first = false;
        }
        Ok(())
    }
}
