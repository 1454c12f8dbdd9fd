//! Structural operations over egg trees
//!
//! Each operation mutates a tree in place through the node model's public
//! contract. Fatal conditions (`ValidationError`) are checked before any
//! mutation; lookup misses (a target group that does not exist in this
//! particular model) are logged no-ops, because pipelines apply the same
//! step across many models and not all of them contain the target.
//!
//! ## Modules
//!
//! - `assets` - deterministic asset renaming
//! - `collide` - collision tag injection
//! - `groups` - group renaming, removal and reparenting
//! - `materials` - material stripping
//! - `palette` - palettization ordering metadata
//! - `textures` - texture path and scalar rewrites
//! - `vertices` - per-vertex fixups

pub mod assets;
pub mod collide;
pub mod groups;
pub mod materials;
pub mod palette;
pub mod textures;
pub mod vertices;

pub use assets::{build_asset_mapper, is_image_file};
pub use collide::{inject_collide_tag, parse_bitmask};
pub use groups::{ensure_group_parent, remove_blender_defaults, remove_groups, rename_groups};
pub use materials::strip_materials;
pub use palette::{ensure_power_of_two, remove_palette_indices};
pub use textures::{
    add_texture_transparency, remap_texture_filenames, remove_texture_uv_names, set_texture_prefix,
};
pub use vertices::{clear_uv_names, fix_default_vertex_colors, remove_vertex_colors, set_uv_scroll};

use crate::nodes::{EggBranch, EggLeaf, EggNode, EggText, EggTree};

/// Insert a `Comment` leaf as the second top-level child of the tree.
///
/// The first child (typically `<CoordinateSystem>`) keeps its position; the
/// insert index clamps for trees with fewer children. The text is stored
/// pre-quoted so the leaf serializes as `<Comment> { "text" }`.
pub fn add_comment(tree: &mut EggTree, text: &str) {
    let comment = EggLeaf::new("Comment", None, format!("\"{text}\""));
    let index = tree.children.len().min(1);
    tree.children.insert(index, EggNode::Leaf(comment));
}

/// Mutable branch access that tolerates leaf-collapsed nodes.
///
/// The grammar collapses a node whose contents are a single text fragment
/// into a leaf, so a `<Texture>` or `<Group>` that needs children appended
/// may have parsed as a leaf. This converts such a leaf back into a branch
/// (its value becomes the first text fragment) and hands out the branch.
/// Text fragments stay as they are.
pub(crate) fn coerce_branch(node: &mut EggNode) -> Option<&mut EggBranch> {
    if let EggNode::Leaf(leaf) = node {
        let children = if leaf.value.trim().is_empty() {
            Vec::new()
        } else {
            vec![EggNode::Text(EggText::new(std::mem::take(&mut leaf.value)))]
        };
        let branch = EggBranch::new(std::mem::take(&mut leaf.tag), leaf.name.take(), children);
        *node = EggNode::Branch(branch);
    }
    node.as_branch_mut()
}
