//! Texture path and scalar rewrites

use std::collections::{BTreeMap, HashSet};

use crate::nodes::{quote_egg_string, sanitize_string, EggLeaf, EggNode, EggTree, NodeId};

/// Mutable access to a texture node's filename, whatever its parsed shape:
/// a collapsed leaf holds it as the value, a branch as its first text
/// fragment.
fn texture_filename_mut(node: &mut EggNode) -> Option<&mut String> {
    match node {
        EggNode::Leaf(leaf) => Some(&mut leaf.value),
        EggNode::Branch(branch) => match branch.children.first_mut() {
            Some(EggNode::Text(text)) => Some(&mut text.value),
            _ => None,
        },
        EggNode::Text(_) => None,
    }
}

/// Rewrite every texture filename to `{prefix}/{basename}`.
///
/// A value that already starts with the prefix and contains no `/../`
/// traversal segment is left alone, which keeps repeated pipeline runs from
/// renaming the same file over and over.
pub fn set_texture_prefix(tree: &mut EggTree, prefix: &str) {
    tree.for_each_mut("Texture", |tex| {
        if let Some(value) = texture_filename_mut(tex) {
            let sanitized = sanitize_string(value).to_string();
            if sanitized.starts_with(prefix) && !sanitized.contains("/../") {
                return;
            }
            let basename = sanitized.rsplit('/').next().unwrap_or(sanitized.as_str());
            *value = quote_egg_string(&format!("{prefix}/{basename}"));
        }
    });
}

/// Replace texture filenames according to `mapping` (old sanitized name to
/// new name). Filenames without a mapping are rewritten in sanitized form.
pub fn remap_texture_filenames(tree: &mut EggTree, mapping: &BTreeMap<String, String>) {
    tree.for_each_mut("Texture", |tex| {
        if let Some(value) = texture_filename_mut(tex) {
            let old = sanitize_string(value).to_string();
            let new = mapping.get(&old).cloned().unwrap_or(old);
            *value = quote_egg_string(&new);
        }
    });
}

/// Append `<Scalar> alpha { dual }` to every texture that doesn't already
/// carry an identical child.
pub fn add_texture_transparency(tree: &mut EggTree) {
    tree.for_each_mut("Texture", |tex| {
        let Some(branch) = super::coerce_branch(tex) else {
            return;
        };
        let rendered = "<Scalar> alpha { dual }";
        if branch.children.iter().any(|c| c.to_string() == rendered) {
            return;
        }
        branch.add_child(EggNode::Leaf(EggLeaf::new(
            "Scalar",
            Some("alpha".to_string()),
            "dual",
        )));
    });
}

/// Remove `uv-name` scalars inside every texture.
pub fn remove_texture_uv_names(tree: &mut EggTree) {
    tree.for_each_mut("Texture", |tex| {
        let doomed: HashSet<NodeId> = tex
            .find_all("Scalar")
            .iter()
            .filter(|scalar| scalar.name() == Some("uv-name"))
            .map(|scalar| scalar.id())
            .collect();
        if !doomed.is_empty() {
            tex.remove_nodes(&doomed);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const TEXTURE: &str = "<Texture> tex {\n  \"maps/cube.png\"\n  <Scalar> format { rgba }\n}";

    #[test]
    fn test_set_texture_prefix_rewrites_basename() {
        let mut tree = parse(TEXTURE).expect("parses");
        set_texture_prefix(&mut tree, "phase_3/maps");
        let tex = tree.get(0).expect("texture");
        assert_eq!(tex.get_child(0).and_then(EggNode::value), Some("phase_3/maps/cube.png"));
    }

    #[test]
    fn test_set_texture_prefix_is_idempotent() {
        let mut tree = parse(TEXTURE).expect("parses");
        set_texture_prefix(&mut tree, "phase_3/maps");
        let once = tree.to_string();
        set_texture_prefix(&mut tree, "phase_3/maps");
        assert_eq!(tree.to_string(), once);
    }

    #[test]
    fn test_set_texture_prefix_rejects_traversal() {
        let mut tree = parse("<Texture> tex {\n  phase_3/maps/../../etc/passwd\n  <Scalar> format { rgba }\n}")
            .expect("parses");
        set_texture_prefix(&mut tree, "phase_3/maps");
        let tex = tree.get(0).expect("texture");
        assert_eq!(tex.get_child(0).and_then(EggNode::value), Some("phase_3/maps/passwd"));
    }

    #[test]
    fn test_set_texture_prefix_handles_collapsed_leaf() {
        let mut tree = parse("<Texture> tex { \"cube.png\" }").expect("parses");
        set_texture_prefix(&mut tree, "phase_3/maps");
        assert_eq!(tree.get(0).and_then(EggNode::value), Some("phase_3/maps/cube.png"));
    }

    #[test]
    fn test_remap_texture_filenames() {
        let mut tree = parse(TEXTURE).expect("parses");
        let mut mapping = BTreeMap::new();
        mapping.insert("maps/cube.png".to_string(), "cube.png".to_string());
        remap_texture_filenames(&mut tree, &mapping);
        let tex = tree.get(0).expect("texture");
        assert_eq!(tex.get_child(0).and_then(EggNode::value), Some("cube.png"));
    }

    #[test]
    fn test_remap_without_entry_just_sanitizes() {
        let mut tree = parse(TEXTURE).expect("parses");
        remap_texture_filenames(&mut tree, &BTreeMap::new());
        let tex = tree.get(0).expect("texture");
        assert_eq!(tex.get_child(0).and_then(EggNode::value), Some("maps/cube.png"));
    }

    #[test]
    fn test_add_texture_transparency_appends_once() {
        let mut tree = parse(TEXTURE).expect("parses");
        add_texture_transparency(&mut tree);
        add_texture_transparency(&mut tree);
        let scalars = tree.find_all("Scalar");
        let alphas: Vec<_> = scalars
            .iter()
            .filter(|s| s.name() == Some("alpha"))
            .collect();
        assert_eq!(alphas.len(), 1);
        assert_eq!(alphas[0].value(), Some("dual"));
    }

    #[test]
    fn test_remove_texture_uv_names() {
        let mut tree = parse(
            "<Texture> tex {\n  \"maps/a.png\"\n  <Scalar> uv-name { foo }\n  <Scalar> format { rgba }\n}",
        )
        .expect("parses");
        remove_texture_uv_names(&mut tree);
        assert_eq!(tree.find_all("Scalar").len(), 1);
        assert_eq!(tree.find_all("Scalar")[0].name(), Some("format"));
    }
}
