//! Collision tag injection

use std::collections::HashSet;

use log::{info, warn};
use regex::Regex;

use crate::error::ValidationError;
use crate::nodes::{EggLeaf, EggNode, EggTree, NodeId};

// Geometry the collision system can't represent. Older engine builds
// segfault on load when these coexist with a <Collide> tag, so they are
// removed from matched groups (panda3d/panda3d#1515).
const NON_POLYGON_TAGS: [&str; 3] = ["Line", "Patch", "PointLight"];

/// Compile a glob-style pattern (`*` and `?` wildcards) into an anchored
/// regex over whole names.
pub(crate) fn glob_to_regex(pattern: &str) -> Regex {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).expect("escaped glob pattern is a valid regex")
}

/// Parse a collide bitmask given as decimal or `0x`-prefixed hex.
pub fn parse_bitmask(value: &str) -> Result<u32, ValidationError> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse::<u32>(),
    };
    parsed.map_err(|_| ValidationError::MalformedBitmask(value.to_string()))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Inject a `<Collide>` tag into every group whose name matches the glob
/// pattern.
///
/// Each matched group gets a `Collide` leaf (named after the group, value
/// `"{Method} {flags}"`, commas in flags become spaces) as its new first
/// child, and, when a bitmask is given, a `collide-mask` scalar with an
/// 8-hex-digit `0x` value as its new second child. Non-polygon geometry
/// under a matched group is removed with a warning.
///
/// The bitmask string is validated before any mutation; a malformed one is
/// a [`ValidationError`]. No matching group is a logged no-op. Returns the
/// number of groups patched.
pub fn inject_collide_tag(
    tree: &mut EggTree,
    group_pattern: &str,
    method: &str,
    flags: &str,
    bitmask: Option<&str>,
) -> Result<usize, ValidationError> {
    let bitmask = bitmask.map(parse_bitmask).transpose()?;
    let method = capitalize(method);
    let flags = flags.replace(',', " ");
    let matcher = glob_to_regex(group_pattern);

    let mut matched = 0usize;
    tree.for_each_mut("Group", |group| {
        let name = match group.name() {
            Some(name) if matcher.is_match(name) => name.to_string(),
            _ => return,
        };
        matched += 1;

        let mut doomed: HashSet<NodeId> = HashSet::new();
        for tag in NON_POLYGON_TAGS {
            doomed.extend(group.find_all(tag).iter().map(|node| node.id()));
        }
        if !doomed.is_empty() {
            warn!(
                "removing {} non-polygon node(s) under collide group {name}",
                doomed.len()
            );
            group.remove_nodes(&doomed);
        }

        let Some(branch) = super::coerce_branch(group) else {
            return;
        };
        let collide = EggLeaf::new("Collide", Some(name.clone()), format!("{method} {flags}"));
        branch.children.insert(0, EggNode::Leaf(collide));
        if let Some(mask) = bitmask {
            let mask_leaf = EggLeaf::new(
                "Scalar",
                Some("collide-mask".to_string()),
                format!("{mask:#010x}"),
            );
            branch.children.insert(1, EggNode::Leaf(mask_leaf));
        }
    });

    if matched == 0 {
        info!("no group matched {group_pattern:?}, collide tag not applied");
    }
    Ok(matched)
}
