//! Palettization ordering metadata
//!
//! The palettization step injects a numeric ordering prefix into group
//! names (`3-arm`) so the external palettizer packs textures in a stable
//! order. Once the palette exists the prefix has done its job and gets
//! stripped again.

use crate::error::ValidationError;
use crate::nodes::EggTree;

/// Drop the `{int}-` ordering prefix from every group name that carries
/// one. Names whose prefix does not parse as an integer are untouched.
pub fn remove_palette_indices(tree: &mut EggTree) {
    tree.for_each_mut("Group", |group| {
        let stripped = match group.name() {
            Some(name) => match name.split_once('-') {
                Some((prefix, rest)) if prefix.parse::<i64>().is_ok() => Some(rest.to_string()),
                _ => None,
            },
            None => None,
        };
        if stripped.is_some() {
            group.set_name(stripped);
        }
    });
}

/// Guard for palette and downscale target sizes, checked before anything
/// is handed to the external tool.
pub fn ensure_power_of_two(size: u64) -> Result<(), ValidationError> {
    if size == 0 || size & (size - 1) != 0 {
        return Err(ValidationError::NotPowerOfTwo(size));
    }
    Ok(())
}
