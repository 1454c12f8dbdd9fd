//! Pipeline-facing context for structural operations
//!
//! The surrounding asset pipeline hands each transformation a small context:
//! where the working copy lives, where the pristine resources live, and the
//! model's name. The model name doubles as the default target for several
//! operations (collide injection, asset-mapper base name, parent group).

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ValidationError;
use crate::nodes::EggTree;
use crate::ops;

#[derive(Debug, Clone)]
pub struct AssetContext {
    pub working_path: PathBuf,
    pub resources_path: PathBuf,
    pub model_name: String,
}

impl AssetContext {
    pub fn new(
        working_path: impl Into<PathBuf>,
        resources_path: impl Into<PathBuf>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            working_path: working_path.into(),
            resources_path: resources_path.into(),
            model_name: model_name.into(),
        }
    }

    /// Collide injection targeting the model's own group.
    pub fn inject_collide(
        &self,
        tree: &mut EggTree,
        method: &str,
        flags: &str,
        bitmask: Option<&str>,
    ) -> Result<usize, ValidationError> {
        ops::inject_collide_tag(tree, &self.model_name, method, flags, bitmask)
    }

    /// Asset mapper keyed on the model name.
    pub fn build_asset_mapper<I, S>(&self, assets: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ops::build_asset_mapper(assets, &self.model_name)
    }

    /// Ensure the tree has a parent group named after the model.
    pub fn ensure_group_parent(&self, tree: &mut EggTree) {
        ops::ensure_group_parent(tree, &self.model_name);
    }
}
