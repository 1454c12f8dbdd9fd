//! Deterministic asset renaming

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(png|jpg|rgb)$").expect("image suffix pattern"));

/// Whether a filename looks like a texture image.
pub fn is_image_file(name: &str) -> bool {
    IMAGE_FILE.is_match(name)
}

/// Assign compact deterministic names to a set of asset files.
///
/// Files are sorted lexicographically before numbering, so the result is a
/// pure function of the input *set*, regardless of iteration order. The
/// first file becomes `{base_name}.{ext}`, later ones
/// `{base_name}-{n}.{ext}`. Palette sheets (anything containing
/// `_palette_`) keep their generated names and are skipped.
pub fn build_asset_mapper<I, S>(assets: I, base_name: &str) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = assets
        .into_iter()
        .map(|asset| asset.as_ref().to_string())
        .collect();
    sorted.sort();
    sorted.dedup();

    let mut output = BTreeMap::new();
    let mut counter = 0usize;
    for item in sorted {
        if item.contains("_palette_") {
            continue;
        }
        let extension = item.rsplit('.').next().unwrap_or("").to_string();
        let new_name = if counter == 0 {
            format!("{base_name}.{extension}")
        } else {
            format!("{base_name}-{counter}.{extension}")
        };
        output.insert(item, new_name);
        counter += 1;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_is_order_insensitive() {
        let forward = build_asset_mapper(["a.png", "b.png", "c.png"], "crate");
        let backward = build_asset_mapper(["c.png", "b.png", "a.png"], "crate");
        assert_eq!(forward, backward);
        assert_eq!(forward.get("a.png").map(String::as_str), Some("crate.png"));
        assert_eq!(forward.get("b.png").map(String::as_str), Some("crate-1.png"));
        assert_eq!(forward.get("c.png").map(String::as_str), Some("crate-2.png"));
    }

    #[test]
    fn test_palette_sheets_are_skipped() {
        let mapping = build_asset_mapper(["b.png", "a.png", "c_palette_x.png"], "foo");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a.png").map(String::as_str), Some("foo.png"));
        assert_eq!(mapping.get("b.png").map(String::as_str), Some("foo-1.png"));
        assert!(!mapping.contains_key("c_palette_x.png"));
    }

    #[test]
    fn test_extensions_are_preserved() {
        let mapping = build_asset_mapper(["z.rgb", "a.jpg"], "tex");
        assert_eq!(mapping.get("a.jpg").map(String::as_str), Some("tex.jpg"));
        assert_eq!(mapping.get("z.rgb").map(String::as_str), Some("tex-1.rgb"));
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("maps/cube.png"));
        assert!(is_image_file("a.jpg"));
        assert!(is_image_file("a.rgb"));
        assert!(!is_image_file("model.egg"));
        assert!(!is_image_file("a.png.bak"));
    }
}
