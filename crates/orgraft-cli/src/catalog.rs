//! Loading and saving catalogs as nested JSON.

use std::fs;
use std::path::Path;

use anyhow::Context;

use orgraft_tree::{NestedNode, OrgTree};

/// Derive a catalog's source label from its file stem.
pub fn label_for(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .with_context(|| format!("cannot derive a source label from {}", path.display()))
}

/// Load a catalog from nested JSON.
pub fn load(path: &Path) -> anyhow::Result<OrgTree> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let nested: NestedNode = serde_json::from_str(&text)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(OrgTree::from_nested(nested))
}

/// Write a catalog as pretty-printed nested JSON.
pub fn save(tree: &OrgTree, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&tree.to_nested())?;
    fs::write(path, json).with_context(|| format!("writing catalog {}", path.display()))?;
    Ok(())
}

/// Print a catalog as pretty-printed nested JSON on stdout.
pub fn write_stdout(tree: &OrgTree) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&tree.to_nested())?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_comes_from_file_stem() {
        assert_eq!(label_for(Path::new("/tmp/census.json")).unwrap(), "census");
    }

    #[test]
    fn load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut tree = OrgTree::new("Gov");
        let dept = tree.add_child(tree.root(), "Department").unwrap();
        tree.set_attr(dept, "census", json!({"id": 7})).unwrap();

        save(&tree, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.to_nested(), tree.to_nested());
    }

    #[test]
    fn load_reports_the_failing_path() {
        let err = load(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
