use crate::paths::validate_template_root;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use hcunit_types::TemplatePath;
use std::collections::BTreeMap;
use walkdir::WalkDir;

/// Load a template tree into memory, keyed by path relative to `root`.
///
/// `root` may also be a single file, keyed by its file name.
pub fn walk_templates(root: &Utf8Path) -> anyhow::Result<BTreeMap<TemplatePath, String>> {
    validate_template_root(root)?;

    let mut out = BTreeMap::new();
    if root.is_file() {
        let name = root.file_name().unwrap_or(root.as_str());
        let text =
            std::fs::read_to_string(root).with_context(|| format!("read template {root}"))?;
        out.insert(TemplatePath::new(name), text);
        return Ok(out);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {root}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(abs) = Utf8PathBuf::from_path_buf(entry.path().to_path_buf()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 template path");
            continue;
        };
        let rel = abs.strip_prefix(root).unwrap_or(&abs);
        let text = std::fs::read_to_string(&abs).with_context(|| format!("read template {abs}"))?;
        out.insert(TemplatePath::from(rel), text);
    }

    tracing::debug!(root = %root, files = out.len(), "loaded templates");
    Ok(out)
}
