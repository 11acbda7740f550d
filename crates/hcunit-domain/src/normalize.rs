//! Manifest normalization: rendered text -> one input document keyed by file name.

use crate::document::{ConfigDocument, parse_yaml};
use crate::engine::RenderedFiles;
use crate::error::HcunitError;
use hcunit_types::{TemplatePath, ids};
use serde_json::Value;

/// Turn rendered files into a single document keyed by base file name.
///
/// - YAML files (`.yaml`/`.yml`) are split on [`ids::DOCUMENT_SEPARATOR`] and
///   each chunk is parsed; empty chunks are dropped. One remaining document
///   is stored as-is, several are stored as a sequence in source order, none
///   means the file is omitted.
/// - Any other file is stored verbatim as a string.
///
/// Files are visited in path order, so a base-name collision between two
/// directories keeps the lexicographically last path.
pub fn normalize_manifests(files: &RenderedFiles) -> Result<ConfigDocument, HcunitError> {
    let mut out = ConfigDocument::new();
    for (path, text) in files {
        let Some(value) = normalize_file(path, text)? else {
            tracing::debug!(file = path.as_str(), "rendered file has no documents; omitted");
            continue;
        };
        let key = path.base_name().to_string();
        if out.contains_key(&key) {
            tracing::warn!(file = path.as_str(), key = %key, "base name collision; last file wins");
        }
        out.insert(key, value);
    }
    Ok(out)
}

fn normalize_file(path: &TemplatePath, text: &str) -> Result<Option<Value>, HcunitError> {
    if !is_yaml(path) {
        return Ok(Some(Value::String(text.to_string())));
    }

    let mut documents = Vec::new();
    for chunk in text.split(ids::DOCUMENT_SEPARATOR) {
        let parsed = parse_yaml(chunk).map_err(|message| HcunitError::Normalize {
            file: path.as_str().to_string(),
            message,
        })?;
        if let Some(doc) = parsed {
            documents.push(doc);
        }
    }

    Ok(match documents.len() {
        0 => None,
        1 => documents.pop(),
        _ => Some(Value::Array(documents)),
    })
}

fn is_yaml(path: &TemplatePath) -> bool {
    path.extension()
        .is_some_and(|ext| ids::YAML_EXTENSIONS.contains(&ext))
}
