use anyhow::Context;
use camino::Utf8Path;
use hcunit_domain::HcunitError;

/// The policy program must be a readable regular file.
pub fn validate_policy_path(path: &Utf8Path) -> anyhow::Result<()> {
    let invalid = || HcunitError::InvalidPolicyPath {
        path: path.to_string(),
    };
    if path.as_str().trim().is_empty() {
        return Err(invalid().into());
    }
    let meta = std::fs::metadata(path).map_err(|_| invalid())?;
    if meta.is_dir() {
        return Err(HcunitError::UnexpectedDirectory {
            path: path.to_string(),
        }
        .into());
    }
    std::fs::File::open(path).map_err(|_| invalid())?;
    Ok(())
}

/// A non-blank path that, if it exists, is not a directory.
///
/// Missing files are left to the subsequent read, which reports the IO error.
pub fn validate_file_path(path: &Utf8Path, what: &'static str) -> anyhow::Result<()> {
    if path.as_str().trim().is_empty() {
        return Err(HcunitError::EmptyPath { what }.into());
    }
    if path.is_dir() {
        return Err(HcunitError::UnexpectedDirectory {
            path: path.to_string(),
        }
        .into());
    }
    Ok(())
}

/// The template root may be a directory or a single file, but must exist.
pub fn validate_template_root(path: &Utf8Path) -> anyhow::Result<()> {
    if path.as_str().trim().is_empty() {
        return Err(HcunitError::EmptyPath { what: "template" }.into());
    }
    std::fs::metadata(path).with_context(|| format!("stat template root {path}"))?;
    Ok(())
}
