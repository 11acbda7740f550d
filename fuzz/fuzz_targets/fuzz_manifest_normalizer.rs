//! Fuzz target for rendered-manifest normalization.
//!
//! Goal: normalizing arbitrary rendered files should **never panic**.
//! Unparsable YAML must come back as an error naming the file.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_normalizer
//! ```

#![no_main]

use arbitrary::Arbitrary;
use hcunit_domain::{HcunitError, RenderedFiles};
use hcunit_types::TemplatePath;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RenderedInput {
    files: Vec<(String, String)>,
}

fuzz_target!(|input: RenderedInput| {
    if input.files.len() > 16 {
        return;
    }

    let files: RenderedFiles = input
        .files
        .into_iter()
        .filter(|(p, t)| p.len() <= 128 && t.len() <= 8192)
        .map(|(p, t)| (TemplatePath::new(p), t))
        .collect();

    match hcunit_domain::normalize_manifests(&files) {
        Ok(_) => {}
        Err(HcunitError::Normalize { file, .. }) => {
            assert!(files.keys().any(|p| p.as_str() == file));
        }
        Err(other) => panic!("unexpected error kind: {other}"),
    }
});
