use crate::paths::validate_file_path;
use anyhow::Context;
use camino::Utf8Path;
use hcunit_domain::{HcunitError, ValuesSource};
use hcunit_types::ids::STDIN_TOKEN;
use std::io::Read;

fn is_stdin(location: &str) -> bool {
    location.trim() == STDIN_TOKEN
}

/// Read every values source in order. `-` reads `stdin`, at most once.
pub fn read_values_sources(
    locations: &[String],
    stdin: &mut dyn Read,
) -> anyhow::Result<Vec<ValuesSource>> {
    let stdin_uses = locations.iter().filter(|l| is_stdin(l)).count();
    if stdin_uses > 1 {
        return Err(HcunitError::StdinReused.into());
    }

    let mut out = Vec::with_capacity(locations.len());
    for location in locations {
        let text = if is_stdin(location) {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("read values from stdin")?;
            buf
        } else {
            let path = Utf8Path::new(location);
            validate_file_path(path, "values")?;
            std::fs::read_to_string(path).with_context(|| format!("read values {path}"))?
        };
        tracing::debug!(origin = %location, bytes = text.len(), "read values source");
        out.push(ValuesSource {
            origin: location.clone(),
            text,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn reads_files_and_stdin_in_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        let a = root.join("a.yaml");
        std::fs::write(&a, "replicas: 1\n").expect("write");

        let mut stdin = "replicas: 2\n".as_bytes();
        let sources =
            read_values_sources(&[a.to_string(), "-".to_string()], &mut stdin).expect("read");

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].origin, a.as_str());
        assert_eq!(sources[0].text, "replicas: 1\n");
        assert_eq!(sources[1].origin, "-");
        assert_eq!(sources[1].text, "replicas: 2\n");
    }

    #[test]
    fn stdin_twice_is_rejected_before_reading() {
        let mut stdin = "x: 1".as_bytes();
        let err = read_values_sources(&["-".to_string(), "-".to_string()], &mut stdin)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HcunitError>(),
            Some(HcunitError::StdinReused)
        ));
        assert_eq!(stdin, "x: 1".as_bytes());
    }

    #[test]
    fn padded_dash_still_means_stdin() {
        let mut stdin = "replicas: 4\n".as_bytes();
        let sources = read_values_sources(&[" - ".to_string()], &mut stdin).expect("read");
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].text, "replicas: 4\n");

        let mut stdin = "x: 1".as_bytes();
        let err = read_values_sources(&["-".to_string(), "- ".to_string()], &mut stdin)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HcunitError>(),
            Some(HcunitError::StdinReused)
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let mut stdin = std::io::empty();
        let err =
            read_values_sources(&["does/not/exist.yaml".to_string()], &mut stdin).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }

    #[test]
    fn no_locations_reads_nothing() {
        let mut stdin = std::io::empty();
        let sources = read_values_sources(&[], &mut stdin).expect("read");
        assert!(sources.is_empty());
    }
}
