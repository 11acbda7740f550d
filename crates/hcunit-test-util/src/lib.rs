//! Shared test utilities for the hcunit workspace.
//!
//! The fake executables are POSIX shell scripts, so they are only available
//! on unix. They let the adapter and CLI suites run without `opa` or `helm`
//! installed.

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Normalize non-deterministic JSON fields for golden comparison.
///
/// `tool.version` is replaced only on a root report envelope. Timestamps and
/// `duration_ms` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("run")
            && obj.contains_key("verdict");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// Fake `opa` that answers every `eval` with a truthy result echoing the
/// query, except for the queries in `undefined`, which get an empty result.
///
/// Every answer carries a one-event trace naming the query. Stdin is drained.
pub fn write_fake_opa(dir: &Path, undefined: &[&str]) -> PathBuf {
    let mut cases = String::new();
    for q in undefined {
        cases.push_str(&format!("  {}) echo '{{}}'; exit 0 ;;\n", shell_quote(q)));
    }
    let body = format!(
        r#"#!/bin/sh
for arg in "$@"; do q="$arg"; done
cat > /dev/null
case "$q" in
{cases}esac
esc=$(printf '%s' "$q" | sed 's/\\/\\\\/g; s/"/\\"/g')
printf '{{"result":[{{"expressions":[{{"value":true,"text":"%s"}}]}}],"explanation":[{{"op":"Enter","query_id":1,"parent_id":0,"message":"%s"}}]}}\n' "$esc" "$esc"
"#
    );
    write_executable(dir, "opa", &body)
}

/// Fake `opa` whose every `eval` fails with one engine error.
pub fn write_fake_opa_error(dir: &Path, code: &str, message: &str) -> PathBuf {
    let payload = serde_json::json!({"errors": [{"code": code, "message": message}]});
    let body = format!(
        "#!/bin/sh\ncat > /dev/null\necho {}\nexit 1\n",
        shell_quote(&payload.to_string())
    );
    write_executable(dir, "opa", &body)
}

/// Fake `helm` printing `stdout` verbatim for any invocation.
pub fn write_fake_helm(dir: &Path, stdout: &str) -> PathBuf {
    let output = dir.join("helm.out");
    std::fs::write(&output, stdout).expect("write helm output");
    let body = format!("#!/bin/sh\ncat {}\n", shell_quote(&output.to_string_lossy()));
    write_executable(dir, "helm", &body)
}

/// Fake `helm` that prints `stderr` and exits 1.
pub fn write_failing_helm(dir: &Path, stderr: &str) -> PathBuf {
    let body = format!("#!/bin/sh\necho {} >&2\nexit 1\n", shell_quote(stderr));
    write_executable(dir, "helm", &body)
}

/// Build `helm template` output for a chart named `hcunit`.
pub fn helm_output(files: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (path, text) in files {
        out.push_str(&format!("---\n# Source: hcunit/templates/{path}\n{text}"));
        if !text.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn write_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fake executable");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&path).expect("stat").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod");
    }
    path
}
