//! File rewrites performed during a release.

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::{PublishError, Result};
use crate::runner::CommandRunner;

/// Replace every `uses: <action>@vX.Y.Z` pin with `uses: <action>@<tag>`.
pub fn repin_action(content: &str, action: &str, tag: &str) -> Result<String> {
    let pattern = format!(r"uses: {}@v\d+\.\d+\.\d+", regex::escape(action));
    let re = Regex::new(&pattern)
        .map_err(|e| PublishError::config(format!("Invalid workflow action '{}': {}", action, e)))?;

    let replacement = format!("uses: {}@{}", action, tag);
    Ok(re
        .replace_all(content, regex::NoExpand(&replacement))
        .into_owned())
}

/// Re-pin the action in every file directly under `dir`.
///
/// Files whose content would not change are not written, so repeating a
/// release rewrite is a no-op. Returns the paths that were (or in simulation
/// would be) written.
pub fn rewrite_workflows<R: CommandRunner>(
    runner: &R,
    dir: &Path,
    action: &str,
    tag: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for path in runner.list_files(dir)? {
        let content = runner.read_file(&path)?;
        let updated = repin_action(&content, action, tag)?;
        if updated != content {
            runner.write_file(&path, &updated)?;
            written.push(path);
        }
    }

    Ok(written)
}

/// Set the top-level `version` field of a JSON manifest.
///
/// Key order is preserved and output uses two-space indentation.
pub fn set_manifest_version(content: &str, version: &str) -> Result<String> {
    let mut manifest: serde_json::Value = serde_json::from_str(content)?;
    let object = manifest.as_object_mut().ok_or_else(|| {
        PublishError::config("The project manifest must be a JSON object")
    })?;
    object.insert(
        "version".to_string(),
        serde_json::Value::String(version.to_string()),
    );

    let mut serialized = serde_json::to_string_pretty(&manifest)?;
    serialized.push('\n');
    Ok(serialized)
}

/// Rewrite the manifest at `path`. Returns whether a write happened.
pub fn rewrite_manifest<R: CommandRunner>(runner: &R, path: &Path, version: &str) -> Result<bool> {
    let content = runner.read_file(path)?;
    let updated = set_manifest_version(&content, version)?;
    if updated == content {
        return Ok(false);
    }
    runner.write_file(path, &updated)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{MockRunner, WriteMode};

    const WORKFLOW: &str = "\
jobs:
  build:
    uses: infinum/js-pipeline/.github/workflows/build.yml@v1.0.0
  test:
    uses: infinum/js-pipeline@v1.2.3
  lint:
    uses: infinum/js-pipeline@v1.2.3
  other:
    uses: someone/else@v1.2.3
";

    #[test]
    fn test_repin_action() {
        let out = repin_action(WORKFLOW, "infinum/js-pipeline", "v1.3.0").unwrap();
        assert_eq!(out.matches("infinum/js-pipeline@v1.3.0").count(), 2);
        assert!(out.contains("someone/else@v1.2.3"));
        assert!(out.contains("build.yml@v1.0.0"));
    }

    #[test]
    fn test_repin_escapes_action() {
        let content = "uses: infinumXjs-pipeline@v1.0.0";
        let out = repin_action(content, "infinum/js-pipeline", "v2.0.0").unwrap();
        assert_eq!(out, content);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let mut runner = MockRunner::default();
        runner.add_file("wf/ci.yml", WORKFLOW);

        let first = rewrite_workflows(&runner, Path::new("wf"), "infinum/js-pipeline", "v1.3.0")
            .unwrap();
        assert_eq!(first, vec![PathBuf::from("wf/ci.yml")]);

        let second = rewrite_workflows(&runner, Path::new("wf"), "infinum/js-pipeline", "v1.3.0")
            .unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_set_manifest_version_preserves_order() {
        let content = r#"{"name":"pipeline","version":"1.2.3","private":true}"#;
        let out = set_manifest_version(content, "1.3.0").unwrap();
        assert_eq!(
            out,
            "{\n  \"name\": \"pipeline\",\n  \"version\": \"1.3.0\",\n  \"private\": true\n}\n"
        );
    }

    #[test]
    fn test_set_manifest_version_adds_missing_field() {
        let out = set_manifest_version(r#"{"name":"x"}"#, "0.1.0").unwrap();
        assert!(out.contains("\"version\": \"0.1.0\""));
    }

    #[test]
    fn test_manifest_must_be_object() {
        assert!(set_manifest_version("[]", "1.0.0").is_err());
        assert!(matches!(
            set_manifest_version("not json", "1.0.0"),
            Err(PublishError::Manifest(_))
        ));
    }

    #[test]
    fn test_rewrite_manifest_simulated() {
        let mut runner = MockRunner::new(WriteMode::Simulate);
        runner.add_file("package.json", "{\"version\": \"1.0.0\"}");

        assert!(rewrite_manifest(&runner, Path::new("package.json"), "1.1.0").unwrap());
        assert_eq!(runner.file("package.json").unwrap(), "{\"version\": \"1.0.0\"}");
    }
}
