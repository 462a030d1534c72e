//! End-to-end tests for rangeup CLI
//!
//! These tests verify:
//! - Dry-run mode leaves the manifest unchanged
//! - `-u` rewrites only the upgraded value tokens
//! - CLI produces the expected JSON output
//! - Exit codes and messages for fatal errors

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PACKAGE_JSON: &str = r#"{
  "name": "test-project",
  "version": "1.0.0",
  "packageManager": "pnpm@8.6.0",
  "dependencies": {
    "lodash": "^4.17.0",
    "react": "^18.2.0",
    "foo": "npm:foo@^1.0.0"
  },
  "devDependencies": {
    "typescript": "~5.0.0",
    "@types/node": "20.1.0"
  },
  "overrides": {
    "lodash": "^4.17.0"
  }
}
"#;

const REGISTRY_JSON: &str = r#"{
  "lodash": "4.17.21",
  "react": "18.2.0",
  "foo": "2.0.0",
  "typescript": "5.4.5",
  "@types/node": "20.11.0",
  "pnpm": "9.1.0"
}"#;

/// Create a test directory with a manifest and a static registry
fn create_test_project() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let manifest = temp_dir.path().join("package.json");
    let registry = temp_dir.path().join("registry.json");
    fs::write(&manifest, PACKAGE_JSON).unwrap();
    fs::write(&registry, REGISTRY_JSON).unwrap();
    (temp_dir, manifest, registry)
}

fn rangeup() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rangeup"));
    cmd.env("NO_COLOR", "1").env_remove("RANGEUP_LOG");
    cmd
}

mod dry_run_tests {
    use super::*;

    /// Test that dry-run mode does not modify the manifest
    #[test]
    fn test_dry_run_leaves_file_unchanged() {
        let (_dir, manifest, registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .assert()
            .success()
            .stdout(predicate::str::contains("lodash"))
            .stdout(predicate::str::contains("^4.17.21"))
            .stdout(predicate::str::contains("Run with -u"));

        assert_eq!(fs::read_to_string(&manifest).unwrap(), PACKAGE_JSON);
    }

    #[test]
    fn test_kept_packages_hidden_unless_verbose() {
        let (_dir, manifest, registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .assert()
            .success()
            .stdout(predicate::str::contains("react").not());

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .arg("--verbose")
            .assert()
            .success()
            .stdout(predicate::str::contains("(latest 18.2.0)"))
            .stderr(predicate::str::contains("Mode: dry-run"));
    }
}

mod color_tests {
    use super::*;

    #[test]
    fn test_no_color_flag_overrides_forced_color() {
        let (_dir, manifest, registry) = create_test_project();

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_rangeup"));
        cmd.env_remove("NO_COLOR")
            .env("CLICOLOR_FORCE", "1")
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("lodash"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

mod upgrade_tests {
    use super::*;

    #[test]
    fn test_upgrade_rewrites_values_only() {
        let (_dir, manifest, registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .arg("-u")
            .assert()
            .success()
            .stdout(predicate::str::contains("written to"));

        let expected = PACKAGE_JSON
            .replace("pnpm@8.6.0", "pnpm@9.1.0")
            .replace("\"^4.17.0\"", "\"^4.17.21\"")
            .replace("npm:foo@^1.0.0", "npm:foo@^2.0.0")
            .replace("~5.0.0", "~5.4.5")
            .replace("20.1.0", "20.11.0");
        assert_eq!(fs::read_to_string(&manifest).unwrap(), expected);
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let (_dir, manifest, registry) = create_test_project();

        for _ in 0..2 {
            rangeup()
                .arg(&manifest)
                .arg("--registry")
                .arg(&registry)
                .arg("-u")
                .assert()
                .success();
        }

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "All dependencies match the latest versions.",
            ));
    }

    #[test]
    fn test_dep_and_reject() {
        let (_dir, manifest, registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .args(["--dep", "dev", "--reject", "@types/*", "-u"])
            .assert()
            .success();

        let content = fs::read_to_string(&manifest).unwrap();
        assert!(content.contains(r#""typescript": "~5.4.5""#));
        assert!(content.contains(r#""@types/node": "20.1.0""#));
        assert!(content.contains(r#""lodash": "^4.17.0""#));
        assert!(content.contains("pnpm@8.6.0"));
    }

    #[test]
    fn test_remove_range() {
        let (_dir, manifest, registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .args(["--filter", "lodash", "--remove-range", "-u"])
            .assert()
            .success();

        let content = fs::read_to_string(&manifest).unwrap();
        assert_eq!(content.matches(r#""lodash": "4.17.21""#).count(), 2);
    }
}

mod json_output_tests {
    use super::*;

    #[test]
    fn test_json_output_schema() {
        let (_dir, manifest, registry) = create_test_project();

        let output = rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let upgraded = json["upgraded"].as_object().unwrap();
        assert_eq!(upgraded["lodash"], "^4.17.21");
        assert_eq!(upgraded["foo"], "npm:foo@^2.0.0");
        assert_eq!(upgraded["pnpm"], "9.1.0");
        assert!(!upgraded.contains_key("react"));
    }

    #[test]
    fn test_json_output_at_tag_target() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("package.json");
        let registry = temp_dir.path().join("registry.json");
        fs::write(&manifest, r#"{ "dependencies": { "next": "14.0.0-canary.1" } }"#).unwrap();
        fs::write(&registry, r#"{ "next": "13.5.6" }"#).unwrap();

        let latest = rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .arg("--json")
            .output()
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&latest.stdout).unwrap();
        assert!(json["upgraded"].as_object().unwrap().is_empty());

        let tagged = rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .args(["--json", "--target", "@latest"])
            .output()
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&tagged.stdout).unwrap();
        assert_eq!(json["upgraded"]["next"], "13.5.6");
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_help() {
        rangeup()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--registry"));
    }

    #[test]
    fn test_exit_code_version() {
        rangeup()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_missing_registry_option() {
        let (_dir, manifest, _registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .assert()
            .failure()
            .stderr(predicate::str::contains("--registry"));
    }

    #[test]
    fn test_missing_registry_file() {
        let (dir, manifest, _registry) = create_test_project();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(dir.path().join("nope.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "the specified static registry file does not exist",
            ));
    }

    #[test]
    fn test_nonexistent_manifest() {
        let (dir, _manifest, registry) = create_test_project();

        rangeup()
            .arg(dir.path().join("missing/package.json"))
            .arg("--registry")
            .arg(&registry)
            .assert()
            .failure()
            .stderr(predicate::str::contains("manifest file not found"));
    }

    #[test]
    fn test_invalid_manifest_json() {
        let (_dir, manifest, registry) = create_test_project();
        fs::write(&manifest, "{ not json").unwrap();

        rangeup()
            .arg(&manifest)
            .arg("--registry")
            .arg(&registry)
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse JSON"));
    }
}
