//! End-to-end CLI behaviour tests for `triphonon-packager`.
//!
//! These scenarios invoke the packager binary and validate dry-run output,
//! version resolution against a real source tree, and error handling when
//! no packaging backend is on the PATH.

use rstest::rstest;
use std::process::{Command, Output};
use tempfile::TempDir;

const VERSION_FILE: &str = "triphonon/version.py";
const BUILD_COUNTER_FILE: &str = "build_number.txt";

/// A temporary source tree with a version declaration.
struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    fn new(version_line: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("triphonon"))
            .expect("failed to create package dir");
        std::fs::write(dir.path().join(VERSION_FILE), format!("{version_line}\n"))
            .expect("failed to write version file");
        Self { dir }
    }

    fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    fn with_build_counter(self, contents: &str) -> Self {
        std::fs::write(self.dir.path().join(BUILD_COUNTER_FILE), contents)
            .expect("failed to write build counter");
        self
    }

    fn path(&self) -> &str {
        self.dir.path().to_str().expect("temp dir not UTF-8")
    }
}

/// Runs the packager with a controlled environment.
///
/// The search-path and CFLAGS variables are removed so ambient developer
/// configuration cannot leak into assertions; the compiler is pinned unless
/// a scenario overrides it.
fn run_packager(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_triphonon-packager"));
    cmd.args(args);
    cmd.env_remove("TRIPHONON_SEARCH_PATH");
    cmd.env_remove("CFLAGS");
    cmd.env("CC", "gcc");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run triphonon-packager")
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, stderr: {}",
        stderr_text(output)
    );
}

fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure, stdout: {}, stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        stderr_text(output)
    );
}

#[test]
fn dry_run_reports_resolved_configuration() {
    let tree = SourceTree::new("__version__ = \"1.2.3\"");
    let output = run_packager(&["build", "--source-dir", tree.path(), "--dry-run"], &[]);

    assert_success(&output);
    let stderr = stderr_text(&output);
    assert!(stderr.contains("Dry run - no backend will be invoked"));
    assert!(stderr.contains("Action: build"));
    assert!(stderr.contains("Resolved version: 1.2.3"));
    assert!(stderr.contains("triphonon._triphonon"));
    assert!(stderr.contains("triphonon._lapacke"));
}

#[test]
fn dry_run_appends_build_counter_as_fourth_component() {
    let tree = SourceTree::new("__version__ = \"1.2.3\"").with_build_counter("42\n");
    let output = run_packager(&["build", "--source-dir", tree.path(), "--dry-run"], &[]);

    assert_success(&output);
    assert!(stderr_text(&output).contains("Resolved version: 1.2.3.42"));
}

#[rstest]
#[case::unparsable("not-a-number\n")]
#[case::zero("0\n")]
#[case::blank("\n")]
fn dry_run_ignores_unusable_build_counter(#[case] counter: &str) {
    let tree = SourceTree::new("__version__ = \"1.2.3\"").with_build_counter(counter);
    let output = run_packager(&["build", "--source-dir", tree.path(), "--dry-run"], &[]);

    assert_success(&output);
    let stderr = stderr_text(&output);
    assert!(stderr.contains("Resolved version: 1.2.3\n"));
    assert!(!stderr.contains("1.2.3."));
}

#[test]
fn missing_version_declaration_is_fatal() {
    let tree = SourceTree::new("# placeholder, no assignment");
    let output = run_packager(&["build", "--source-dir", tree.path(), "--dry-run"], &[]);

    assert_failure(&output);
    let stderr = stderr_text(&output);
    assert!(
        stderr.contains("__version__"),
        "unexpected stderr: {stderr}"
    );
    assert!(!stderr.contains("Dry run"));
}

#[test]
fn unreadable_version_file_is_fatal() {
    let tree = SourceTree::empty();
    let output = run_packager(&["build", "--source-dir", tree.path(), "--dry-run"], &[]);

    assert_failure(&output);
    assert!(stderr_text(&output).contains("could not read version declaration"));
}

#[rstest]
#[case::gcc("gcc", true)]
#[case::clang("clang", false)]
#[case::apple_clang("/usr/bin/clang", false)]
fn compiler_choice_controls_openmp_link_arg(#[case] cc: &str, #[case] expect_gomp: bool) {
    let tree = SourceTree::new("__version__ = \"1.2.3\"");
    let output = run_packager(
        &["build", "--source-dir", tree.path(), "--dry-run"],
        &[("CC", cc)],
    );

    assert_success(&output);
    let stderr = stderr_text(&output);
    assert_eq!(
        stderr.contains("-lgomp"),
        expect_gomp,
        "unexpected link args for CC={cc}: {stderr}"
    );
}

#[test]
fn search_path_is_sanitized_before_display() {
    let tree = SourceTree::new("__version__ = \"1.2.3\"");
    let output = run_packager(
        &["build", "--source-dir", tree.path(), "--dry-run"],
        &[(
            "TRIPHONON_SEARCH_PATH",
            "/opt/deps/include:/usr/local/include",
        )],
    );

    assert_success(&output);
    let stderr = stderr_text(&output);
    assert!(stderr.contains("- /opt/deps/include"));
    assert!(!stderr.contains("/usr/local/include"));
}

#[test]
fn install_without_any_backend_fails_with_guidance() {
    let tree = SourceTree::new("__version__ = \"1.2.3\"");
    // An empty PATH guarantees neither backend can be spawned.
    let output = run_packager(
        &["install", "--source-dir", tree.path()],
        &[("PATH", "")],
    );

    assert_failure(&output);
    let stderr = stderr_text(&output);
    assert!(
        stderr.contains("no packaging backend available"),
        "unexpected stderr: {stderr}"
    );
}
