//! Output formatting for the packager CLI.
//!
//! All progress and diagnostics go to stderr; nothing is printed on stdout.

use crate::installer::{BackendKind, InstallAction};
use crate::pipeline::ResolvedConfig;
use camino::Utf8Path;
use std::io::Write;

/// Write one line to the given stream, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Diagnostic notice naming the selected backend.
#[must_use]
pub fn backend_notice(backend: BackendKind) -> String {
    format!("{backend} is used.")
}

/// Format the success message for a completed backend invocation.
#[must_use]
pub fn success_message(action: InstallAction, version: &str) -> String {
    format!("Successfully ran {action} for triphonon {version}")
}

/// Resolved-configuration report for dry runs.
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// The resolved configuration.
    pub config: &'a ResolvedConfig,
    /// The action that would have been dispatched.
    pub action: InstallAction,
    /// Source tree root the configuration was resolved from.
    pub source_dir: &'a Utf8Path,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let config = self.config;
        let mut lines = vec![
            "Dry run - no backend will be invoked".to_owned(),
            String::new(),
            format!("Action: {}", self.action),
            format!("Source directory: {}", self.source_dir),
            format!("Compiler: {}", config.profile.compiler),
            format!("Platform: {}", config.profile.platform),
            format!("Link args: {}", config.profile.link_args().join(" ")),
            format!("Resolved version: {}", config.version),
        ];

        if let Some(cflags) = &config.cflags {
            lines.push(format!("CFLAGS override: {cflags}"));
        }

        lines.push(String::new());
        lines.push("Search path:".to_owned());
        if config.search_path.is_empty() {
            lines.push("  (empty)".to_owned());
        }
        for entry in &config.search_path {
            lines.push(format!("  - {entry}"));
        }

        lines.push(String::new());
        lines.push("Extensions:".to_owned());
        for extension in &config.manifest.extensions {
            lines.push(format!(
                "  - {} ({} sources)",
                extension.module_name,
                extension.sources.len()
            ));
        }

        lines.join("\n")
    }
}
