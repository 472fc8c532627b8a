//! Packaging backend selection and invocation.
//!
//! The packager never builds anything itself; it stages the manifest as JSON
//! and hands it to an external backend. The preferred backend is probed
//! first and the legacy one used when it does not respond. Which backend was
//! selected is reported for diagnostics only; both dispatch paths build
//! their argument vector through one shared function so they cannot drift
//! apart.

use crate::error::{PackagerError, Result};
use crate::manifest::PackageManifest;
use crate::toolchain::CFLAGS_ENV;
use std::fmt;
use std::io::Write as _;
use std::process::{Command, Output};

/// Program name of the preferred packaging backend.
pub const PREFERRED_BACKEND: &str = "sciforge";

/// Program name of the legacy fallback backend.
pub const LEGACY_BACKEND: &str = "sciforge-legacy";

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs a command with arguments and environment overrides, returning
    /// the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning the command.
    fn run(&self, cmd: &str, args: &[String], env: &[(String, String)]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[String], env: &[(String, String)]) -> Result<Output> {
        let mut command = Command::new(cmd);
        command.args(args);
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().map_err(PackagerError::from)
    }
}

/// The backend selected by the capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The preferred backend responded.
    Preferred,
    /// Fallback when the preferred backend is absent.
    Legacy,
}

impl BackendKind {
    /// Program name dispatched to for this backend.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Preferred => PREFERRED_BACKEND,
            Self::Legacy => LEGACY_BACKEND,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// The backend subcommand to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    /// Compile the extensions without installing.
    Build,
    /// Build and install extensions, packages, and scripts.
    Install,
    /// Produce a source distribution archive.
    Sdist,
}

impl InstallAction {
    /// The subcommand string passed to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Install => "install",
            Self::Sdist => "sdist",
        }
    }
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probe for an available backend, preferred first.
///
/// A backend is available when its `--version` invocation succeeds.
///
/// # Errors
///
/// Returns [`PackagerError::BackendUnavailable`] when neither backend
/// responds.
pub fn select_backend(executor: &dyn CommandExecutor) -> Result<BackendKind> {
    if backend_responds(executor, PREFERRED_BACKEND) {
        return Ok(BackendKind::Preferred);
    }
    log::debug!("{PREFERRED_BACKEND} did not respond; probing {LEGACY_BACKEND}");
    if backend_responds(executor, LEGACY_BACKEND) {
        return Ok(BackendKind::Legacy);
    }
    Err(PackagerError::BackendUnavailable)
}

fn backend_responds(executor: &dyn CommandExecutor, program: &str) -> bool {
    executor
        .run(program, &["--version".to_owned()], &[])
        .is_ok_and(|output| output.status.success())
}

/// The abstraction over the two packaging entry points.
///
/// Selection happens once; afterwards the call site carries no branching.
pub struct InstallerFacade<'a> {
    backend: BackendKind,
    executor: &'a dyn CommandExecutor,
}

impl<'a> InstallerFacade<'a> {
    /// Select an available backend and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error when neither backend responds to the probe.
    pub fn select(executor: &'a dyn CommandExecutor) -> Result<Self> {
        Ok(Self {
            backend: select_backend(executor)?,
            executor,
        })
    }

    /// Wrap an explicit backend, bypassing the probe.
    #[must_use]
    pub const fn with_backend(backend: BackendKind, executor: &'a dyn CommandExecutor) -> Self {
        Self { backend, executor }
    }

    /// The backend this façade dispatches to.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Invoke the selected backend exactly once with the manifest.
    ///
    /// The manifest is serialized to a temporary JSON file whose path is
    /// passed to the backend. The scrubbed `CFLAGS` value, when present, is
    /// exported into the backend's environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the manifest cannot be staged or the backend
    /// exits with a failure status.
    pub fn install(
        &self,
        manifest: &PackageManifest,
        action: InstallAction,
        cflags: Option<&str>,
    ) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("triphonon-manifest-")
            .suffix(".json")
            .tempfile()?;
        let payload = serde_json::to_vec_pretty(manifest)?;
        file.write_all(&payload)?;
        file.flush()?;

        let manifest_path =
            file.path()
                .to_str()
                .ok_or_else(|| PackagerError::ManifestStaging {
                    reason: "manifest path is not valid UTF-8".to_owned(),
                })?;
        let args = backend_args(action, manifest_path);
        let env: Vec<(String, String)> = cflags
            .map(|value| vec![(CFLAGS_ENV.to_owned(), value.to_owned())])
            .unwrap_or_default();

        log::debug!("invoking {} {}", self.backend.program(), args.join(" "));
        let output = self.executor.run(self.backend.program(), &args, &env)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(PackagerError::BackendFailed {
                backend: self.backend.program(),
                message: stderr_message(&output),
            })
        }
    }
}

/// Arguments passed to whichever backend is selected.
///
/// Shared by both dispatch paths; only the program name differs between
/// them.
fn backend_args(action: InstallAction, manifest_path: &str) -> [String; 3] {
    [
        action.as_str().to_owned(),
        "--manifest".to_owned(),
        manifest_path.to_owned(),
    ]
}

fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "unknown error".to_owned()
    } else {
        trimmed.to_owned()
    }
}
