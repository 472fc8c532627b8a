//! Configuration resolution pipeline.
//!
//! Runs the resolution stages in order (search-path sanitization,
//! toolchain/platform resolution, descriptor assembly, version resolution,
//! manifest assembly) and threads each stage's output to the next as an
//! explicit value. No stage mutates global state, and no packaging backend
//! is touched here, so every fatal condition surfaces before the single
//! backend invocation.

use crate::error::Result;
use crate::extension::{AssemblyInputs, assemble_extensions};
use crate::manifest::{PackageManifest, package_manifest};
use crate::search_path;
use crate::toolchain::{ToolchainProfile, backend_cflags};
use crate::version::{VersionSpec, resolve_version};
use camino::Utf8PathBuf;

/// Options controlling one resolution run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Source tree root containing the version declaration.
    pub source_dir: Utf8PathBuf,
    /// Whether to define the timings instrumentation macro.
    pub timings: bool,
}

/// The fully resolved build configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Sanitized dependency search path.
    pub search_path: Vec<Utf8PathBuf>,
    /// Resolved toolchain profile.
    pub profile: ToolchainProfile,
    /// Resolved package version.
    pub version: VersionSpec,
    /// The manifest handed to the packaging backend.
    pub manifest: PackageManifest,
    /// `CFLAGS` value to export to the backend, already scrubbed.
    pub cflags: Option<String>,
}

/// Resolve the complete build configuration.
///
/// Reads the environment (`CC`, `CFLAGS`, the search-path variable) and the
/// version declaration under `options.source_dir`; performs no other I/O.
///
/// # Errors
///
/// Returns an error when the version declaration is missing, unreadable, or
/// incomplete.
pub fn resolve(options: &BuildOptions) -> Result<ResolvedConfig> {
    let search_path = search_path::search_path_from_env();
    let profile = ToolchainProfile::from_env();
    log::debug!(
        "resolved toolchain: compiler={}, platform={}",
        profile.compiler,
        profile.platform
    );

    let inputs = AssemblyInputs {
        profile: &profile,
        include_roots: &search_path,
        timings: options.timings,
    };
    let extensions = assemble_extensions(&inputs);

    let version = resolve_version(&options.source_dir)?;
    let manifest = package_manifest(&version, extensions);
    let cflags = backend_cflags();

    Ok(ResolvedConfig {
        search_path,
        profile,
        version,
        manifest,
        cflags,
    })
}
