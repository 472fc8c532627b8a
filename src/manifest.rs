//! Final package manifest assembly.
//!
//! The manifest is the declarative unit handed to the packaging backend: it
//! aggregates package metadata, the package/script lists, and both extension
//! descriptors with the resolved version.

use crate::extension::ExtensionSpec;
use crate::version::VersionSpec;
use serde::Serialize;

/// Distribution package name.
pub const PACKAGE_NAME: &str = "triphonon";

/// One-line package description.
pub const DESCRIPTION: &str = "Anharmonic lattice dynamics extension suite";

/// Package author.
pub const AUTHOR: &str = "Triphonon developers";

/// Author contact address.
pub const AUTHOR_EMAIL: &str = "maintainers@triphonon.dev";

/// Project URL.
pub const URL: &str = "https://triphonon.dev";

/// Installable pure packages.
pub const PACKAGES: &[&str] = &[
    "triphonon",
    "triphonon.cli",
    "triphonon.harmonic",
    "triphonon.anharmonic",
    "triphonon.other",
];

/// Runtime dependencies declared to the backend.
pub const REQUIRES: &[&str] = &["numpy", "pyyaml", "matplotlib", "h5py"];

/// Packages this distribution provides.
pub const PROVIDES: &[&str] = &["triphonon"];

/// Installable entry-point scripts.
pub const SCRIPTS: &[&str] = &[
    "scripts/triphonon",
    "scripts/triphonon-kaccum",
    "scripts/triphonon-kdeplot",
];

/// The complete installable unit passed to the packaging backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    /// Distribution name.
    pub name: String,
    /// Resolved version string (3 or 4 dot-joined components).
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Author name.
    pub author: String,
    /// Author contact address.
    pub author_email: String,
    /// Project URL.
    pub url: String,
    /// Pure package list.
    pub packages: Vec<String>,
    /// Declared runtime dependencies.
    pub requires: Vec<String>,
    /// Provided packages.
    pub provides: Vec<String>,
    /// Entry-point scripts.
    pub scripts: Vec<String>,
    /// Both native extension descriptors.
    pub extensions: Vec<ExtensionSpec>,
}

/// Assemble the manifest from the resolved version and extension descriptors.
#[must_use]
pub fn package_manifest(version: &VersionSpec, extensions: Vec<ExtensionSpec>) -> PackageManifest {
    PackageManifest {
        name: PACKAGE_NAME.to_owned(),
        version: version.to_string(),
        description: DESCRIPTION.to_owned(),
        author: AUTHOR.to_owned(),
        author_email: AUTHOR_EMAIL.to_owned(),
        url: URL.to_owned(),
        packages: owned(PACKAGES),
        requires: owned(REQUIRES),
        provides: owned(PROVIDES),
        scripts: owned(SCRIPTS),
        extensions,
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|&value| value.to_owned()).collect()
}
