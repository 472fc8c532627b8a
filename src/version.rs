//! Version resolution from the on-disk declaration.
//!
//! The package version lives in a line-oriented declaration file as a
//! `__version__ = "X.Y.Z"` assignment. Continuous-integration tooling may
//! additionally drop a build-counter file next to it; a non-zero counter is
//! appended as a fourth version component so automated releases get unique
//! versions. An incomplete declaration is fatal; a malformed counter is not.

use crate::error::{PackagerError, Result};
use camino::Utf8Path;
use std::fmt;

/// Marker identifying the version assignment line.
pub const VERSION_MARKER: &str = "__version__";

/// Declaration file, relative to the source tree root.
pub const VERSION_FILE: &str = "triphonon/version.py";

/// Optional CI-injected build counter, relative to the source tree root.
pub const BUILD_COUNTER_FILE: &str = "build_number.txt";

/// A resolved semantic version, optionally extended with a build counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSpec {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
    /// Patch version component.
    pub patch: u32,
    /// Optional CI build counter; present only when non-zero.
    pub build: Option<u32>,
}

impl VersionSpec {
    /// Create a three-component version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build: None,
        }
    }

    /// Extend the version with a build counter.
    #[must_use]
    pub const fn with_build(self, build: u32) -> Self {
        Self {
            build: Some(build),
            ..self
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
        }
        Ok(())
    }
}

/// Parse the version declaration from whole file content.
///
/// Scans for the first line containing [`VERSION_MARKER`], takes the value
/// of its assignment, and parses the dot-separated components.
///
/// # Errors
///
/// Returns an error when no marker line exists, when the declaration is not
/// an assignment, or when the value does not consist of exactly three
/// integer components.
pub fn parse_version(text: &str) -> Result<VersionSpec> {
    let line = text
        .lines()
        .find(|line| line.contains(VERSION_MARKER))
        .ok_or(PackagerError::VersionDeclarationNotFound)?;
    let value = declaration_value(line)?;

    let components = value
        .split('.')
        .map(parse_component)
        .collect::<Result<Vec<u32>>>()?;

    match components.as_slice() {
        &[major, minor, patch] => Ok(VersionSpec::new(major, minor, patch)),
        short if short.len() < 3 => Err(PackagerError::VersionIncomplete { found: short.len() }),
        long => Err(PackagerError::VersionMalformed {
            reason: format!("{} components; expected 3", long.len()),
        }),
    }
}

/// Parse the build counter from whole file content.
///
/// Only the first line is considered. Any parse failure, including an empty
/// file, degrades to zero rather than failing the build.
#[must_use]
pub fn parse_build_counter(text: &str) -> u32 {
    text.lines()
        .next()
        .and_then(|line| line.trim().parse().ok())
        .unwrap_or(0)
}

/// Resolve the package version from the source tree.
///
/// Reads [`VERSION_FILE`], then appends a non-zero counter from
/// [`BUILD_COUNTER_FILE`] when that file exists. A missing or unreadable
/// counter file yields the three-component version.
///
/// # Errors
///
/// Returns an error when the declaration file cannot be read or does not
/// contain a complete version.
pub fn resolve_version(source_dir: &Utf8Path) -> Result<VersionSpec> {
    let declaration_path = source_dir.join(VERSION_FILE);
    let text = std::fs::read_to_string(&declaration_path).map_err(|source| {
        PackagerError::VersionFileUnreadable {
            path: declaration_path.clone(),
            source,
        }
    })?;
    let version = parse_version(&text)?;

    let counter_path = source_dir.join(BUILD_COUNTER_FILE);
    if !counter_path.exists() {
        return Ok(version);
    }
    let Ok(counter_text) = std::fs::read_to_string(&counter_path) else {
        return Ok(version);
    };
    match parse_build_counter(&counter_text) {
        0 => Ok(version),
        counter => Ok(version.with_build(counter)),
    }
}

/// Extract the quoted value from a `name = "value"` assignment line.
fn declaration_value(line: &str) -> Result<&str> {
    let (_, value) = line
        .split_once('=')
        .ok_or_else(|| PackagerError::VersionMalformed {
            reason: "declaration is not an assignment".to_owned(),
        })?;
    Ok(value.trim().trim_matches('"'))
}

fn parse_component(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| PackagerError::VersionMalformed {
            reason: format!("component {token:?} is not a non-negative integer"),
        })
}
