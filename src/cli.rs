//! CLI argument definitions for the triphonon packager.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use crate::installer::InstallAction;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Resolve the triphonon build configuration and drive a packaging backend.
#[derive(Parser, Debug)]
#[command(name = "triphonon-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Resolve the triphonon build configuration and drive a packaging backend.\n\n",
    "The packager inspects CC and the host platform to select linker arguments, ",
    "sanitizes the dependency search path, assembles the descriptors for the two ",
    "native extensions, and resolves the package version from the source tree. ",
    "The resulting manifest is handed to the sciforge backend, or to ",
    "sciforge-legacy when sciforge is not available.\n\n",
    "Use --dry-run to inspect the resolved configuration without invoking ",
    "any backend.",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub options: CommonArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Compile both native extensions without installing.
    Build,
    /// Build and install extensions, packages, and scripts.
    Install,
    /// Produce a source distribution archive.
    Sdist,
}

impl Command {
    /// The backend action this subcommand dispatches.
    #[must_use]
    pub const fn action(self) -> InstallAction {
        match self {
            Self::Build => InstallAction::Build,
            Self::Install => InstallAction::Install,
            Self::Sdist => InstallAction::Sdist,
        }
    }
}

/// Options shared by all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// Source tree root containing the version declaration.
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub source_dir: Utf8PathBuf,

    /// Show the resolved configuration and exit without invoking a backend.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Define the timings instrumentation macro in both extensions.
    #[arg(long, global = true)]
    pub timings: bool,

    /// Increase diagnostic verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet",
        global = true
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity", global = true)]
    pub quiet: bool,
}

impl Default for CommonArgs {
    /// Creates a `CommonArgs` instance with all flags disabled and the
    /// current directory as source tree. Useful for tests and programmatic
    /// construction.
    fn default() -> Self {
        Self {
            source_dir: Utf8PathBuf::from("."),
            dry_run: false,
            timings: false,
            verbosity: 0,
            quiet: false,
        }
    }
}
