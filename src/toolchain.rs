//! Toolchain and platform resolution.
//!
//! This module classifies the active C compiler from the `CC` environment
//! variable and the host platform, and derives the linker arguments for
//! OpenMP and BLAS/LAPACK from that profile. It also provides the `CFLAGS`
//! scrub applied before the flags are re-exported to the packaging backend.

use camino::Utf8PathBuf;
use std::fmt;

/// Environment variable naming the active C compiler.
pub const CC_ENV: &str = "CC";

/// Environment variable carrying the C compiler flags.
pub const CFLAGS_ENV: &str = "CFLAGS";

/// Flag token rejected by a defective toolchain configuration; it is
/// stripped from `CFLAGS` before the flags reach the backend.
pub const REJECTED_CFLAG: &str = "-Werror=declaration-after-statement";

/// Linker argument enabling the GNU OpenMP runtime.
pub const OPENMP_LINK_ARG: &str = "-lgomp";

/// Default LAPACK/BLAS linker arguments used on non-Darwin platforms.
pub const LAPACK_LINK_ARGS: &[&str] = &["-llapacke", "-llapack", "-lblas"];

/// Static OpenBLAS archive used instead of the default triplet on Darwin.
pub const DARWIN_OPENBLAS_ARCHIVE: &str = "/opt/local/lib/libopenblas.a";

/// Extra include directory contributed on Darwin.
pub const DARWIN_INCLUDE_DIR: &str = "/opt/local/include";

/// Classification of the active C compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    /// `CC` is unset or matches no known compiler.
    Unspecified,
    /// `CC` contains `gcc`.
    Gcc,
    /// `CC` contains `clang` (and not `gcc`).
    Clang,
}

impl Compiler {
    /// Classify a `CC` value by substring match.
    ///
    /// The `gcc` check is evaluated after the `clang` check, so a value
    /// containing both substrings classifies as [`Compiler::Gcc`].
    #[must_use]
    pub fn classify(cc: Option<&str>) -> Self {
        let Some(cc) = cc else {
            return Self::Unspecified;
        };
        let mut compiler = Self::Unspecified;
        if cc.contains("clang") {
            compiler = Self::Clang;
        }
        if cc.contains("gcc") {
            compiler = Self::Gcc;
        }
        compiler
    }

    /// Whether the OpenMP link argument is emitted for this compiler.
    ///
    /// GCC and unspecified compilers link `-lgomp`; clang does not.
    #[must_use]
    pub const fn wants_openmp(self) -> bool {
        !matches!(self, Self::Clang)
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unspecified => "unspecified",
            Self::Gcc => "gcc",
            Self::Clang => "clang",
        };
        write!(f, "{label}")
    }
}

/// Classification of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS.
    Darwin,
    /// Everything else.
    Other,
}

impl Platform {
    /// Classify an OS family identifier by exact match against `Darwin`.
    #[must_use]
    pub fn classify(system: &str) -> Self {
        if system == "Darwin" {
            Self::Darwin
        } else {
            Self::Other
        }
    }

    /// Classification of the build host.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(target_os = "macos") {
            Self::Darwin
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Darwin => "Darwin",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// Resolved identity of the active compiler and host platform.
///
/// Derived once per invocation; both extension descriptors take their linker
/// arguments from the same profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolchainProfile {
    /// The classified compiler.
    pub compiler: Compiler,
    /// The classified platform.
    pub platform: Platform,
}

impl ToolchainProfile {
    /// Create a profile from explicit classifications.
    #[must_use]
    pub const fn new(compiler: Compiler, platform: Platform) -> Self {
        Self { compiler, platform }
    }

    /// Derive the profile from `CC` and the build host.
    #[must_use]
    pub fn from_env() -> Self {
        let cc = std::env::var(CC_ENV).ok();
        Self::new(Compiler::classify(cc.as_deref()), Platform::host())
    }

    /// The ordered linker arguments for both extensions: the OpenMP argument
    /// when the compiler calls for it, followed by the LAPACK/BLAS set.
    #[must_use]
    pub fn link_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.compiler.wants_openmp() {
            args.push(OPENMP_LINK_ARG.to_owned());
        }
        args.extend(self.lapack_link_args());
        args
    }

    /// The LAPACK/BLAS linker arguments for this platform.
    ///
    /// On Darwin the static OpenBLAS archive replaces the default triplet
    /// entirely.
    #[must_use]
    pub fn lapack_link_args(&self) -> Vec<String> {
        match self.platform {
            Platform::Darwin => vec![DARWIN_OPENBLAS_ARCHIVE.to_owned()],
            Platform::Other => LAPACK_LINK_ARGS.iter().map(|&arg| arg.to_owned()).collect(),
        }
    }

    /// Platform-specific include directories contributed to both extensions.
    #[must_use]
    pub fn extra_include_dirs(&self) -> Vec<Utf8PathBuf> {
        match self.platform {
            Platform::Darwin => vec![Utf8PathBuf::from(DARWIN_INCLUDE_DIR)],
            Platform::Other => Vec::new(),
        }
    }
}

/// Remove the rejected flag token, preserving every other token in order.
#[must_use]
pub fn scrub_cflags(flags: &str) -> String {
    flags
        .split_whitespace()
        .filter(|&token| token != REJECTED_CFLAG)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `CFLAGS` value to export to the backend invocation.
///
/// Returns the variable unchanged when the rejected token is absent, the
/// scrubbed value when it is present, and `None` when the variable is unset.
#[must_use]
pub fn backend_cflags() -> Option<String> {
    let flags = std::env::var(CFLAGS_ENV).ok()?;
    if flags.contains(REJECTED_CFLAG) {
        Some(scrub_cflags(&flags))
    } else {
        Some(flags)
    }
}
