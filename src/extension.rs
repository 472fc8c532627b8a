//! Native extension descriptor assembly.
//!
//! Two extensions are described: the primary `triphonon._triphonon` module,
//! covering the full anharmonic machinery, and the companion
//! `triphonon._lapacke` module, restricted to the harmonic sources. The
//! harmonic group is compiled independently into each extension; there is no
//! binary sharing between the two. Both descriptors take their compile and
//! link arguments from the same toolchain profile.

use crate::toolchain::ToolchainProfile;
use camino::Utf8PathBuf;
use serde::Serialize;

/// Module name of the primary extension.
pub const PRIMARY_MODULE: &str = "triphonon._triphonon";

/// Module name of the companion extension.
pub const COMPANION_MODULE: &str = "triphonon._lapacke";

/// Top-level glue source of the primary extension.
pub const PRIMARY_GLUE_SOURCE: &str = "c/_triphonon.c";

/// Top-level glue source of the companion extension.
pub const COMPANION_GLUE_SOURCE: &str = "c/_lapacke.c";

/// Harmonic dynamics sources, shared by both extensions.
pub const HARMONIC_SOURCES: &[&str] = &[
    "c/harmonic/dynmat.c",
    "c/harmonic/phonon.c",
    "c/harmonic/phonon_array.c",
    "c/harmonic/phonon_utils.c",
    "c/harmonic/lapack_wrapper.c",
];

/// Anharmonic third-order interaction sources.
pub const ANHARMONIC_SOURCES: &[&str] = &[
    "c/anharmonic/fc3.c",
    "c/anharmonic/interaction.c",
    "c/anharmonic/real_to_reciprocal.c",
    "c/anharmonic/reciprocal_to_normal.c",
    "c/anharmonic/frequency_shift.c",
    "c/anharmonic/imag_self_energy.c",
    "c/anharmonic/imag_self_energy_with_g.c",
    "c/anharmonic/collision_matrix.c",
    "c/anharmonic/isotope.c",
];

/// Triplet and k-point sampling sources.
pub const TRIPLET_SOURCES: &[&str] = &[
    "c/triplet/triplet.c",
    "c/triplet/triplet_kpoint.c",
    "c/triplet/triplet_iw.c",
];

/// Symmetry utility sources.
pub const SYMMETRY_SOURCES: &[&str] = &["c/symmetry/mathfunc.c", "c/symmetry/kpoint.c"];

/// Tetrahedron-method integration sources.
pub const TETRAHEDRON_SOURCES: &[&str] =
    &["c/tetrahedron/kgrid.c", "c/tetrahedron/tetrahedron_method.c"];

/// Header directory for the harmonic sources.
pub const HARMONIC_INCLUDE_DIR: &str = "c/harmonic_h";

/// Header directory for the anharmonic sources.
pub const ANHARMONIC_INCLUDE_DIR: &str = "c/anharmonic_h";

/// Header directory for the symmetry utilities.
pub const SYMMETRY_INCLUDE_DIR: &str = "c/symmetry_h";

/// Header directory for the tetrahedron method.
pub const TETRAHEDRON_INCLUDE_DIR: &str = "c/tetrahedron_h";

/// Compile argument enabling OpenMP in both extensions.
pub const OPENMP_COMPILE_ARG: &str = "-fopenmp";

/// Macro defined for instrumentation builds.
pub const TIMINGS_MACRO: &str = "TRIPHONON_TIMINGS";

/// A preprocessor macro definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroDef {
    /// Macro name.
    pub name: String,
    /// Optional macro value; `None` defines the name without a value.
    pub value: Option<String>,
}

/// Declarative record describing one native-compiled extension module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionSpec {
    /// Dotted module name of the compiled extension.
    pub module_name: String,
    /// Ordered source file list, relative to the source tree root.
    pub sources: Vec<Utf8PathBuf>,
    /// Include directories searched during compilation.
    pub include_dirs: Vec<Utf8PathBuf>,
    /// Extra compile arguments.
    pub compile_args: Vec<String>,
    /// Extra linker arguments.
    pub link_args: Vec<String>,
    /// Preprocessor macro definitions; empty outside instrumentation builds.
    pub define_macros: Vec<MacroDef>,
}

/// Inputs shared by both descriptor constructors.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInputs<'a> {
    /// The resolved toolchain profile.
    pub profile: &'a ToolchainProfile,
    /// Sanitized search-path entries used as additional include roots.
    pub include_roots: &'a [Utf8PathBuf],
    /// Whether to define the timings instrumentation macro.
    pub timings: bool,
}

/// Assemble the primary extension descriptor.
#[must_use]
pub fn primary_extension(inputs: &AssemblyInputs<'_>) -> ExtensionSpec {
    let mut sources = vec![Utf8PathBuf::from(PRIMARY_GLUE_SOURCE)];
    for group in [
        HARMONIC_SOURCES,
        ANHARMONIC_SOURCES,
        TRIPLET_SOURCES,
        SYMMETRY_SOURCES,
        TETRAHEDRON_SOURCES,
    ] {
        sources.extend(paths(group));
    }

    let own_includes = [
        HARMONIC_INCLUDE_DIR,
        ANHARMONIC_INCLUDE_DIR,
        SYMMETRY_INCLUDE_DIR,
        TETRAHEDRON_INCLUDE_DIR,
    ];

    ExtensionSpec {
        module_name: PRIMARY_MODULE.to_owned(),
        sources,
        include_dirs: include_dirs(&own_includes, inputs),
        compile_args: vec![OPENMP_COMPILE_ARG.to_owned()],
        link_args: inputs.profile.link_args(),
        define_macros: macros(inputs.timings),
    }
}

/// Assemble the companion extension descriptor.
///
/// Its source list is the harmonic subset of the primary extension plus its
/// own glue source, and its include set is restricted to the harmonic
/// headers.
#[must_use]
pub fn companion_extension(inputs: &AssemblyInputs<'_>) -> ExtensionSpec {
    let mut sources = vec![Utf8PathBuf::from(COMPANION_GLUE_SOURCE)];
    sources.extend(paths(HARMONIC_SOURCES));

    ExtensionSpec {
        module_name: COMPANION_MODULE.to_owned(),
        sources,
        include_dirs: include_dirs(&[HARMONIC_INCLUDE_DIR], inputs),
        compile_args: vec![OPENMP_COMPILE_ARG.to_owned()],
        link_args: inputs.profile.link_args(),
        define_macros: macros(inputs.timings),
    }
}

/// Assemble both extension descriptors, primary first.
#[must_use]
pub fn assemble_extensions(inputs: &AssemblyInputs<'_>) -> Vec<ExtensionSpec> {
    vec![primary_extension(inputs), companion_extension(inputs)]
}

fn paths(group: &[&str]) -> impl Iterator<Item = Utf8PathBuf> {
    group.iter().map(Utf8PathBuf::from)
}

fn include_dirs(own: &[&str], inputs: &AssemblyInputs<'_>) -> Vec<Utf8PathBuf> {
    let mut dirs: Vec<Utf8PathBuf> = own.iter().map(Utf8PathBuf::from).collect();
    dirs.extend(inputs.include_roots.iter().cloned());
    dirs.extend(inputs.profile.extra_include_dirs());
    dirs
}

fn macros(timings: bool) -> Vec<MacroDef> {
    if timings {
        vec![MacroDef {
            name: TIMINGS_MACRO.to_owned(),
            value: None,
        }]
    } else {
        Vec::new()
    }
}
