//! Triphonon packager library.
//!
//! This crate resolves the build configuration for the triphonon native
//! extensions and drives an external packaging backend with the resulting
//! manifest. It is used by the `triphonon-packager` CLI binary and can be
//! consumed programmatically for testing or custom packaging workflows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types for resolution and backend dispatch
//! - [`extension`] - Native extension descriptor assembly
//! - [`installer`] - Backend selection and invocation
//! - [`manifest`] - Package manifest handed to the backend
//! - [`output`] - Progress and dry-run report formatting
//! - [`pipeline`] - Configuration resolution pipeline orchestration
//! - [`search_path`] - Dependency search path sanitization
//! - [`toolchain`] - Compiler and platform resolution
//! - [`version`] - Version declaration and build counter resolution

pub mod cli;
pub mod error;
pub mod extension;
pub mod installer;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod search_path;
pub mod toolchain;
pub mod version;

#[cfg(test)]
pub(crate) mod test_utils;
