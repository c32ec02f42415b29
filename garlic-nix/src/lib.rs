//! Development shell for the garlic workspace.
//!
//! Models the `shell.nix` descriptor (a pinned package-set import plus the
//! build tools it exposes), renders it as a Nix expression, and evaluates it
//! against a package collection to produce the shell's search path.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod descriptor;
pub mod error;
pub mod evaluate;

pub use descriptor::{BuildTool, PackageSetImport, ShellDescriptor, GARLIC_PKGS};
pub use error::NixError;
pub use evaluate::{evaluate, evaluate_with, PackageCollection, PrefixDirectory, ShellEnvironment};
