//! Descriptor evaluation: resolve the package set, then populate the
//! shell's search path from it.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::{BuildTool, NixError, ShellDescriptor};

/// A resolved package collection.
pub trait PackageCollection {
    /// Returns the directory holding `tool`'s executables, or `None` if the
    /// collection does not provide it.
    fn lookup(&self, tool: &BuildTool) -> Option<PathBuf>;
}

/// A package collection laid out as one prefix directory per tool:
/// `<root>/<tool>/bin`.
#[derive(Debug, Clone)]
pub struct PrefixDirectory {
    root: PathBuf,
}

impl PrefixDirectory {
    /// Open the collection an import resolves to.
    ///
    /// A directory import is the collection root. A file import (such as
    /// `nix/pkgs.nix`) roots the collection at the file's parent directory.
    ///
    /// # Errors
    /// Returns [`NixError::InvalidCollection`] if `import` is neither a
    /// directory nor a file inside one.
    pub fn open(import: &Path) -> Result<Self, NixError> {
        let root = if import.is_dir() {
            import
        } else if import.is_file() {
            import.parent().filter(|p| p.is_dir()).ok_or_else(|| NixError::InvalidCollection {
                path: import.to_path_buf(),
                reason: "file has no parent directory".to_owned(),
            })?
        } else {
            return Err(NixError::InvalidCollection {
                path: import.to_path_buf(),
                reason: "neither a file nor a directory".to_owned(),
            });
        };
        Ok(Self { root: root.to_path_buf() })
    }

    /// Root directory of the collection.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PackageCollection for PrefixDirectory {
    fn lookup(&self, tool: &BuildTool) -> Option<PathBuf> {
        let bin = self.root.join(tool.name()).join("bin");
        bin.is_dir().then_some(bin)
    }
}

/// The environment produced by a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ShellEnvironment {
    /// Tools provided, in request order.
    pub tools: Vec<BuildTool>,
    /// Executable directories, one per tool, in request order.
    pub path_entries: Vec<PathBuf>,
}

impl ShellEnvironment {
    /// Join the executable directories into a `PATH`-style value.
    ///
    /// # Errors
    /// Returns [`NixError::Io`] if an entry contains the platform's path
    /// separator.
    pub fn search_path(&self) -> Result<OsString, NixError> {
        std::env::join_paths(&self.path_entries)
            .map_err(|e| NixError::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))
    }

    /// Returns `true` if `dir` is on the search path.
    #[must_use]
    pub fn provides(&self, dir: &Path) -> bool {
        self.path_entries.iter().any(|p| p == dir)
    }
}

/// Evaluate `descriptor` against a [`PrefixDirectory`] collection.
///
/// The import path is resolved relative to `base_dir`.
///
/// # Errors
/// See [`evaluate_with`].
pub fn evaluate(descriptor: &ShellDescriptor, base_dir: &Path) -> Result<ShellEnvironment, NixError> {
    evaluate_with(descriptor, base_dir, PrefixDirectory::open)
}

/// Evaluate `descriptor`, loading the collection with `load`.
///
/// The package set is resolved before any tool is looked up, and the first
/// failure aborts evaluation.
///
/// # Errors
/// - [`NixError::ImportNotFound`] if the import path does not exist.
/// - Any error returned by `load`.
/// - [`NixError::UnknownTool`] for the first tool the collection lacks.
pub fn evaluate_with<C, L>(
    descriptor: &ShellDescriptor,
    base_dir: &Path,
    load: L,
) -> Result<ShellEnvironment, NixError>
where
    C: PackageCollection,
    L: FnOnce(&Path) -> Result<C, NixError>,
{
    let import = base_dir.join(descriptor.pkgs.path());
    match std::fs::metadata(&import) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(NixError::ImportNotFound { path: import });
        }
        Err(e) => return Err(e.into()),
    }
    let collection = load(&import)?;
    tracing::debug!(import = %import.display(), "resolved package set");

    let mut path_entries = Vec::with_capacity(descriptor.native_build_inputs.len());
    for tool in &descriptor.native_build_inputs {
        let Some(bin) = collection.lookup(tool) else {
            tracing::debug!(tool = %tool, "build tool missing from package set");
            return Err(NixError::UnknownTool { name: tool.name().to_owned() });
        };
        tracing::debug!(tool = %tool, bin = %bin.display(), "resolved build tool");
        path_entries.push(bin);
    }

    tracing::info!(
        import = %import.display(),
        tools = descriptor.native_build_inputs.len(),
        "shell environment ready"
    );

    Ok(ShellEnvironment { tools: descriptor.native_build_inputs.clone(), path_entries })
}
