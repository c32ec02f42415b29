//! Shell descriptor: a pinned package-set import plus the build tools to
//! expose on the shell's search path.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::NixError;

/// Import path of the package set used by the garlic shell.
pub const GARLIC_PKGS: &str = "nix/pkgs.nix";

/// Reference to a package collection, located by a local path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PackageSetImport(pub PathBuf);

impl PackageSetImport {
    /// Creates an import from any path-like value.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as written in the descriptor.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Nix expression evaluating to this path.
    ///
    /// Paths that fit Nix's path-literal grammar render as a literal, with a
    /// `./` prefix added to bare relative paths. Anything else (whitespace,
    /// quotes, non-ASCII) renders as `(./. + "/<escaped>")`, or `(/. + ..)`
    /// for absolute paths.
    #[must_use]
    pub fn nix_expr(&self) -> String {
        let mut absolute = false;
        let mut literal = true;
        let mut rest = String::new();
        for component in self.0.components() {
            match component {
                Component::RootDir => absolute = true,
                Component::CurDir => {}
                Component::ParentDir => rest.push_str("/.."),
                Component::Normal(part) => {
                    let part = part.to_string_lossy();
                    literal &= is_path_literal_segment(&part);
                    rest.push('/');
                    rest.push_str(&part);
                }
                Component::Prefix(prefix) => {
                    literal = false;
                    rest.push_str(&prefix.as_os_str().to_string_lossy());
                }
            }
        }

        let anchor = if absolute { "/." } else { "./." };
        if rest.is_empty() {
            return anchor.to_owned();
        }
        if !literal {
            return format!("({anchor} + \"{}\")", escape_nix_string(&rest));
        }
        if absolute {
            rest
        } else if rest == "/.." {
            "../.".to_owned()
        } else if rest.starts_with("/..") {
            rest[1..].to_owned()
        } else {
            format!(".{rest}")
        }
    }
}

/// Returns `true` if `segment` may appear between slashes in a Nix path
/// literal (`[A-Za-z0-9._+-]+`).
fn is_path_literal_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'))
}

/// Escape `s` for use inside a double-quoted Nix string.
fn escape_nix_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

/// Name of one build tool within the package collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub struct BuildTool(String);

impl BuildTool {
    /// Creates a `BuildTool`, validating it as a Nix attribute identifier
    /// (`[A-Za-z_][A-Za-z0-9_'-]*`).
    ///
    /// # Errors
    /// Returns [`NixError::InvalidToolName`] if `name` is not an identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, NixError> {
        let name = name.into();
        let mut chars = name.chars();
        let reason = match chars.next() {
            None => Some("name is empty"),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => Some("must start with a letter or '_'"),
            Some(_) => {
                let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '-'));
                (!rest_ok).then_some("may only contain letters, digits, '_', '\'' and '-'")
            }
        };
        match reason {
            Some(reason) => Err(NixError::InvalidToolName { name, reason: reason.to_owned() }),
            None => Ok(Self(name)),
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BuildTool {
    type Error = NixError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<BuildTool> for String {
    fn from(tool: BuildTool) -> Self {
        tool.0
    }
}

/// A development-shell descriptor.
///
/// Evaluation resolves `pkgs` first, then looks up each entry of
/// `native_build_inputs` in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ShellDescriptor {
    /// The pinned package collection.
    pub pkgs: PackageSetImport,
    /// Tools placed on the shell's search path, in order.
    pub native_build_inputs: Vec<BuildTool>,
}

impl ShellDescriptor {
    /// Create a descriptor with no build tools.
    #[must_use]
    pub fn new(pkgs: PackageSetImport) -> Self {
        Self { pkgs, native_build_inputs: Vec::new() }
    }

    /// The descriptor committed as `shell.nix` at the workspace root.
    #[must_use]
    pub fn garlic() -> Self {
        Self {
            pkgs: PackageSetImport::new(GARLIC_PKGS),
            native_build_inputs: vec![BuildTool("cargo".to_owned())],
        }
    }

    /// Append a build tool.
    ///
    /// # Errors
    /// Returns [`NixError::InvalidToolName`] if `name` is not an identifier.
    pub fn with_tool(mut self, name: impl Into<String>) -> Result<Self, NixError> {
        self.native_build_inputs.push(BuildTool::new(name)?);
        Ok(self)
    }

    /// Render the descriptor as a Nix expression.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShellDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{ pkgs ? import {} {{}} }}:", self.pkgs.nix_expr())?;
        writeln!(f, "pkgs.mkShell {{")?;
        writeln!(f, "    nativeBuildInputs = [")?;
        for tool in &self.native_build_inputs {
            writeln!(f, "        pkgs.{tool}")?;
        }
        writeln!(f, "    ];")?;
        writeln!(f, "}}")
    }
}
