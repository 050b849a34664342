//! Module identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A package is identified by its author and project name, the same pair the
/// out-of-scope package manager uses to key its own registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Package {
    pub author: String,
    pub project: String,
}

impl Package {
    pub fn new(author: impl Into<String>, project: impl Into<String>) -> Self {
        Self { author: author.into(), project: project.into() }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.project)
    }
}

/// Identity of a module within one build: a package plus a dotted module
/// name (e.g. `Data.List.Extra`). Equality is purely structural.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub package: Package,
    pub name: String,
}

impl ModuleId {
    pub fn new(package: Package, name: impl Into<String>) -> Self {
        Self { package, name: name.into() }
    }

    /// The module name with `.` replaced by the platform path separator,
    /// used when deriving the artifact file name (see [`crate::artifact_dir`]).
    pub fn dotted(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package, self.name)
    }
}
