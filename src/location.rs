//! Source location of a module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a module's source lives, and whether it is compilable at all.
///
/// Native modules are pre-supplied (e.g. hand-written JS) and bypass the
/// `compile` collaborator entirely, but still participate in dependency
/// ordering: a module importing a native module waits for it the same way it
/// would wait for a compiled one, it just never appears as dirty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: PathBuf,
    pub native: bool,
}

impl Location {
    pub fn source(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), native: false }
    }

    pub fn native(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), native: true }
    }

    /// Native modules never need compiling and are therefore never stale:
    /// there is nothing to compare their mtime against.
    pub fn is_native(&self) -> bool {
        self.native
    }
}
