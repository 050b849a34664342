//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns [`Result`]. The core error
//! taxonomy mirrors the analyzer/scheduler error kinds; a handful of I/O
//! variants cover the ambient filesystem access the analyzer and workers
//! perform. Rendering for end users is left to the caller: `Display` is a
//! single plain line per variant, with no ANSI styling.

use crate::module_id::ModuleId;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BuildError>;

/// All errors the analyzer, scheduler, or workers can produce.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A strongly-connected component of size > 1 (or a self-loop) was found
    /// in the dependency graph. Carries the members of the cycle.
    #[error("dependency cycle detected: {}", format_cycle(.0))]
    Cycle(Vec<ModuleId>),

    /// A dependency referenced a module that does not appear in the project
    /// summary.
    #[error("module `{name}` not found{}", format_parent(.parent))]
    ModuleNotFound { name: String, parent: Option<ModuleId> },

    /// The same module name was supplied by more than one source file or
    /// package.
    #[error("module `{name}` is defined in multiple places{}: {paths:?}", format_parent(.parent))]
    ModuleDuplicates { name: String, parent: Option<ModuleId>, paths: Vec<PathBuf>, packages: Vec<String> },

    /// A module's declared name does not match the name implied by its file
    /// path.
    #[error("module at {path:?} declares name `{actual}`, expected `{expected}`")]
    ModuleNameMismatch { path: PathBuf, expected: String, actual: String },

    /// An interface file exists and is fresh but cannot be read back.
    /// Deleting the artifact directory and rebuilding from scratch resolves
    /// this.
    #[error("corrupted artifact at {0:?}; delete the artifact directory and rebuild")]
    CorruptedArtifact(PathBuf),

    /// The external `compile` collaborator reported one or more diagnostics
    /// that prevented the module from producing an interface.
    #[error("compilation of {path:?} failed with {} diagnostic(s)", diagnostics.len())]
    CompilerErrors { path: PathBuf, message: String, diagnostics: Vec<String> },

    /// A dependency referenced a package that is not part of this build.
    #[error("package `{0}` is not available")]
    MissingPackage(String),

    /// Failed to read or write a file under the project root or the
    /// artifact directory. Carries the path for context.
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    /// Failed to (de)serialize a persisted interface or project fixture.
    #[error("malformed JSON at {path:?}: {source}")]
    Json { path: PathBuf, #[source] source: serde_json::Error },
}

impl BuildError {
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        BuildError::Io { path: path.into(), source: err }
    }

    pub fn json(err: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        BuildError::Json { path: path.into(), source: err }
    }
}

/// What the `compile` collaborator returns on failure: one or more
/// diagnostics that prevented a module from producing an interface. Kept
/// distinct from [`BuildError`] because it is the one error a caller
/// constructs directly (everything else originates inside this crate);
/// the scheduler folds it into [`BuildError::CompilerErrors`] once it
/// reaches the driver.
#[derive(Debug, Clone, thiserror::Error)]
#[error("compilation of {path:?} failed with {} diagnostic(s)", diagnostics.len())]
pub struct CompileError {
    pub path: PathBuf,
    pub message: String,
    pub diagnostics: Vec<String>,
}

impl From<CompileError> for BuildError {
    fn from(err: CompileError) -> Self {
        BuildError::CompilerErrors { path: err.path, message: err.message, diagnostics: err.diagnostics }
    }
}

fn format_parent(parent: &Option<ModuleId>) -> String {
    match parent {
        Some(p) => format!(" (imported by {p})"),
        None => String::new(),
    }
}

fn format_cycle(modules: &[ModuleId]) -> String {
    modules.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ")
}
