//! Build configuration: where the project root and artifact directory live,
//! how many workers to run, and which compiler version tags the artifacts.
//!
//! Mirrors the builder pattern used throughout this crate's lineage: a
//! handful of `#[must_use]` setters over a struct with sane defaults,
//! finished off by a cheap accessor rather than a fallible `build()` (there
//! is nothing here that can fail to construct).

use crate::artifact_dir::ArtifactLayout;
use semver::Version;
use std::path::{Path, PathBuf};

/// Everything the analyzer and scheduler need besides the project summary
/// itself.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    root: PathBuf,
    stuff_directory: PathBuf,
    compiler_version: Version,
    workers: usize,
}

impl BuildConfig {
    /// A config rooted at `root`, with the artifact directory defaulting to
    /// `<root>/elm-stuff`, the worker count defaulting to the available
    /// parallelism, and the compiler version defaulting to `0.0.0` (callers
    /// compiling against a real toolchain should set this explicitly via
    /// [`Self::with_compiler_version`]).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let stuff_directory = root.join("elm-stuff");
        Self { root, stuff_directory, compiler_version: Version::new(0, 0, 0), workers: default_workers() }
    }

    #[must_use]
    pub fn with_stuff_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stuff_directory = dir.into();
        self
    }

    #[must_use]
    pub fn with_compiler_version(mut self, version: Version) -> Self {
        self.compiler_version = version;
        self
    }

    /// Overrides the worker count. Clamped to at least 1 by [`crate::scheduler::Scheduler`]
    /// itself, so passing 0 here is harmless but pointless.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn compiler_version(&self) -> &Version {
        &self.compiler_version
    }

    /// The artifact layout derived from this config's stuff directory and
    /// compiler version, ready to hand to [`crate::analyzer::analyze`] and
    /// [`crate::scheduler::Scheduler::run`].
    pub fn layout(&self) -> ArtifactLayout {
        ArtifactLayout::new(&self.stuff_directory, &self.compiler_version.to_string())
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_nest_stuff_directory_under_root() {
        let config = BuildConfig::new("/project");
        assert_eq!(config.root(), Path::new("/project"));
        assert!(config.workers() >= 1);
    }

    #[test]
    fn builder_overrides_are_reflected_in_the_layout() {
        let config = BuildConfig::new("/project")
            .with_stuff_directory("/project/build")
            .with_compiler_version(Version::new(0, 19, 1))
            .with_workers(4);

        assert_eq!(config.workers(), 4);
        assert_eq!(
            config.layout().interface_path(&crate::module_id::ModuleId::new(
                crate::module_id::Package::new("me", "app"),
                "A"
            )),
            PathBuf::from("/project/build/build-artifacts/0.19.1/me/app/A.elmi")
        );
    }
}
