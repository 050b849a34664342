//! Artifact directory layout: one file per module, nested by compiler version
//! and package so artifacts from different compiler releases never collide:
//! `<stuff>/build-artifacts/<compiler-version>/<author>/<project>/<Module>.<ext>`.

use crate::module_id::ModuleId;
use std::path::{Path, PathBuf};

pub const INTERFACE_EXT: &str = "elmi";
pub const OBJECT_EXT: &str = "elmo";

/// Resolves artifact paths for one build, rooted at a "stuff" directory and
/// scoped to one compiler version so that artifacts from different compiler
/// releases never collide.
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    pub fn new(stuff_directory: impl AsRef<Path>, compiler_version: &str) -> Self {
        Self { root: stuff_directory.as_ref().join("build-artifacts").join(compiler_version) }
    }

    fn module_dir(&self, id: &ModuleId) -> PathBuf {
        self.root.join(&id.package.author).join(&id.package.project)
    }

    pub fn interface_path(&self, id: &ModuleId) -> PathBuf {
        self.module_dir(id).join(format!("{}.{INTERFACE_EXT}", id.dotted()))
    }

    pub fn object_path(&self, id: &ModuleId) -> PathBuf {
        self.module_dir(id).join(format!("{}.{OBJECT_EXT}", id.dotted()))
    }
}
