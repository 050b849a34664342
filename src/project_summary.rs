//! The analyzer's input: a dependency graph of modules annotated with
//! source locations.

use crate::module_id::ModuleId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One module's payload plus its direct dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData<T> {
    pub payload: T,
    pub deps: Vec<ModuleId>,
}

impl<T> ProjectData<T> {
    pub fn new(payload: T, deps: Vec<ModuleId>) -> Self {
        Self { payload, deps }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ProjectData<U> {
        ProjectData { payload: f(self.payload), deps: self.deps }
    }
}

/// The full project as supplied by the out-of-scope source crawler: every
/// module the build needs to consider, keyed by its identity.
///
/// `T` is instantiated through three forms over the course of analysis: see
/// [`crate::analyzer`] for the Phase A/B/C pipeline that drives those
/// transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary<T>(pub HashMap<ModuleId, ProjectData<T>>);

impl<T> ProjectSummary<T> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, id: ModuleId, data: ProjectData<T>) {
        self.0.insert(id, data);
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ProjectData<T>> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &ProjectData<T>)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModuleId> {
        self.0.keys()
    }
}

impl<T> Default for ProjectSummary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(ModuleId, ProjectData<T>)> for ProjectSummary<T> {
    fn from_iter<I: IntoIterator<Item = (ModuleId, ProjectData<T>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
