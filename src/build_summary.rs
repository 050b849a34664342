//! The analyzer's output: the subset of the project that must be recompiled.

use crate::interface::Interface;
use crate::location::Location;
use crate::module_id::ModuleId;
use std::collections::HashMap;

/// Everything the scheduler needs to eventually dispatch one module's
/// compile job.
///
/// Invariant (checked by [`crate::analyzer::phase_c`] and re-checked in
/// debug builds by the scheduler): `blocking` and the keys of `ready`
/// partition the module's dependency set.
#[derive(Debug, Clone)]
pub struct BuildData {
    pub blocking: Vec<ModuleId>,
    pub ready: HashMap<ModuleId, Interface>,
    pub location: Location,
}

impl BuildData {
    /// A module is schedulable iff it has no outstanding blocking
    /// dependencies.
    pub fn is_ready(&self) -> bool {
        self.blocking.is_empty()
    }
}

/// The set of modules that must be (re)compiled, each annotated with what it
/// is still waiting on. Modules that survived staleness analysis are simply
/// absent here — they are already done.
#[derive(Debug, Clone, Default)]
pub struct BuildSummary(pub HashMap<ModuleId, BuildData>);

impl BuildSummary {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, id: ModuleId, data: BuildData) {
        self.0.insert(id, data);
    }

    pub fn into_inner(self) -> HashMap<ModuleId, BuildData> {
        self.0
    }
}
