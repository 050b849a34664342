//! Phase C — readiness partition.
//!
//! Turns the resolved graph into the scheduler's input: one [`BuildData`] per
//! module that still needs compiling, splitting its dependencies into those
//! still pending (`blocking`) and those already available (`ready`, with
//! their interface attached).

use crate::analyzer::phase_b::Resolved;
use crate::build_summary::{BuildData, BuildSummary};
use crate::module_id::ModuleId;
use std::collections::HashMap;

#[tracing::instrument(skip_all)]
pub fn partition(resolved: HashMap<ModuleId, Resolved>) -> BuildSummary {
    let mut summary = BuildSummary::new();

    for (id, module) in &resolved {
        if module.interface.is_some() {
            continue;
        }

        let mut blocking = Vec::new();
        let mut ready = HashMap::new();
        for dep in &module.deps {
            match resolved.get(dep).and_then(|r| r.interface.clone()) {
                Some(interface) => {
                    ready.insert(dep.clone(), interface);
                }
                None => blocking.push(dep.clone()),
            }
        }

        summary.insert(id.clone(), BuildData { blocking, ready, location: module.location.clone() });
    }

    summary
}
