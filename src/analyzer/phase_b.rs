//! Phase B — transitive staleness propagation.
//!
//! A module's interface survives only if Phase A found it fresh on disk
//! *and* every one of its dependencies also survived. Staleness is
//! contagious: one dirty leaf marks everything downstream of it dirty too,
//! no matter how fresh their own interface files look.
//!
//! Dependency validation (unknown modules, cycles) happens here rather than
//! in Phase A because it requires walking the whole graph, not just one
//! module at a time.

use crate::analyzer::phase_a::Loaded;
use crate::error::{BuildError, Result};
use crate::interface::Interface;
use crate::location::Location;
use crate::module_id::ModuleId;
use crate::project_summary::ProjectSummary;
use std::collections::HashMap;

/// One module after staleness propagation: its location, its direct
/// dependencies, and the interface it may keep reusing (`None` means it must
/// be recompiled).
pub struct Resolved {
    pub location: Location,
    pub deps: Vec<ModuleId>,
    pub interface: Option<Interface>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

#[tracing::instrument(skip_all, fields(modules = loaded.len()))]
pub fn propagate(
    mut loaded: HashMap<ModuleId, Loaded>,
    summary: &ProjectSummary<Location>,
) -> Result<HashMap<ModuleId, Resolved>> {
    let mut color: HashMap<ModuleId, Color> = summary.keys().map(|id| (id.clone(), Color::White)).collect();
    let mut stack: Vec<ModuleId> = Vec::new();
    let mut order: Vec<ModuleId> = Vec::with_capacity(summary.len());

    for id in summary.keys() {
        if color[id] == Color::White {
            visit(id, summary, &mut color, &mut stack, &mut order)?;
        }
    }

    let mut resolved: HashMap<ModuleId, Resolved> = HashMap::with_capacity(order.len());
    for id in order {
        let data = summary.get(&id).expect("every ordered id came from summary.keys()");
        let entry = loaded.remove(&id).expect("Phase A loads every module in summary");
        let all_deps_retained =
            data.deps.iter().all(|dep| resolved.get(dep).is_some_and(|r| r.interface.is_some()));
        let interface = if entry.interface.is_some() && all_deps_retained { entry.interface } else { None };

        if interface.is_none() {
            tracing::debug!(%id, "stale: must recompile");
        }
        resolved.insert(id, Resolved { location: entry.location, deps: data.deps.clone(), interface });
    }

    Ok(resolved)
}

fn visit(
    id: &ModuleId,
    summary: &ProjectSummary<Location>,
    color: &mut HashMap<ModuleId, Color>,
    stack: &mut Vec<ModuleId>,
    order: &mut Vec<ModuleId>,
) -> Result<()> {
    color.insert(id.clone(), Color::Gray);
    stack.push(id.clone());

    let data = summary.get(id).expect("caller only visits ids present in summary");
    for dep in &data.deps {
        match color.get(dep) {
            None => {
                return Err(BuildError::ModuleNotFound { name: dep.name.clone(), parent: Some(id.clone()) })
            }
            Some(Color::Black) => continue,
            Some(Color::Gray) => {
                let start = stack.iter().position(|m| m == dep).expect("gray module must be on stack");
                return Err(BuildError::Cycle(stack[start..].to_vec()));
            }
            Some(Color::White) => visit(dep, summary, color, stack, order)?,
        }
    }

    stack.pop();
    color.insert(id.clone(), Color::Black);
    order.push(id.clone());
    Ok(())
}
