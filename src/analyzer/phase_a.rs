//! Phase A — load-if-fresh.
//!
//! For each module, attempt to load its persisted interface. An interface
//! file is *fresh* iff it exists and its mtime is at least the source's. Not
//! fresh (or simply missing) means the interface is absent for that module,
//! which Phase B will treat as "must recompile" regardless of what its
//! dependencies look like.

use crate::artifact_dir::ArtifactLayout;
use crate::error::Result;
use crate::interface::{is_fresh, Interface};
use crate::location::Location;
use crate::module_id::ModuleId;
use crate::project_summary::ProjectSummary;
use rayon::prelude::*;
use std::collections::HashMap;

/// A module's location plus whatever interface Phase A managed to load for
/// it, if any.
pub struct Loaded {
    pub location: Location,
    pub interface: Option<Interface>,
}

#[tracing::instrument(skip_all, fields(modules = summary.len()))]
pub fn load_if_fresh(
    summary: &ProjectSummary<Location>,
    layout: &ArtifactLayout,
) -> Result<HashMap<ModuleId, Loaded>> {
    summary
        .iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(id, data)| -> Result<(ModuleId, Loaded)> {
            let location = data.payload.clone();
            let interface = load_one(id, &location, layout)?;
            Ok((id.clone(), Loaded { location, interface }))
        })
        .collect()
}

fn load_one(id: &ModuleId, location: &Location, layout: &ArtifactLayout) -> Result<Option<Interface>> {
    if location.is_native() {
        // Native modules bypass compilation entirely; treat them as always
        // present so dependents are never blocked on them.
        return Ok(Some(Interface::new(Vec::new())));
    }

    let interface_path = layout.interface_path(id);
    if !is_fresh(&location.path, &interface_path)? {
        tracing::trace!(%id, "no fresh interface on disk");
        return Ok(None);
    }

    let interface = Interface::load(&interface_path)?;
    tracing::trace!(%id, "loaded fresh interface");
    Ok(Some(interface))
}
