//! The staleness analyzer: turns a full project summary into the (usually
//! much smaller) set of modules the scheduler actually needs to compile.
//!
//! Runs in three phases, each in its own submodule:
//!
//! - [`phase_a`] loads whatever interface is currently fresh on disk for
//!   each module, independently.
//! - [`phase_b`] walks the dependency graph (detecting cycles and unknown
//!   modules along the way) and propagates staleness transitively: a module
//!   only keeps its loaded interface if every one of its dependencies also
//!   kept theirs.
//! - [`phase_c`] partitions the result into the scheduler's input, splitting
//!   each dirty module's dependencies into still-pending and already-ready.

pub mod phase_a;
pub mod phase_b;
pub mod phase_c;

use crate::artifact_dir::ArtifactLayout;
use crate::build_summary::BuildSummary;
use crate::error::Result;
use crate::location::Location;
use crate::project_summary::ProjectSummary;

/// Runs the full Phase A/B/C pipeline.
#[tracing::instrument(skip_all, fields(modules = summary.len()))]
pub fn analyze(summary: &ProjectSummary<Location>, layout: &ArtifactLayout) -> Result<BuildSummary> {
    let loaded = phase_a::load_if_fresh(summary, layout)?;
    let resolved = phase_b::propagate(loaded, summary)?;
    let build_summary = phase_c::partition(resolved);
    tracing::debug!(stale = build_summary.len(), "staleness analysis complete");
    Ok(build_summary)
}
