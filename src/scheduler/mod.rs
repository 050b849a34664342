//! Drives a [`BuildSummary`] to completion on a fixed-size worker pool.
//!
//! One driver thread owns all scheduler state; workers communicate back only
//! through the completion channel, so the driver never needs a lock beyond
//! what `std::sync::mpsc` already provides internally. See [`worker`] for
//! what a single job actually does.

mod worker;

use crate::artifact_dir::ArtifactLayout;
use crate::build_summary::{BuildData, BuildSummary};
use crate::error::{BuildError, CompileError};
use crate::interface::Interface;
use crate::location::Location;
use crate::module_id::ModuleId;
use crate::queue::Queue;
use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

/// Drives one build. Stateless between calls to [`Scheduler::run`]; the
/// worker count is the only thing it carries.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    workers: usize,
}

impl Scheduler {
    /// `workers` is clamped to at least 1: a pool of zero can never make
    /// progress.
    pub fn new(workers: usize) -> Self {
        Self { workers: workers.max(1) }
    }

    /// Runs `build_summary` to completion, dispatching jobs to at most
    /// `self.workers` worker threads at a time. `compile` is the opaque
    /// compiler collaborator; it must be safe to call concurrently from
    /// multiple threads.
    ///
    /// Returns every module's interface — the ones reused from
    /// `build_summary`'s `ready` maps plus every freshly compiled one — or
    /// the first compile error encountered, after every job already
    /// dispatched has finished.
    #[tracing::instrument(skip_all, fields(pending = build_summary.len(), workers = self.workers))]
    pub fn run<F>(
        &self,
        build_summary: BuildSummary,
        layout: &ArtifactLayout,
        compile: F,
    ) -> crate::error::Result<HashMap<ModuleId, Interface>>
    where
        F: Fn(&ModuleId, &Location, &HashMap<ModuleId, Interface>) -> Result<Interface, CompileError> + Sync,
    {
        let mut state = DriverState::new(build_summary);

        let (tx, rx) = mpsc::channel::<(ModuleId, Result<Interface, CompileError>)>();

        thread::scope(|scope| {
            loop {
                while state.jobs_in_flight < self.workers && !state.queue.is_empty() && state.first_error.is_none()
                {
                    let id = state.queue.dequeue(1).pop().expect("queue reported non-empty");
                    let data = state.ready_data.remove(&id).expect("queued id always has ready data");
                    let tx = tx.clone();
                    let compile = &compile;
                    state.jobs_in_flight += 1;
                    tracing::trace!(module = %id, in_flight = state.jobs_in_flight, "dispatching");
                    scope.spawn(move || {
                        let result = worker::run(&id, &data, layout, compile);
                        let _ = tx.send((id, result));
                    });
                }

                if state.jobs_in_flight == 0 && (state.first_error.is_some() || state.is_drained()) {
                    break;
                }

                let (module, outcome) = rx.recv().expect("a dispatched job is always in flight here");
                state.jobs_in_flight -= 1;
                state.absorb(module, outcome);
            }
        });

        match state.first_error {
            Some(err) => Err(err),
            None => Ok(state.completed),
        }
    }
}

/// Scheduler state for one build. Mutated solely by the driver thread.
struct DriverState {
    blocked: HashMap<ModuleId, BuildData>,
    ready_data: HashMap<ModuleId, BuildData>,
    queue: Queue<ModuleId>,
    jobs_in_flight: usize,
    completed: HashMap<ModuleId, Interface>,
    first_error: Option<BuildError>,
}

impl DriverState {
    fn new(build_summary: BuildSummary) -> Self {
        let mut state = Self {
            blocked: HashMap::new(),
            ready_data: HashMap::new(),
            queue: Queue::new(),
            jobs_in_flight: 0,
            completed: HashMap::new(),
            first_error: None,
        };

        for (id, data) in build_summary.into_inner() {
            for (dep, interface) in &data.ready {
                state.completed.entry(dep.clone()).or_insert_with(|| interface.clone());
            }
            if data.is_ready() {
                state.queue.enqueue([id.clone()]);
                state.ready_data.insert(id, data);
            } else {
                state.blocked.insert(id, data);
            }
        }

        state
    }

    fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.blocked.is_empty()
    }

    fn absorb(&mut self, module: ModuleId, outcome: Result<Interface, CompileError>) {
        if self.first_error.is_some() {
            // Drain mode: the result is discarded, whatever it was.
            return;
        }

        match outcome {
            Ok(interface) => self.unblock(module, interface),
            Err(err) => {
                tracing::warn!(%module, "compile failed, entering drain mode");
                self.first_error = Some(err.into());
            }
        }
    }

    fn unblock(&mut self, completed_id: ModuleId, interface: Interface) {
        self.completed.insert(completed_id.clone(), interface.clone());

        let dependents: Vec<ModuleId> = self
            .blocked
            .iter()
            .filter(|(_, data)| data.blocking.contains(&completed_id))
            .map(|(id, _)| id.clone())
            .collect();

        for dependent in dependents {
            let mut data = self.blocked.remove(&dependent).expect("just observed in self.blocked");
            data.blocking.retain(|dep| dep != &completed_id);
            data.ready.insert(completed_id.clone(), interface.clone());

            if data.is_ready() {
                self.queue.enqueue([dependent.clone()]);
                self.ready_data.insert(dependent, data);
            } else {
                self.blocked.insert(dependent, data);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_id::Package;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn pkg() -> Package {
        Package::new("me", "app")
    }

    fn echo_compile(
        id: &ModuleId,
        _location: &Location,
        _ready: &HashMap<ModuleId, Interface>,
    ) -> Result<Interface, CompileError> {
        Ok(Interface::new(id.name.as_bytes().to_vec()))
    }

    #[test]
    fn linear_chain_dispatches_in_dependency_order() {
        let dir = tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path(), "0.1.0");
        let a = ModuleId::new(pkg(), "A");
        let b = ModuleId::new(pkg(), "B");
        let c = ModuleId::new(pkg(), "C");

        let order: Mutex<Vec<ModuleId>> = Mutex::new(Vec::new());
        let mut summary = BuildSummary::new();
        summary.insert(
            a.clone(),
            BuildData { blocking: vec![b.clone()], ready: HashMap::new(), location: Location::source("A.elm") },
        );
        summary.insert(
            b.clone(),
            BuildData { blocking: vec![c.clone()], ready: HashMap::new(), location: Location::source("B.elm") },
        );
        summary.insert(
            c.clone(),
            BuildData { blocking: vec![], ready: HashMap::new(), location: Location::source("C.elm") },
        );

        let compile = |id: &ModuleId, loc: &Location, ready: &HashMap<ModuleId, Interface>| {
            order.lock().unwrap().push(id.clone());
            echo_compile(id, loc, ready)
        };

        let completed = Scheduler::new(1).run(summary, &layout, compile).unwrap();
        assert_eq!(completed.len(), 3);
        assert_eq!(*order.lock().unwrap(), vec![c, b, a]);
    }

    #[test]
    fn diamond_completes_with_bounded_parallelism() {
        let dir = tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path(), "0.1.0");
        let a = ModuleId::new(pkg(), "A");
        let b = ModuleId::new(pkg(), "B");
        let c = ModuleId::new(pkg(), "C");
        let d = ModuleId::new(pkg(), "D");

        let in_flight = AtomicUsize::new(0);
        let max_in_flight = AtomicUsize::new(0);

        let mut summary = BuildSummary::new();
        summary.insert(
            a.clone(),
            BuildData { blocking: vec![], ready: HashMap::new(), location: Location::source("A.elm") },
        );
        summary.insert(
            b.clone(),
            BuildData { blocking: vec![a.clone()], ready: HashMap::new(), location: Location::source("B.elm") },
        );
        summary.insert(
            c.clone(),
            BuildData { blocking: vec![a.clone()], ready: HashMap::new(), location: Location::source("C.elm") },
        );
        summary.insert(
            d.clone(),
            BuildData {
                blocking: vec![b.clone(), c.clone()],
                ready: HashMap::new(),
                location: Location::source("D.elm"),
            },
        );

        let compile = |id: &ModuleId, loc: &Location, ready: &HashMap<ModuleId, Interface>| {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            max_in_flight.fetch_max(now, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(5));
            in_flight.fetch_sub(1, Ordering::SeqCst);
            echo_compile(id, loc, ready)
        };

        let completed = Scheduler::new(2).run(summary, &layout, compile).unwrap();
        assert_eq!(completed.len(), 4);
        assert!(max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn first_error_is_sticky_and_downstream_never_dispatches() {
        let dir = tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path(), "0.1.0");
        let a = ModuleId::new(pkg(), "A");
        let b = ModuleId::new(pkg(), "B");
        let c = ModuleId::new(pkg(), "C");

        let c_dispatched = AtomicUsize::new(0);

        let mut summary = BuildSummary::new();
        summary.insert(
            a.clone(),
            BuildData { blocking: vec![], ready: HashMap::new(), location: Location::source("A.elm") },
        );
        summary.insert(
            b.clone(),
            BuildData { blocking: vec![a.clone()], ready: HashMap::new(), location: Location::source("B.elm") },
        );
        summary.insert(
            c.clone(),
            BuildData { blocking: vec![b.clone()], ready: HashMap::new(), location: Location::source("C.elm") },
        );

        let compile = |id: &ModuleId, loc: &Location, ready: &HashMap<ModuleId, Interface>| {
            if id == &b {
                return Err(CompileError { path: loc.path.clone(), message: "bad".into(), diagnostics: vec!["bad".into()] });
            }
            if id == &c {
                c_dispatched.fetch_add(1, Ordering::SeqCst);
            }
            echo_compile(id, loc, ready)
        };

        let err = Scheduler::new(1).run(summary, &layout, compile).unwrap_err();
        assert!(matches!(err, BuildError::CompilerErrors { .. }));
        assert_eq!(c_dispatched.load(Ordering::SeqCst), 0);
    }
}
