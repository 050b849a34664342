//! Thin demonstrator binary, not a production CLI.
//!
//! Loads a project-summary fixture from JSON, runs the analyzer and
//! scheduler against a stub `compile` function that echoes a deterministic
//! interface, and prints the resulting timeline. See `demos/fixtures/` for
//! the fixture format.

use incremental_build_driver::config::BuildConfig;
use incremental_build_driver::module_id::{ModuleId, Package};
use incremental_build_driver::project_summary::{ProjectData, ProjectSummary};
use incremental_build_driver::timeline::Timeline;
use incremental_build_driver::{analyzer, scheduler::Scheduler, Location};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct FixturePackage {
    author: String,
    project: String,
}

#[derive(Debug, Deserialize)]
struct FixtureModule {
    name: String,
    path: PathBuf,
    native: bool,
    deps: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    package: FixturePackage,
    modules: Vec<FixtureModule>,
}

fn load_summary(fixture_path: &Path, root: &Path) -> ProjectSummary<Location> {
    let raw = std::fs::read_to_string(fixture_path)
        .unwrap_or_else(|e| panic!("reading fixture {fixture_path:?}: {e}"));
    let fixture: Fixture = serde_json::from_str(&raw).unwrap_or_else(|e| panic!("parsing fixture: {e}"));
    let package = Package::new(fixture.package.author, fixture.package.project);

    let mut summary = ProjectSummary::new();
    for module in fixture.modules {
        let id = ModuleId::new(package.clone(), module.name);
        let location = if module.native {
            Location::native(module.path)
        } else {
            Location::source(root.join(&module.path))
        };
        let deps = module.deps.into_iter().map(|dep| ModuleId::new(package.clone(), dep)).collect();
        summary.insert(id, ProjectData::new(location, deps));
    }
    summary
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let fixture_path =
        args.next().unwrap_or_else(|| "demos/fixtures/diamond.json".to_string());
    let root = args.next().unwrap_or_else(|| "demos/fixtures".to_string());
    let root = PathBuf::from(root);

    let summary = load_summary(Path::new(&fixture_path), &root);
    let config = BuildConfig::new(&root);
    let layout = config.layout();

    let mut timeline = Timeline::new();
    let completed = timeline.phase("build", |t| {
        let build_summary = t.phase("analyze", |_| analyzer::analyze(&summary, &layout)).expect("analysis failed");
        t.phase("schedule", |_| {
            Scheduler::new(config.workers()).run(build_summary, &layout, echo_compile)
        })
    });

    match completed {
        Ok(interfaces) => {
            println!("built {} module(s)", interfaces.len());
        }
        Err(err) => {
            eprintln!("build failed: {err}");
        }
    }
    println!("{}", timeline.render());
}

fn echo_compile(
    id: &ModuleId,
    _location: &Location,
    _ready: &HashMap<ModuleId, incremental_build_driver::Interface>,
) -> Result<incremental_build_driver::Interface, incremental_build_driver::CompileError> {
    Ok(incremental_build_driver::Interface::new(id.name.as_bytes().to_vec()))
}
