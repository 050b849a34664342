//! One compile job, run on a worker thread.
//!
//! A worker receives a module's location and the ready interfaces its
//! dependencies already produced, invokes the compile collaborator, and
//! persists the result. It never touches scheduler state; everything it
//! needs is in its arguments.

use crate::artifact_dir::ArtifactLayout;
use crate::build_summary::BuildData;
use crate::error::{BuildError, CompileError};
use crate::interface::Interface;
use crate::location::Location;
use crate::module_id::ModuleId;
use std::collections::HashMap;

#[tracing::instrument(skip_all, fields(module = %id))]
pub fn run<F>(
    id: &ModuleId,
    data: &BuildData,
    layout: &ArtifactLayout,
    compile: &F,
) -> Result<Interface, CompileError>
where
    F: Fn(&ModuleId, &Location, &HashMap<ModuleId, Interface>) -> Result<Interface, CompileError>,
{
    if data.location.is_native() {
        tracing::trace!(%id, "native module, nothing to compile");
        return Ok(Interface::new(Vec::new()));
    }

    let interface = compile(id, &data.location, &data.ready)?;

    let interface_path = layout.interface_path(id);
    interface.write(&interface_path).map_err(|err| to_compile_error(err, &data.location))?;

    tracing::debug!(%id, "compiled and persisted");
    Ok(interface)
}

fn to_compile_error(err: BuildError, location: &Location) -> CompileError {
    CompileError { path: location.path.clone(), message: err.to_string(), diagnostics: Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_id::Package;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn id() -> ModuleId {
        ModuleId::new(Package::new("me", "app"), "A")
    }

    #[test]
    fn native_modules_never_invoke_compile() {
        let dir = tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path(), "0.1.0");
        let data = BuildData { blocking: vec![], ready: HashMap::new(), location: Location::native("A.js") };

        let result = run(&id(), &data, &layout, &|_, _, _| panic!("must not be called"));
        assert_eq!(result.unwrap(), Interface::new(Vec::new()));
    }

    #[test]
    fn successful_compile_persists_the_interface() {
        let dir = tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path(), "0.1.0");
        let source = dir.path().join("A.elm");
        std::fs::File::create(&source).unwrap();
        let data = BuildData { blocking: vec![], ready: HashMap::new(), location: Location::source(&source) };

        let result = run(&id(), &data, &layout, &|_, _, _| Ok(Interface::new(vec![7]))).unwrap();
        assert_eq!(result, Interface::new(vec![7]));
        assert_eq!(Interface::load(&layout.interface_path(&id())).unwrap(), Interface::new(vec![7]));
    }

    #[test]
    fn compile_failure_is_propagated() {
        let dir = tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path(), "0.1.0");
        let data = BuildData { blocking: vec![], ready: HashMap::new(), location: Location::source("A.elm") };

        let err = run(&id(), &data, &layout, &|_, loc, _| {
            Err(CompileError { path: loc.path.clone(), message: "boom".into(), diagnostics: vec!["boom".into()] })
        })
        .unwrap_err();
        assert_eq!(err.diagnostics, vec!["boom".to_string()]);
    }
}
