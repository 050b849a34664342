#![doc = include_str!("../README.md")]
#![warn(rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

pub mod analyzer;
pub mod artifact_dir;
pub mod build_summary;
pub mod config;
pub mod error;
pub mod interface;
pub mod location;
pub mod module_id;
pub mod project_summary;
pub mod queue;
pub mod scheduler;
pub mod timeline;

pub use build_summary::{BuildData, BuildSummary};
pub use error::{BuildError, CompileError};
pub use interface::Interface;
pub use location::Location;
pub use module_id::{ModuleId, Package};
pub use project_summary::{ProjectData, ProjectSummary};
pub use scheduler::Scheduler;
