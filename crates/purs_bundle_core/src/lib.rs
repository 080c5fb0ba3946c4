//! The bundler core (spec.md §2): DCE engine, module sorter, emitter, and
//! the `bundle()` entry point that wires them to the classifier/analyser
//! crates below.

mod bundle;
mod dce;
mod emit;
mod options;
mod sort;

pub use bundle::bundle;
pub use dce::dead_code_eliminate;
pub use emit::code_gen;
pub use options::{BundleOptions, BundleWarning, Optimize, WarnHandler};
pub use sort::sort_modules;

pub use purs_bundle_common::{
  ExportEntry, ExportType, Key, Module, ModuleElement, ModuleIdentifier, ModuleType,
  RequireResolution,
};
pub use purs_bundle_error::{Error, ErrorKind, Result};
