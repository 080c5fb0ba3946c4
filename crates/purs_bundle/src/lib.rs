//! Public facade: re-exports the core bundler API for downstream
//! consumers (the `demos/` binaries below, and whatever CLI/config loader
//! a caller wires on top — both explicitly out of scope for this crate,
//! per spec.md §1).

pub use purs_bundle_core::{
  bundle, BundleOptions, BundleWarning, Error, ErrorKind, ExportEntry, ExportType, Key, Module,
  ModuleElement, ModuleIdentifier, ModuleType, Optimize, RequireResolution, Result, WarnHandler,
};
