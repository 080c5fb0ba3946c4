//! Shared data model for the bundler: `ModuleIdentifier`, `Key`, the
//! classified `ModuleElement` variants and the `Module` they live in.
//!
//! Everything here is constructed once during classification/analysis and is
//! immutable afterwards; dead-code elimination builds a *new* `Module` list
//! rather than mutating these in place.

mod element;
mod id;
mod key;
mod module;

pub use element::{ExportEntry, ExportType, ModuleElement, RequireResolution};
pub use id::{ModuleIdentifier, ModuleType};
pub use key::Key;
pub use module::{Module, ModuleById};

/// The literal `require("./foreign")` specifier every regular module uses to
/// pull in its hand-written native twin.
pub const FOREIGN_REQUIRE_PATH: &str = "./foreign";

/// Default prefix stripped from `require` literals before looking them up in
/// `knownModules` (spec.md §4.1, §6).
pub const DEFAULT_REQUIRE_PATH_PREFIX: &str = "../";
