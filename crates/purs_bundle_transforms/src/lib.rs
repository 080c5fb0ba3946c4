//! The optional `ModuleTransform` hook (spec.md §4.5): a pure
//! `list<Module> × list<ModuleIdentifier> → list<Module>` function the
//! pipeline may run between two DCE passes. Opaque to the core by
//! contract — only this trait's signature and purity matter there.

mod uncurry;

use purs_bundle_common::{Module, ModuleIdentifier};

pub use uncurry::Uncurry;

/// A pure, module-rewriting pass. Implementations must not invent new
/// modules or alter `ModuleIdentifier`s (spec.md §4.5).
pub trait ModuleTransform {
  fn name(&self) -> &'static str;
  fn apply(&self, modules: Vec<Module>, entry_points: &[ModuleIdentifier]) -> Vec<Module>;
}
