use rustc_hash::FxHashMap;

use crate::{ModuleElement, ModuleIdentifier};

/// A classified module: source order of `elements` is preserved through
/// every transform in the pipeline (spec.md §3).
#[derive(Debug)]
pub struct Module {
  pub id: ModuleIdentifier,
  pub elements: Vec<ModuleElement>,
}

impl Module {
  pub fn new(id: ModuleIdentifier, elements: Vec<ModuleElement>) -> Self {
    Self { id, elements }
  }

  /// A module is empty iff every element is a `Require`, an `Other`, or an
  /// `ExportsList` whose entries are all gone (spec.md §4.6).
  pub fn is_empty(&self) -> bool {
    self.elements.iter().all(ModuleElement::is_meaningless)
  }

  pub fn members(&self) -> impl Iterator<Item = &str> {
    self.elements.iter().filter_map(|el| match el {
      ModuleElement::Member { name, .. } => Some(name.as_str()),
      _ => None,
    })
  }
}

/// Keyed lookup table used throughout the pipeline.
pub type ModuleById = FxHashMap<ModuleIdentifier, Module>;
