use swc_core::ecma::ast::{Expr, Stmt};

use crate::{Key, ModuleIdentifier};

/// Where a `require(...)` literal ends up pointing, per spec.md §4.1.
#[derive(Debug, Clone)]
pub enum RequireResolution {
  /// An internal module reference, already resolved to its identifier.
  Resolved(ModuleIdentifier),
  /// Left to the emitter as a literal `require(path)` call.
  Unresolved(String),
}

/// The shape of an `ExportsList` entry's right-hand side (spec.md §3).
#[derive(Debug, Clone)]
pub enum ExportType {
  /// `exports.x = y;` where `y` is a bare identifier naming `sourceName`.
  RegularExport { source_name: String },
  /// `exports.x = $foreign.x;` or `exports.x = $foreign["x"];`.
  ForeignReexport,
}

/// One property of a `module.exports = { … };` object literal.
#[derive(Debug)]
pub struct ExportEntry {
  pub kind: ExportType,
  pub exported_name: String,
  pub value: Box<Expr>,
  pub deps: Vec<Key>,
}

/// A classified top-level statement. `raw` always carries the original AST
/// node so the emitter can render it untouched (spec.md §4.7).
#[derive(Debug)]
pub enum ModuleElement {
  Require { raw: Stmt, local_name: String, resolved: RequireResolution },
  Member { raw: Stmt, exported: bool, name: String, decl: Box<Expr>, deps: Vec<Key> },
  ExportsList { raw: Stmt, entries: Vec<ExportEntry> },
  Other { raw: Stmt },
}

impl ModuleElement {
  /// `true` for a `Member`/`ExportsList` with no surviving entries; `Other`
  /// and `Require` are never considered empty (spec.md §4.6).
  pub fn is_meaningless(&self) -> bool {
    matches!(self, ModuleElement::Require { .. } | ModuleElement::Other { .. })
      || matches!(self, ModuleElement::ExportsList { entries, .. } if entries.is_empty())
  }
}
