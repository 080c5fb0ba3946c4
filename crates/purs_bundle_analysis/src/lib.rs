//! The dependency analyser (`withDeps`, spec.md §4.3): fills in every
//! `Member`/`ExportEntry`'s `deps` list by walking its declaration
//! expression syntactically, with no scope or shadowing model.
//!
//! Two lookup tables are built once per module before the walk starts:
//! `imports` maps a `require`-bound local name to the module it resolved to,
//! `bound_names` is the set of this module's own `Member` names. Both are
//! read-only for the rest of the analysis.

use purs_bundle_ast::match_qualified_member;
use purs_bundle_common::{ExportEntry, Key, Module, ModuleElement, ModuleIdentifier, RequireResolution};
use rustc_hash::{FxHashMap, FxHashSet};
use swc_core::ecma::ast::Expr;
use swc_core::ecma::visit::{Visit, VisitWith};

/// Computes dependencies for every `Member` and `ExportsList` entry in
/// `module`, returning a new `Module` with the same elements in the same
/// order and every `deps` list populated.
#[tracing::instrument(skip_all, fields(module = %module.id))]
pub fn with_deps(module: Module) -> Module {
  let Module { id, elements } = module;
  let imports = build_imports(&elements);
  let bound_names = build_bound_names(&elements);

  let elements = elements
    .into_iter()
    .map(|el| match el {
      ModuleElement::Member { raw, exported, name, decl, .. } => {
        let deps = collect_deps(&imports, &bound_names, &id, &decl);
        ModuleElement::Member { raw, exported, name, decl, deps }
      }
      ModuleElement::ExportsList { raw, entries } => {
        let entries = entries
          .into_iter()
          .map(|ExportEntry { kind, exported_name, value, .. }| {
            let deps = collect_deps(&imports, &bound_names, &id, &value);
            ExportEntry { kind, exported_name, value, deps }
          })
          .collect();
        ModuleElement::ExportsList { raw, entries }
      }
      other @ (ModuleElement::Require { .. } | ModuleElement::Other { .. }) => other,
    })
    .collect();

  tracing::debug!(module = %id, "computed dependency lists");
  Module::new(id, elements)
}

fn build_imports(elements: &[ModuleElement]) -> FxHashMap<String, ModuleIdentifier> {
  elements
    .iter()
    .filter_map(|el| match el {
      ModuleElement::Require { local_name, resolved: RequireResolution::Resolved(mid), .. } => {
        Some((local_name.clone(), mid.clone()))
      }
      _ => None,
    })
    .collect()
}

fn build_bound_names(elements: &[ModuleElement]) -> FxHashSet<String> {
  elements
    .iter()
    .filter_map(|el| match el {
      ModuleElement::Member { name, .. } => Some(name.clone()),
      _ => None,
    })
    .collect()
}

fn collect_deps(
  imports: &FxHashMap<String, ModuleIdentifier>,
  bound_names: &FxHashSet<String>,
  this_module: &ModuleIdentifier,
  expr: &Expr,
) -> Vec<Key> {
  let mut collector = DepsCollector {
    imports,
    bound_names,
    this_module,
    deps: Vec::new(),
    seen: FxHashSet::default(),
  };
  expr.visit_with(&mut collector);
  collector.deps
}

struct DepsCollector<'a> {
  imports: &'a FxHashMap<String, ModuleIdentifier>,
  bound_names: &'a FxHashSet<String>,
  this_module: &'a ModuleIdentifier,
  deps: Vec<Key>,
  seen: FxHashSet<Key>,
}

impl<'a> DepsCollector<'a> {
  fn push(&mut self, key: Key) {
    if self.seen.insert(key.clone()) {
      self.deps.push(key);
    }
  }
}

impl<'a> Visit for DepsCollector<'a> {
  fn visit_expr(&mut self, expr: &Expr) {
    if let Some((local, member)) = match_qualified_member(expr) {
      if let Some(mid) = self.imports.get(local) {
        self.push(Key::new(mid.clone(), member));
      } else if self.bound_names.contains(local) {
        self.push(Key::new(self.this_module.clone(), local.to_string()));
      }
      // The property name is never itself a reference; stop here either way.
      return;
    }

    if let Expr::Ident(ident) = expr {
      let name = ident.sym.as_ref();
      if self.bound_names.contains(name) {
        self.push(Key::new(self.this_module.clone(), name.to_string()));
      }
      return;
    }

    expr.visit_children_with(self);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use purs_bundle_ast::{call, ident_expr, member_ident, resolved_require_stmt};
  use purs_bundle_common::ModuleType;
  use swc_core::common::DUMMY_SP;
  use swc_core::ecma::ast::{ExprStmt, Stmt};

  fn member(name: &str, decl: Expr) -> ModuleElement {
    let raw = Stmt::Expr(ExprStmt { span: DUMMY_SP, expr: Box::new(decl.clone()) });
    ModuleElement::Member { raw, exported: false, name: name.to_string(), decl: Box::new(decl), deps: vec![] }
  }

  #[test]
  fn bare_ident_dependency_on_sibling_member() {
    let module = Module::new(
      ModuleIdentifier::regular("A"),
      vec![member("x", ident_expr("literal_one")), member("y", ident_expr("x"))],
    );
    let module = with_deps(module);
    match &module.elements[1] {
      ModuleElement::Member { deps, .. } => {
        assert_eq!(deps, &vec![Key::new(ModuleIdentifier::regular("A"), "x")]);
      }
      _ => panic!("expected a Member"),
    }
  }

  #[test]
  fn qualified_member_dependency_on_resolved_require() {
    let require_stmt = resolved_require_stmt("B", "NS", "B");
    let require = ModuleElement::Require {
      raw: require_stmt,
      local_name: "B".to_string(),
      resolved: RequireResolution::Resolved(ModuleIdentifier::regular("B")),
    };
    let decl = member_ident(ident_expr("B"), "helper");
    let module = Module::new(ModuleIdentifier::regular("A"), vec![require, member("x", decl)]);
    let module = with_deps(module);
    match &module.elements[1] {
      ModuleElement::Member { deps, .. } => {
        assert_eq!(deps, &vec![Key::new(ModuleIdentifier::regular("B"), "helper")]);
      }
      _ => panic!("expected a Member"),
    }
  }

  #[test]
  fn unresolved_require_local_produces_no_dependency() {
    let raw = resolved_require_stmt("util", "NS", "util");
    let require = ModuleElement::Require {
      raw,
      local_name: "util".to_string(),
      resolved: RequireResolution::Unresolved("util".to_string()),
    };
    let decl = member_ident(ident_expr("util"), "noop");
    let module = Module::new(ModuleIdentifier::regular("A"), vec![require, member("x", decl)]);
    let module = with_deps(module);
    match &module.elements[1] {
      ModuleElement::Member { deps, .. } => assert!(deps.is_empty()),
      _ => panic!("expected a Member"),
    }
  }

  #[test]
  fn deduplicates_repeated_reference_preserving_first_seen_order() {
    let decl = call(ident_expr("helper"), vec![ident_expr("helper"), ident_expr("other")]);
    let module = Module::new(
      ModuleIdentifier::regular("A"),
      vec![member("helper", ident_expr("lit")), member("other", ident_expr("lit")), member("x", decl)],
    );
    let module = with_deps(module);
    match &module.elements[2] {
      ModuleElement::Member { deps, .. } => {
        assert_eq!(
          deps,
          &vec![
            Key::new(ModuleIdentifier::regular("A"), "helper"),
            Key::new(ModuleIdentifier::regular("A"), "other"),
          ]
        );
      }
      _ => panic!("expected a Member"),
    }
  }

  #[test]
  fn foreign_module_identity_is_distinct_namespace() {
    let decl = ident_expr("x");
    let module =
      Module::new(ModuleIdentifier::foreign("A"), vec![member("x", ident_expr("lit")), member("y", decl)]);
    let module = with_deps(module);
    assert_eq!(module.id.ty, ModuleType::Foreign);
    match &module.elements[1] {
      ModuleElement::Member { deps, .. } => {
        assert_eq!(deps, &vec![Key::new(ModuleIdentifier::foreign("A"), "x")]);
      }
      _ => panic!("expected a Member"),
    }
  }
}
