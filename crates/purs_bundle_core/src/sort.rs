//! The module sorter (spec.md §4.6): drops empty modules, then
//! topologically sorts the survivors by their `Require` edges so
//! dependencies are emitted before dependents.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use purs_bundle_common::{Module, ModuleElement, ModuleIdentifier, RequireResolution};
use rustc_hash::FxHashMap;

/// Drops empty modules (spec.md §4.6) and returns the rest in a
/// topological order of the `Require` DAG: for any `Require` edge from `A`
/// to `B`, `B` precedes `A` in the result.
#[tracing::instrument(skip_all)]
pub fn sort_modules(modules: Vec<Module>) -> Vec<Module> {
  let mut by_id: FxHashMap<ModuleIdentifier, Module> =
    modules.into_iter().filter(|m| !m.is_empty()).map(|m| (m.id.clone(), m)).collect();

  let mut graph = DiGraph::<ModuleIdentifier, ()>::new();
  let mut index_of: FxHashMap<ModuleIdentifier, NodeIndex> = FxHashMap::default();
  for id in by_id.keys() {
    index_of.insert(id.clone(), graph.add_node(id.clone()));
  }
  for module in by_id.values() {
    for el in &module.elements {
      if let ModuleElement::Require { resolved: RequireResolution::Resolved(target), .. } = el {
        // Modules that appear as require targets but aren't in the input
        // list get no vertex and are skipped (spec.md §4.6).
        if let (Some(&from), Some(&to)) = (index_of.get(&module.id), index_of.get(target)) {
          graph.add_edge(from, to, ());
        }
      }
    }
  }

  // `toposort` orders nodes so that for every edge u -> v, u precedes v.
  // Our edges point from a requiring module to its dependency, so that
  // order has dependents first; reversing it puts dependencies first.
  let order = toposort(&graph, None)
    .unwrap_or_else(|cycle| panic!("module-level Require graph has a cycle at {:?}; the input language guarantees a DAG", graph[cycle.node_id()]));

  order
    .into_iter()
    .rev()
    .map(|idx| {
      let id = &graph[idx];
      by_id.remove(id).expect("every graph vertex came from by_id")
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use purs_bundle_common::ModuleElement;

  fn require(local: &str, target: &ModuleIdentifier) -> ModuleElement {
    ModuleElement::Require {
      raw: purs_bundle_ast::unresolved_require_stmt(local, "placeholder"),
      local_name: local.to_string(),
      resolved: RequireResolution::Resolved(target.clone()),
    }
  }

  #[test]
  fn drops_empty_modules() {
    let a = ModuleIdentifier::regular("A");
    let module = Module::new(a, vec![ModuleElement::Other { raw: purs_bundle_ast::expr_stmt(purs_bundle_ast::ident_expr("x")) }]);
    assert!(sort_modules(vec![module]).is_empty());
  }

  #[test]
  fn scenario_s6_dependencies_precede_dependents() {
    let a = ModuleIdentifier::regular("A");
    let b = ModuleIdentifier::regular("B");
    let c = ModuleIdentifier::regular("C");

    let non_empty = |name: &str| {
      ModuleElement::Member {
        raw: purs_bundle_ast::expr_stmt(purs_bundle_ast::ident_expr("x")),
        exported: false,
        name: name.to_string(),
        decl: Box::new(purs_bundle_ast::ident_expr("x")),
        deps: vec![],
      }
    };

    let module_a = Module::new(a.clone(), vec![require("B", &b), non_empty("a")]);
    let module_b = Module::new(b.clone(), vec![require("C", &c), non_empty("b")]);
    let module_c = Module::new(c.clone(), vec![non_empty("c")]);

    let sorted = sort_modules(vec![module_a, module_b, module_c]);
    let position = |id: &ModuleIdentifier| sorted.iter().position(|m| &m.id == id).unwrap();
    assert!(position(&c) < position(&b));
    assert!(position(&b) < position(&a));
  }

  #[test]
  fn skips_require_targets_absent_from_input() {
    let a = ModuleIdentifier::regular("A");
    let missing = ModuleIdentifier::regular("Missing");
    let module_a = Module::new(
      a.clone(),
      vec![
        require("Missing", &missing),
        ModuleElement::Member {
          raw: purs_bundle_ast::expr_stmt(purs_bundle_ast::ident_expr("x")),
          exported: false,
          name: "a".to_string(),
          decl: Box::new(purs_bundle_ast::ident_expr("x")),
          deps: vec![],
        },
      ],
    );
    let sorted = sort_modules(vec![module_a]);
    assert_eq!(sorted.len(), 1);
    assert_eq!(sorted[0].id, a);
  }
}
