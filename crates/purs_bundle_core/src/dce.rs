//! The DCE engine (`compile`, spec.md §4.4): builds a member-level directed
//! graph, computes reachability from entry-point members, and produces a
//! new, filtered module list.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use purs_bundle_common::{ExportEntry, ExportType, Key, Module, ModuleElement, ModuleIdentifier};
use rustc_hash::FxHashMap;

/// Runs DCE from `entry_points` over `modules`, dropping unreachable
/// members and the export entries that named them. An empty entry-point
/// set is a no-op: DCE is skipped entirely (spec.md §4.4, invariant 2).
#[tracing::instrument(skip_all)]
pub fn dead_code_eliminate(modules: Vec<Module>, entry_points: &[ModuleIdentifier]) -> Vec<Module> {
  if entry_points.is_empty() {
    tracing::debug!("no entry points: DCE skipped");
    return modules;
  }

  let mut graph = DiGraph::<Key, ()>::new();
  let mut index_of: FxHashMap<Key, NodeIndex> = FxHashMap::default();

  for module in &modules {
    for (key, _deps) in module_vertices(&module.id, &module.elements) {
      index_of.entry(key.clone()).or_insert_with(|| graph.add_node(key));
    }
  }
  // Second pass: now that every vertex has a stable index, wire up edges.
  // Nonexistent targets (spec.md §4.4: "edges that refer to nonexistent
  // keys ... are silently skipped") simply have no entry in `index_of`.
  for module in &modules {
    for (key, deps) in module_vertices(&module.id, &module.elements) {
      let from = index_of[&key];
      for dep in deps {
        if let Some(&to) = index_of.get(dep) {
          graph.add_edge(from, to, ());
        }
      }
    }
  }

  let roots: Vec<NodeIndex> =
    index_of.iter().filter(|(key, _)| entry_points.contains(&key.module)).map(|(_, idx)| *idx).collect();

  let mut reachable = rustc_hash::FxHashSet::default();
  let mut dfs = Dfs::empty(&graph);
  for root in roots {
    dfs.move_to(root);
    while let Some(idx) = dfs.next(&graph) {
      reachable.insert(idx);
    }
  }

  let live: rustc_hash::FxHashSet<Key> = reachable.into_iter().map(|idx| graph[idx].clone()).collect();
  tracing::debug!(vertices = index_of.len(), live = live.len(), "dead-code elimination complete");

  modules.into_iter().map(|m| filter_module(m, &live)).collect()
}

/// Every graph vertex a module's elements contribute: one per `Member`,
/// plus one per `ExportsList` entry that isn't a same-named `RegularExport`
/// (spec.md §4.4). `Require` and `Other` contribute none.
fn module_vertices<'a>(
  module: &'a ModuleIdentifier,
  elements: &'a [ModuleElement],
) -> impl Iterator<Item = (Key, &'a [Key])> + 'a {
  elements.iter().flat_map(move |el| -> Box<dyn Iterator<Item = (Key, &'a [Key])>> {
    match el {
      ModuleElement::Member { name, deps, .. } => {
        Box::new(std::iter::once((Key::new(module.clone(), name.clone()), deps.as_slice())))
      }
      ModuleElement::ExportsList { entries, .. } => Box::new(entries.iter().filter_map(move |entry| {
        export_vertex(module, entry).map(|key| (key, entry.deps.as_slice()))
      })),
      ModuleElement::Require { .. } | ModuleElement::Other { .. } => Box::new(std::iter::empty()),
    }
  })
}

fn export_vertex(module: &ModuleIdentifier, entry: &ExportEntry) -> Option<Key> {
  match &entry.kind {
    ExportType::ForeignReexport => Some(Key::new(module.clone(), entry.exported_name.clone())),
    ExportType::RegularExport { source_name } if source_name != &entry.exported_name => {
      Some(Key::new(module.clone(), entry.exported_name.clone()))
    }
    ExportType::RegularExport { .. } => None,
  }
}

fn filter_module(module: Module, live: &rustc_hash::FxHashSet<Key>) -> Module {
  let Module { id, elements } = module;
  let elements = elements
    .into_iter()
    .filter_map(|el| match el {
      ModuleElement::Member { raw, exported, name, decl, deps } => {
        if live.contains(&Key::new(id.clone(), name.clone())) {
          Some(ModuleElement::Member { raw, exported, name, decl, deps })
        } else {
          None
        }
      }
      ModuleElement::ExportsList { raw, entries } => {
        let entries: Vec<ExportEntry> = entries
          .into_iter()
          .filter(|entry| match export_vertex(&id, entry) {
            Some(key) => live.contains(&key),
            // Plain `RegularExport(nm, nm, …)`: tested as `(mid, nm)`,
            // retained iff the same-named member survived (spec.md §4.4).
            None => live.contains(&Key::new(id.clone(), entry.exported_name.clone())),
          })
          .collect();
        Some(ModuleElement::ExportsList { raw, entries })
      }
      other @ (ModuleElement::Require { .. } | ModuleElement::Other { .. }) => Some(other),
    })
    .collect();
  Module::new(id, elements)
}

#[cfg(test)]
mod tests {
  use super::*;
  use purs_bundle_ast::{ident_expr, member_ident};
  use purs_bundle_common::RequireResolution;

  fn member(module: &ModuleIdentifier, name: &str, deps: Vec<Key>) -> ModuleElement {
    let decl = ident_expr("placeholder");
    let raw = purs_bundle_ast::expr_stmt(decl.clone());
    ModuleElement::Member { raw, exported: deps.is_empty(), name: name.to_string(), decl: Box::new(decl), deps }
  }

  #[test]
  fn empty_entry_points_is_a_no_op() {
    let a = ModuleIdentifier::regular("A");
    let module = Module::new(a.clone(), vec![member(&a, "x", vec![])]);
    let out = dead_code_eliminate(vec![module], &[]);
    assert_eq!(out[0].elements.len(), 1);
  }

  #[test]
  fn scenario_s1_basic_dce() {
    let a = ModuleIdentifier::regular("A");
    let b = ModuleIdentifier::regular("B");

    let module_a = Module::new(
      a.clone(),
      vec![
        member(&a, "a", vec![]),
        member(&a, "b", vec![]),
        ModuleElement::ExportsList {
          raw: purs_bundle_ast::expr_stmt(ident_expr("noop")),
          entries: vec![
            ExportEntry {
              kind: ExportType::RegularExport { source_name: "a".to_string() },
              exported_name: "a".to_string(),
              value: Box::new(ident_expr("a")),
              deps: vec![Key::new(a.clone(), "a".to_string())],
            },
            ExportEntry {
              kind: ExportType::RegularExport { source_name: "b".to_string() },
              exported_name: "b".to_string(),
              value: Box::new(ident_expr("b")),
              deps: vec![Key::new(a.clone(), "b".to_string())],
            },
          ],
        },
      ],
    );

    let require = ModuleElement::Require {
      raw: purs_bundle_ast::unresolved_require_stmt("A", "../A"),
      local_name: "A".to_string(),
      resolved: RequireResolution::Resolved(a.clone()),
    };
    // `exports.c = A.a;` is `exports.NAME = EXPR;` (spec.md §4.1.3), an
    // exported `Member`, not a `module.exports = {...}` `ExportsList` entry
    // — the latter only arises from an object-literal assignment. Modeling
    // it as a `Member` gives it its own DCE vertex, matching what the real
    // classifier would have produced from this source.
    let exported_c = member_ident(ident_expr("A"), "a");
    let module_b = Module::new(
      b.clone(),
      vec![
        require,
        ModuleElement::Member {
          raw: purs_bundle_ast::expr_stmt(exported_c.clone()),
          exported: true,
          name: "c".to_string(),
          decl: Box::new(exported_c),
          deps: vec![Key::new(a.clone(), "a".to_string())],
        },
      ],
    );

    let out = dead_code_eliminate(vec![module_a, module_b], &[b.clone()]);
    let out_a = out.iter().find(|m| m.id == a).unwrap();
    assert_eq!(out_a.members().collect::<Vec<_>>(), vec!["a"]);
    match &out_a.elements[1] {
      ModuleElement::ExportsList { entries, .. } => assert_eq!(entries.len(), 1),
      _ => panic!("expected ExportsList"),
    }
  }

  #[test]
  fn renaming_reexport_survives_with_its_member() {
    let a = ModuleIdentifier::regular("A");
    let module = Module::new(
      a.clone(),
      vec![
        member(&a, "x", vec![]),
        ModuleElement::ExportsList {
          raw: purs_bundle_ast::expr_stmt(ident_expr("noop")),
          entries: vec![ExportEntry {
            kind: ExportType::RegularExport { source_name: "x".to_string() },
            exported_name: "y".to_string(),
            value: Box::new(ident_expr("x")),
            deps: vec![Key::new(a.clone(), "x".to_string())],
          }],
        },
      ],
    );
    let out = dead_code_eliminate(vec![module], &[a.clone()]);
    let out_a = &out[0];
    assert_eq!(out_a.members().collect::<Vec<_>>(), vec!["x"]);
    match &out_a.elements[1] {
      ModuleElement::ExportsList { entries, .. } => assert_eq!(entries.len(), 1),
      _ => panic!("expected ExportsList"),
    }
  }

  #[test]
  fn same_named_export_dies_with_its_member() {
    let a = ModuleIdentifier::regular("A");
    let b = ModuleIdentifier::regular("B");
    let module_a = Module::new(
      a.clone(),
      vec![
        member(&a, "x", vec![]),
        ModuleElement::ExportsList {
          raw: purs_bundle_ast::expr_stmt(ident_expr("noop")),
          entries: vec![ExportEntry {
            kind: ExportType::RegularExport { source_name: "x".to_string() },
            exported_name: "x".to_string(),
            value: Box::new(ident_expr("x")),
            deps: vec![Key::new(a.clone(), "x".to_string())],
          }],
        },
      ],
    );
    // B doesn't reference A at all, so A.x is unreachable.
    let module_b = Module::new(b.clone(), vec![member(&b, "z", vec![])]);
    let out = dead_code_eliminate(vec![module_a, module_b], &[b.clone()]);
    let out_a = out.iter().find(|m| m.id == a).unwrap();
    assert!(out_a.members().next().is_none());
    match &out_a.elements[1] {
      ModuleElement::ExportsList { entries, .. } => assert!(entries.is_empty()),
      _ => panic!("expected ExportsList"),
    }
  }
}
