//! The emitter (`codeGen`, spec.md §4.7): renders a prelude, each
//! surviving module's IIFE wrapper, and an optional `main()` call, to a
//! single deterministic JS source string.

use purs_bundle_ast::{
  exports_assign_stmt, iife_install_stmt, main_call_stmt, namespace_init_stmt,
  resolved_require_stmt, unresolved_require_stmt,
};
use purs_bundle_common::{Module, ModuleElement, RequireResolution};
use swc_core::ecma::ast::{Program, Script, Stmt};
use swc_core::common::DUMMY_SP;

pub const BUNDLER_NAME: &str = "purs-bundle";
pub const BUNDLER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Renders the bundle's shape from spec.md §4.7:
///
/// ```text
/// // Generated by <bundler-name> <version>
/// var <NS> = {};
/// (function(exports) { <module 1 body> })(<NS>["mod1"] = <NS>["mod1"] || {});
/// …
/// <NS>["<mainModule>"].main();    // iff a main module is specified
/// ```
#[tracing::instrument(skip_all, fields(namespace, modules = modules.len()))]
pub fn code_gen(namespace: &str, main_module: Option<&str>, modules: &[Module]) -> String {
  let mut body = vec![namespace_init_stmt(namespace)];
  for module in modules {
    let slot = module.id.namespace_slot().to_string();
    body.push(iife_install_stmt(namespace, &slot, render_module_body(module, namespace)));
  }
  if let Some(main_module) = main_module {
    body.push(main_call_stmt(namespace, main_module));
  }

  let script = Script { span: DUMMY_SP, body, shebang: None };
  let printed = purs_bundle_compiler::COMPILER.print(&Program::Script(script));
  format!("// Generated by {BUNDLER_NAME} {BUNDLER_VERSION}\n{printed}")
}

fn render_module_body(module: &Module, namespace: &str) -> Vec<Stmt> {
  module
    .elements
    .iter()
    .flat_map(|el| -> Vec<Stmt> {
      match el {
        ModuleElement::Require { local_name, resolved, .. } => match resolved {
          RequireResolution::Resolved(mid) => {
            vec![resolved_require_stmt(local_name, namespace, mid.namespace_slot())]
          }
          RequireResolution::Unresolved(path) => vec![unresolved_require_stmt(local_name, path)],
        },
        ModuleElement::Member { raw, .. } | ModuleElement::Other { raw } => vec![raw.clone()],
        ModuleElement::ExportsList { entries, .. } => {
          entries.iter().map(|entry| exports_assign_stmt(&entry.exported_name, (*entry.value).clone())).collect()
        }
      }
    })
    .collect()
}
