//! The module classifier (`toModule`, spec.md §4.1) and the foreign export
//! extractor (spec.md §4.2).

use purs_bundle_ast::{
  match_export_value, match_exported_member, match_exports_list, match_member_var, match_require,
  ExportValueShape, RawExportProp,
};
use purs_bundle_common::{
  ExportEntry, ExportType, ModuleElement, ModuleIdentifier, RequireResolution,
  DEFAULT_REQUIRE_PATH_PREFIX, FOREIGN_REQUIRE_PATH,
};
use purs_bundle_error::{Error, Result};
use rustc_hash::FxHashSet;
use swc_core::ecma::ast::{Program, Stmt};

pub use purs_bundle_common::Module;

/// Walks `program`'s top-level statements and classifies each one, in
/// order, as `Require`, `Member`, `ExportsList`, or `Other` (spec.md §4.1).
///
/// `require_path_prefix` defaults to `"../"` when empty, matching the
/// bundler-wide default in spec.md §6.
#[tracing::instrument(skip_all, fields(module = %id))]
pub fn to_module(
  require_path_prefix: &str,
  known_modules: &FxHashSet<String>,
  id: ModuleIdentifier,
  program: Program,
) -> Result<Module> {
  let prefix = if require_path_prefix.is_empty() { DEFAULT_REQUIRE_PATH_PREFIX } else { require_path_prefix };

  let Program::Script(script) = program else {
    return Err(Error::invalid_top_level().in_module(id));
  };

  let elements = script
    .body
    .into_iter()
    .map(|stmt| classify_stmt(prefix, known_modules, &id, stmt))
    .collect::<Result<Vec<_>>>()?;

  tracing::debug!(module = %id, elements = elements.len(), "classified module");
  Ok(Module::new(id, elements))
}

fn classify_stmt(
  require_path_prefix: &str,
  known_modules: &FxHashSet<String>,
  id: &ModuleIdentifier,
  stmt: Stmt,
) -> Result<ModuleElement> {
  if let Some((local_name, literal)) = match_require(&stmt) {
    let resolved = resolve_require(require_path_prefix, known_modules, id, &literal);
    return Ok(ModuleElement::Require { raw: stmt, local_name, resolved });
  }

  if let Some((name, decl)) = match_member_var(&stmt) {
    return Ok(ModuleElement::Member { raw: stmt, exported: false, name, decl: Box::new(decl), deps: vec![] });
  }

  if let Some((name, decl)) = match_exported_member(&stmt) {
    return Ok(ModuleElement::Member { raw: stmt, exported: true, name, decl: Box::new(decl), deps: vec![] });
  }

  if let Some(result) = match_exports_list(&stmt) {
    let props = result.map_err(|()| Error::unsupported_export().in_module(id.clone()))?;
    let entries = props
      .into_iter()
      .map(|RawExportProp { exported_name, value }| classify_export_entry(id, exported_name, value))
      .collect::<Result<Vec<_>>>()?;
    return Ok(ModuleElement::ExportsList { raw: stmt, entries });
  }

  Ok(ModuleElement::Other { raw: stmt })
}

fn classify_export_entry(
  id: &ModuleIdentifier,
  exported_name: String,
  value: swc_core::ecma::ast::Expr,
) -> Result<ExportEntry> {
  let kind = match match_export_value(&value) {
    Some(ExportValueShape::Ident(source_name)) => ExportType::RegularExport { source_name },
    Some(ExportValueShape::ForeignMember) => ExportType::ForeignReexport,
    None => return Err(Error::unsupported_export().in_module(id.clone())),
  };
  Ok(ExportEntry { kind, exported_name, value: Box::new(value), deps: vec![] })
}

/// Resolves a `require` literal per spec.md §4.1.1: `"./foreign"` resolves
/// to this module's foreign twin; otherwise the `requirePath` prefix is
/// stripped and the remainder looked up in `knownModules`.
fn resolve_require(
  prefix: &str,
  known_modules: &FxHashSet<String>,
  this_module: &ModuleIdentifier,
  literal: &str,
) -> RequireResolution {
  if literal == FOREIGN_REQUIRE_PATH {
    return RequireResolution::Resolved(ModuleIdentifier::foreign(this_module.name.clone()));
  }
  if let Some(remainder) = literal.strip_prefix(prefix) {
    if known_modules.contains(remainder) {
      return RequireResolution::Resolved(ModuleIdentifier::regular(remainder));
    }
  }
  RequireResolution::Unresolved(literal.to_string())
}

/// The names a `Foreign` module exports, for callers that validate declared
/// foreign imports against what's actually available (spec.md §4.2).
pub fn extract_foreign_exports(module_name: &str, program: Program) -> Result<Vec<String>> {
  let id = ModuleIdentifier::foreign(module_name);
  let Program::Script(script) = program else {
    return Err(Error::invalid_top_level().in_module(id));
  };

  let mut names = Vec::new();
  for stmt in &script.body {
    if let Some((name, _decl)) = match_exported_member(stmt) {
      names.push(name);
      continue;
    }
    if let Some(result) = match_exports_list(stmt) {
      let props = result.map_err(|()| Error::unsupported_export().in_module(id.clone()))?;
      names.extend(props.into_iter().map(|p| p.exported_name));
    }
  }
  Ok(names)
}
