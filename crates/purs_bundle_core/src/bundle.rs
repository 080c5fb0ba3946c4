//! Wires every stage into the one entry point of spec.md §6.

use purs_bundle_common::{ModuleIdentifier, RequireResolution, DEFAULT_REQUIRE_PATH_PREFIX};
use purs_bundle_compiler::COMPILER;
use purs_bundle_error::{first_error, Error, Result};
use purs_bundle_transforms::{ModuleTransform, Uncurry};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::dce::dead_code_eliminate;
use crate::emit::code_gen;
use crate::options::{BundleOptions, BundleWarning, Optimize};
use crate::sort::sort_modules;

/// Parses, classifies, analyses, DCEs, optionally transforms + re-DCEs,
/// drops empty modules, topologically sorts, and emits — the `bundle()`
/// free function of spec.md §6.
///
/// `inputs` order has no observable effect on the output: downstream
/// stages only ever consume `modules` keyed by `ModuleIdentifier`, so
/// parsing/classification/analysis below may run in parallel (spec.md §5)
/// without perturbing the deterministic result.
#[tracing::instrument(skip_all, fields(modules = inputs.len()))]
pub fn bundle(inputs: Vec<(ModuleIdentifier, String)>, options: &BundleOptions) -> Result<String> {
  let require_path_prefix =
    if options.require_path_prefix.is_empty() { DEFAULT_REQUIRE_PATH_PREFIX } else { &options.require_path_prefix };

  let known_modules: FxHashSet<String> =
    inputs.iter().filter(|(id, _)| !id.is_foreign()).map(|(id, _)| id.name.clone()).collect();

  let classified: Vec<purs_bundle_classifier::Module> = first_error(
    inputs
      .into_par_iter()
      .map(|(id, source)| {
        let script = COMPILER.parse_script(&id.to_string(), source)?;
        purs_bundle_classifier::to_module(
          require_path_prefix,
          &known_modules,
          id,
          swc_core::ecma::ast::Program::Script(script),
        )
      })
      .collect(),
  )?;

  check_requires(&classified, require_path_prefix, options)?;

  let mut modules: Vec<_> = classified.into_par_iter().map(purs_bundle_analysis::with_deps).collect();
  modules = dead_code_eliminate(modules, &options.entry_points);

  if options.optimize == Optimize::Uncurry {
    modules = Uncurry.apply(modules, &options.entry_points);
    modules = modules.into_par_iter().map(purs_bundle_analysis::with_deps).collect();
    modules = dead_code_eliminate(modules, &options.entry_points);
  }

  let modules = sort_modules(modules);
  tracing::info!(modules = modules.len(), "emitting bundle");
  Ok(code_gen(&options.namespace, options.main_module.as_deref(), &modules))
}

/// Flags `Require`s that look like a broken internal reference: the
/// literal starts with `require_path_prefix` but names no known module, so
/// resolution fell back to `Unresolved` even though it was clearly meant
/// to point at another module in the program (spec.md §7,
/// `UnsupportedModulePath`; SPEC_FULL.md §4.9's `strict_requires`).
///
/// A literal that never looked like an internal path at all (`require("util")`)
/// is never flagged — that's genuinely external and always resolves to
/// `Unresolved` by design (spec.md §4.1).
fn check_requires(
  modules: &[purs_bundle_classifier::Module],
  require_path_prefix: &str,
  options: &BundleOptions,
) -> Result<()> {
  for module in modules {
    for el in &module.elements {
      let purs_bundle_common::ModuleElement::Require { resolved: RequireResolution::Unresolved(path), .. } = el
      else {
        continue;
      };
      if !path.starts_with(require_path_prefix) {
        continue;
      }
      if options.strict_requires {
        return Err(Error::unsupported_module_path(path.clone()).in_module(module.id.clone()));
      }
      (options.on_warn)(BundleWarning {
        module: module.id.clone(),
        message: format!("require path `{path}` looks internal but names no known module"),
      });
    }
  }
  Ok(())
}
