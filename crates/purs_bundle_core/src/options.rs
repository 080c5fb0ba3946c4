//! `bundle()`'s configuration surface (spec.md §6, SPEC_FULL.md §4.9):
//! the six positional parameters collected into one struct.

use std::sync::Arc;

use purs_bundle_common::{ModuleIdentifier, DEFAULT_REQUIRE_PATH_PREFIX};

/// Which optional `ModuleTransform` (spec.md §4.5) the pipeline runs between
/// its two DCE passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Optimize {
  #[default]
  None,
  Uncurry,
}

impl Optimize {
  /// Parses the `optimize: option<string>` bundler parameter (spec.md §6).
  /// Any value other than the four recognised spellings means "off".
  pub fn parse(value: Option<&str>) -> Self {
    match value {
      Some("uncurry" | "u" | "all" | "a") => Self::Uncurry,
      _ => Self::None,
    }
  }
}

/// A non-fatal diagnostic raised while building the bundle. Unlike
/// `purs_bundle_error::Error`, a warning never aborts the pipeline
/// (spec.md §7's error model is strictly fatal-only; this is the one
/// ambient escape hatch for non-fatal diagnostics).
#[derive(Debug, Clone)]
pub struct BundleWarning {
  pub module: ModuleIdentifier,
  pub message: String,
}

impl std::fmt::Display for BundleWarning {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "warning in module `{}`: {}", self.module, self.message)
  }
}

pub type WarnHandler = Arc<dyn Fn(BundleWarning) + Send + Sync>;

fn default_warning_handler() -> WarnHandler {
  Arc::new(|warning| tracing::warn!("{warning}"))
}

/// The bundler's full set of knobs (spec.md §6's six `bundle()` parameters,
/// minus `inputs` itself which stays a plain argument).
#[derive(Clone)]
pub struct BundleOptions {
  pub entry_points: Vec<ModuleIdentifier>,
  pub main_module: Option<String>,
  pub namespace: String,
  pub require_path_prefix: String,
  pub optimize: Optimize,
  /// When set, a `Require` literal that starts with `require_path_prefix`
  /// but names no known module aborts the pipeline with
  /// `UnsupportedModulePath` instead of silently falling back to
  /// `Unresolved` (spec.md §7). Off by default, matching the core's own
  /// tolerant resolution in `purs_bundle_classifier`.
  pub strict_requires: bool,
  pub on_warn: WarnHandler,
}

impl Default for BundleOptions {
  fn default() -> Self {
    Self {
      entry_points: Vec::new(),
      main_module: None,
      namespace: "PS".to_string(),
      require_path_prefix: DEFAULT_REQUIRE_PATH_PREFIX.to_string(),
      optimize: Optimize::None,
      strict_requires: false,
      on_warn: default_warning_handler(),
    }
  }
}

impl std::fmt::Debug for BundleOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BundleOptions")
      .field("entry_points", &self.entry_points)
      .field("main_module", &self.main_module)
      .field("namespace", &self.namespace)
      .field("require_path_prefix", &self.require_path_prefix)
      .field("optimize", &self.optimize)
      .field("strict_requires", &self.strict_requires)
      .field("on_warn", &"<fn>")
      .finish()
  }
}
