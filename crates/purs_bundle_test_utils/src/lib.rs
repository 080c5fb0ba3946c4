//! Fixture-driven end-to-end scenario configs, deserialized with `serde`
//! and scoped to this bundler's own `BundleOptions` surface (spec.md §6,
//! SPEC_FULL.md §8).

use std::path::Path;

use purs_bundle_core::{BundleOptions, ModuleIdentifier, Optimize};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleSource {
  pub name: String,
  #[serde(default)]
  pub foreign: bool,
  pub source: String,
}

/// One bundling scenario: a handful of module sources plus the
/// `bundle()` parameters to run them through (spec.md §6).
#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScenarioConfig {
  pub modules: Vec<ModuleSource>,
  #[serde(default)]
  pub entry_points: Vec<String>,
  #[serde(default)]
  pub main_module: Option<String>,
  #[serde(default = "default_namespace")]
  pub namespace: String,
  #[serde(default)]
  pub require_path_prefix: Option<String>,
  #[serde(default)]
  pub optimize: Option<String>,
  #[serde(default)]
  pub strict_requires: bool,
  /// When set, the scenario asserts `bundle()` fails rather than asserting
  /// on the output string.
  #[serde(default)]
  pub expected_error: Option<String>,
}

fn default_namespace() -> String {
  "PS".to_string()
}

impl ScenarioConfig {
  pub fn from_path(path: &Path) -> Self {
    let raw = std::fs::read_to_string(path).expect("failed to read scenario config file");
    Self::from_json(&raw)
  }

  pub fn from_json(raw: &str) -> Self {
    serde_json::from_str(raw).expect("failed to parse scenario config file")
  }

  /// Builds the `(inputs, options)` pair `purs_bundle_core::bundle` takes.
  pub fn into_bundle_inputs(self) -> (Vec<(ModuleIdentifier, String)>, BundleOptions) {
    let inputs = self
      .modules
      .into_iter()
      .map(|m| {
        let id = if m.foreign { ModuleIdentifier::foreign(m.name) } else { ModuleIdentifier::regular(m.name) };
        (id, m.source)
      })
      .collect();

    let options = BundleOptions {
      entry_points: self.entry_points.into_iter().map(ModuleIdentifier::regular).collect(),
      main_module: self.main_module,
      namespace: self.namespace,
      require_path_prefix: self.require_path_prefix.unwrap_or_default(),
      optimize: Optimize::parse(self.optimize.as_deref()),
      strict_requires: self.strict_requires,
      ..BundleOptions::default()
    };

    (inputs, options)
  }
}
