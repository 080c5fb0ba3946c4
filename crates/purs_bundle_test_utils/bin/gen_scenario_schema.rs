//! Prints the JSON Schema for `ScenarioConfig` to stdout.

use purs_bundle_test_utils::ScenarioConfig;

fn main() {
  let schema = schemars::schema_for!(ScenarioConfig);
  println!("{}", serde_json::to_string_pretty(&schema).expect("schema always serializes"));
}
