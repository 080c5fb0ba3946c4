//! Bundles from one of `purs_bundle_test_utils`'s scenario fixtures.

use std::{env, process};

use purs_bundle::bundle;
use purs_bundle_test_utils::ScenarioConfig;

fn main() {
  purs_bundle_tracing::init_tracing("purs_bundle_core=info,warn");

  let Some(path) = env::args().nth(1) else {
    eprintln!("usage: from_fixtures <scenario.json>");
    process::exit(2);
  };

  let scenario = ScenarioConfig::from_path(path.as_ref());
  let (inputs, options) = scenario.into_bundle_inputs();

  match bundle(inputs, &options) {
    Ok(output) => println!("{output}"),
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}
