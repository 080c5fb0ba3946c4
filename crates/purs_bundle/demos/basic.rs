//! Reads every `.js` file in a directory, treats its stem as the module
//! name, bundles from a given entry point, and writes the result to
//! stdout. Demonstrates the documented boundary: the core takes source
//! strings in and a string out, the caller does all the file I/O
//! (spec.md §1, §5).

use std::path::PathBuf;
use std::{env, fs, process};

use purs_bundle::{bundle, BundleOptions, ModuleIdentifier};

fn main() {
  purs_bundle_tracing::init_tracing("purs_bundle_core=info,warn");

  let mut args = env::args().skip(1);
  let Some(dir) = args.next() else {
    eprintln!("usage: basic <module-dir> <entry-module-name> [main-module-name]");
    process::exit(2);
  };
  let Some(entry) = args.next() else {
    eprintln!("usage: basic <module-dir> <entry-module-name> [main-module-name]");
    process::exit(2);
  };
  let main_module = args.next();

  let inputs = read_module_dir(&dir);
  let options = BundleOptions {
    entry_points: vec![ModuleIdentifier::regular(entry)],
    main_module,
    ..BundleOptions::default()
  };

  match bundle(inputs, &options) {
    Ok(output) => println!("{output}"),
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}

fn read_module_dir(dir: &str) -> Vec<(ModuleIdentifier, String)> {
  let mut inputs = Vec::new();
  let entries = fs::read_dir(dir).unwrap_or_else(|err| panic!("cannot read {dir}: {err}"));
  for entry in entries {
    let path: PathBuf = entry.unwrap_or_else(|err| panic!("cannot read entry in {dir}: {err}")).path();
    if path.extension().and_then(|ext| ext.to_str()) != Some("js") {
      continue;
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let source = fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
    let id = if let Some(name) = stem.strip_suffix(".foreign") {
      ModuleIdentifier::foreign(name)
    } else {
      ModuleIdentifier::regular(stem)
    };
    inputs.push((id, source));
  }
  inputs
}
