//! The only place that turns source text into a `Program` and a `Program`
//! back into text. Everything downstream operates on the AST; parsing and
//! printing are kept behind this one seam (spec.md §4.1, §4.7).

use once_cell::sync::Lazy;
use purs_bundle_error::{Error, Result};
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::{Program, Script};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as CodegenConfig, Emitter, Node};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsConfig, Parser, StringInput, Syntax};

/// Process-wide source map. Shared by every parse and every emit so spans
/// from different modules never collide.
pub static COMPILER: Lazy<Compiler> = Lazy::new(Compiler::default);

pub struct Compiler {
  pub cm: Lrc<SourceMap>,
}

impl Default for Compiler {
  fn default() -> Self {
    Self { cm: Lrc::new(SourceMap::default()) }
  }
}

impl Compiler {
  /// Parses `source` as a restricted-CommonJS script (spec.md §4.1).
  /// `name` only feeds span bookkeeping and parse error messages.
  pub fn parse_script(&self, name: &str, source: String) -> Result<Script> {
    let fm = self.cm.new_source_file(FileName::Custom(name.to_string()), source);
    let syntax = Syntax::Es(EsConfig::default());
    let lexer = Lexer::new(syntax, Default::default(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    parser.parse_script().map_err(|err| Error::unable_to_parse_module(format!("{err:?}")))
  }

  /// Renders a `Program` back to source text: the synthetic wrapper
  /// statements the emitter builds, or a module's original `raw` statements
  /// printed untouched (spec.md §4.7).
  pub fn print(&self, program: &Program) -> String {
    let mut buf = Vec::new();
    {
      let writer = JsWriter::new(self.cm.clone(), "\n", &mut buf, None);
      let mut emitter = Emitter {
        cfg: CodegenConfig { minify: false, ..Default::default() },
        comments: None,
        cm: self.cm.clone(),
        wr: writer,
      };
      program.emit_with(&mut emitter).expect("in-memory codegen never fails");
    }
    String::from_utf8(buf).expect("codegen always emits valid utf8")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use swc_core::ecma::ast::Stmt;

  #[test]
  fn parses_require_and_exports_assignment() {
    let source = r#"
      var Prelude = require("../Prelude");
      exports.identity = function (x) { return x; };
    "#
    .to_string();
    let script = COMPILER.parse_script("Test.Module", source).unwrap();
    assert_eq!(script.body.len(), 2);
    assert!(matches!(script.body[0], Stmt::Decl(_)));
  }

  #[test]
  fn parse_error_is_wrapped_opaquely() {
    let err = COMPILER.parse_script("Broken.Module", "var = ;".to_string()).unwrap_err();
    assert!(matches!(err.kind(), purs_bundle_error::ErrorKind::UnableToParseModule(_)));
  }

  #[test]
  fn roundtrips_through_print() {
    let source = "var x = 1;".to_string();
    let script = COMPILER.parse_script("A", source).unwrap();
    let printed = COMPILER.print(&Program::Script(script));
    assert!(printed.contains("var x = 1"));
  }
}
