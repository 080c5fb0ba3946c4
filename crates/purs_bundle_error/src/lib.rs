//! The bundler's error taxonomy (spec.md §7). Errors are never recovered:
//! the first one aborts the pipeline and is handed back to the caller as-is.

use std::fmt;

use ansi_term::Colour;
use purs_bundle_common::ModuleIdentifier;

#[derive(Debug)]
pub enum ErrorKind {
  /// A `require` path neither matches `./foreign` nor a known module. Only
  /// raised by callers that opt into strict resolution; the bundler core
  /// itself falls back to `RequireResolution::Unresolved`.
  UnsupportedModulePath(String),
  /// The AST root passed to the classifier is not a program.
  InvalidTopLevel,
  /// Wraps the parser's diagnostic, opaque by design (spec.md §9).
  UnableToParseModule(String),
  /// An `exports`-shape was recognised but its right-hand side is not an
  /// identifier or `$foreign.X`.
  UnsupportedExport,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorKind::UnsupportedModulePath(path) => {
        write!(f, "require path `{path}` is neither `./foreign` nor a known module")
      }
      ErrorKind::InvalidTopLevel => write!(f, "module's AST root is not a program"),
      ErrorKind::UnableToParseModule(msg) => write!(f, "failed to parse module: {msg}"),
      ErrorKind::UnsupportedExport => {
        write!(f, "export value must be an identifier or `$foreign.X`")
      }
    }
  }
}

/// Every error produced inside a specific module is wrapped once with that
/// module's identity before surfacing (spec.md §7, `ErrorInModule`).
#[derive(Debug)]
pub struct Error {
  kind: ErrorKind,
  module: Option<ModuleIdentifier>,
  context: Vec<String>,
}

impl Error {
  pub fn new(kind: ErrorKind) -> Self {
    Self { kind, module: None, context: Vec::new() }
  }

  pub fn unsupported_module_path(path: impl Into<String>) -> Self {
    Self::new(ErrorKind::UnsupportedModulePath(path.into()))
  }

  pub fn invalid_top_level() -> Self {
    Self::new(ErrorKind::InvalidTopLevel)
  }

  pub fn unable_to_parse_module(msg: impl Into<String>) -> Self {
    Self::new(ErrorKind::UnableToParseModule(msg.into()))
  }

  pub fn unsupported_export() -> Self {
    Self::new(ErrorKind::UnsupportedExport)
  }

  /// Wraps this error with the identity of the module it occurred in. A
  /// no-op if already wrapped — only the innermost module context sticks,
  /// matching "wrapped once" in spec.md §7.
  #[must_use]
  pub fn in_module(mut self, id: ModuleIdentifier) -> Self {
    if self.module.is_none() {
      self.module = Some(id);
    }
    self
  }

  #[must_use]
  pub fn context(mut self, msg: impl Into<String>) -> Self {
    self.context.push(msg.into());
    self
  }

  pub fn kind(&self) -> &ErrorKind {
    &self.kind
  }

  pub fn module(&self) -> Option<&ModuleIdentifier> {
    self.module.as_ref()
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", Colour::Red.paint("error"))?;
    if let Some(module) = &self.module {
      write!(f, " in module `{module}`")?;
    }
    write!(f, ": {}", self.kind)?;
    for line in self.context.iter().rev() {
      write!(f, "\n  caused by: {line}")?;
    }
    Ok(())
  }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Picks the first error in input order out of a batch of fallible,
/// independently (possibly parallel) computed results, so output stays
/// deterministic under rayon's unordered completion (spec.md §5).
pub fn first_error<T>(results: Vec<std::result::Result<T, Error>>) -> Result<Vec<T>> {
  let mut out = Vec::with_capacity(results.len());
  for r in results {
    out.push(r?);
  }
  Ok(out)
}
