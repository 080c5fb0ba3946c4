//! Pattern-matching recognizers for the restricted CommonJS subset
//! (spec.md §4.1, §4.2) and small AST-construction helpers for the emitter
//! (spec.md §4.7). Each recognizer returns the extracted tuple or `None`
//! rather than building an inheritance hierarchy over statement shapes.

mod build;
mod matchers;

pub use build::*;
pub use matchers::*;
