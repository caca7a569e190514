//! Syntax layer: Go source text to a traversable tree, plus the structural
//! predicates and the single-pass scan the rules consume.

pub mod go;
pub mod predicates;
pub mod scan;

pub use go::{SyntaxTree, parse};
