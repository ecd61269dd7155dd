// Parser module for extracting the declaration model from Go source

pub mod ast;
pub mod go;

pub use ast::*;
pub use go::{discover_files, GoParser, SourceFile};
