//! gocards - Generate Quizlet flash cards from Go package documentation
//!
//! Parses a directory of Go source files, extracts the documentation of
//! exported declarations, and renders one semicolon-delimited card deck
//! per package through a customizable template.

pub mod cli;
pub mod config;
pub mod doc;
pub mod error;
pub mod output;
pub mod parser;

// Re-export main types
pub use config::Config;
pub use doc::{first_sentence, FunctionDoc, PackageDoc, TypeDoc};
pub use error::{Error, Result};
pub use output::{CardTemplate, CardWriter, DEFAULT_TEMPLATE};
pub use parser::GoParser;
