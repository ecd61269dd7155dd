// Template engine for rendering card decks

use crate::doc::{self, PackageDoc};
use crate::error::Result;
use crate::parser::{is_exported_name, Decl};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tera::{Context, Tera, Value};

/// The built-in card template. Produces a deck in the semicolon-delimited
/// format Quizlet imports.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/default.tera");

const TEMPLATE_NAME: &str = "cards";

/// Card template wrapping Tera with the doc-pipeline filters registered
pub struct CardTemplate {
    tera: Tera,
}

impl CardTemplate {
    /// Create a template engine with the embedded default template
    pub fn new() -> Result<Self> {
        Self::from_source(DEFAULT_TEMPLATE)
    }

    /// Create a template engine from a user template file. The file fully
    /// replaces the default template; the same filters are bound.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_source(&source)
    }

    /// Compile a template from source text
    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(TEMPLATE_NAME, source)?;

        // Filters the card templates use to extract data from the doc model
        tera.register_filter("first_sentence", first_sentence);
        tera.register_filter("is_exported", is_exported);
        tera.register_filter("is_exported_name", exported_name);
        tera.register_filter("func_decl_string", func_decl_string);

        Ok(Self { tera })
    }

    /// Render a package's cards to a string
    pub fn render(&self, pkg: &PackageDoc) -> Result<String> {
        let context = Context::from_serialize(pkg)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    /// Render a package's cards, streaming directly to a writer. On error a
    /// partial prefix may already have been written.
    pub fn render_to(&self, pkg: &PackageDoc, writer: impl Write) -> Result<()> {
        let context = Context::from_serialize(pkg)?;
        self.tera.render_to(TEMPLATE_NAME, &context, writer)?;
        Ok(())
    }
}

/// Reduce a doc string to its first sentence
fn first_sentence(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value.as_str().unwrap_or("");
    Ok(Value::String(doc::first_sentence(text)))
}

/// Whether a declaration node produces cards. Values that are not
/// declaration nodes are simply not exported.
fn is_exported(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let exported = serde_json::from_value::<Decl>(value.clone())
        .map(|decl| decl.is_exported())
        .unwrap_or(false);
    Ok(Value::Bool(exported))
}

/// The exported-identifier check applied directly to a name string; used
/// for method visibility
fn exported_name(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let exported = value.as_str().map(is_exported_name).unwrap_or(false);
    Ok(Value::Bool(exported))
}

/// Serialize a function declaration node back into its signature text.
/// Fails template execution when handed anything else.
fn func_decl_string(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let decl = serde_json::from_value::<Decl>(value.clone())
        .map_err(|e| tera::Error::msg(format!("func_decl_string: not a declaration node: {}", e)))?;
    let rendered = decl.func_decl_string().map_err(|e| tera::Error::msg(e.to_string()))?;
    Ok(Value::String(rendered))
}
