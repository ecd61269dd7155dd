// Declaration model for parsed Go code
//
// These types represent the top-level declarations extracted from Go source
// files. They are designed to be serializable so the template engine can
// traverse them directly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A parsed Go package: all top-level declarations across its files,
/// in lexicographic file order and source order within each file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    /// Package name from the package clause
    pub name: String,
    /// Package-level doc comment
    pub doc: Option<String>,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
}

impl Package {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: None,
            decls: Vec::new(),
        }
    }

    /// Check if the package has any declarations
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// A top-level declaration node. Closed set: grouped declarations,
/// function/method declarations, and a fallback for everything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "node")]
pub enum Decl {
    Generic(GenDecl),
    Func(FuncDecl),
    Other,
}

impl Decl {
    /// Whether this declaration produces cards.
    ///
    /// A grouped declaration is exported only if it is a type declaration
    /// whose FIRST spec name starts with an upper-case letter; later specs
    /// of a group are not inspected. Const/var/import groups are never
    /// exported. A function is exported iff its name is.
    pub fn is_exported(&self) -> bool {
        match self {
            Decl::Generic(g) => match g.kind {
                GenDeclKind::Type => g
                    .specs
                    .first()
                    .map(|s| is_exported_name(&s.name))
                    .unwrap_or(false),
                _ => false,
            },
            Decl::Func(f) => is_exported_name(&f.name),
            Decl::Other => false,
        }
    }

    /// Serialize a function or method declaration back into its textual
    /// signature. Errors on any other node kind.
    pub fn func_decl_string(&self) -> Result<String> {
        match self {
            Decl::Func(f) => Ok(f.decl_string()),
            _ => Err(Error::render("not a function declaration")),
        }
    }
}

/// Kind of a grouped declaration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

/// A grouped declaration: `type (...)`, `const (...)`, `var (...)`,
/// `import (...)`, or their single-spec forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenDecl {
    pub kind: GenDeclKind,
    /// One entry per spec, in source order
    pub specs: Vec<Spec>,
    /// Doc comment attached to the group
    pub doc: Option<String>,
    /// Starting line number
    pub line: usize,
}

impl GenDecl {
    pub fn new(kind: GenDeclKind, line: usize) -> Self {
        Self {
            kind,
            specs: Vec::new(),
            doc: None,
            line,
        }
    }
}

/// A single spec within a grouped declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spec {
    /// First declared name of the spec
    pub name: String,
    /// Doc comment attached to the spec itself
    pub doc: Option<String>,
    /// Line number
    pub line: usize,
}

impl Spec {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            doc: None,
            line,
        }
    }
}

/// A function or method declaration. The body is never captured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuncDecl {
    /// Function name
    pub name: String,
    /// Doc comment
    pub doc: Option<String>,
    /// Receiver clause for methods
    pub receiver: Option<Receiver>,
    /// Type parameter list as written, e.g. `[T any]`
    pub type_params: Option<String>,
    /// Parameter list as written, including parentheses
    pub params: String,
    /// Result list as written, e.g. `int` or `(n int, err error)`
    pub results: Option<String>,
    /// Starting line number
    pub line: usize,
}

impl FuncDecl {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            doc: None,
            receiver: None,
            type_params: None,
            params: "()".to_string(),
            results: None,
            line,
        }
    }

    /// Check if this is a method (has a receiver)
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// Render the declaration as source text, e.g.
    /// `func (p *Point) Distance(other Point) float64`
    pub fn decl_string(&self) -> String {
        let mut s = String::from("func ");
        if let Some(recv) = &self.receiver {
            s.push_str(&recv.text);
            s.push(' ');
        }
        s.push_str(&self.name);
        if let Some(tp) = &self.type_params {
            s.push_str(tp);
        }
        s.push_str(&self.params);
        if let Some(res) = &self.results {
            s.push(' ');
            s.push_str(res);
        }
        s
    }
}

/// A method receiver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receiver {
    /// Receiver clause as written, including parentheses, e.g. `(p *Point)`
    pub text: String,
    /// Base type name with pointer and type arguments stripped
    pub type_name: String,
}

impl Receiver {
    pub fn new(text: &str, type_name: &str) -> Self {
        Self {
            text: text.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// Check if an identifier is exported (starts with an upper-case letter)
pub fn is_exported_name(name: &str) -> bool {
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}
