// Go parser using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::{Decl, FuncDecl, GenDecl, GenDeclKind, Package, Receiver, Spec};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

/// Parser for Go source files
pub struct GoParser {
    parser: Parser,
    verbose: bool,
}

/// A single parsed Go source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Package name from the package clause
    pub package: String,
    /// Package doc comment, if this file carries one
    pub doc: Option<String>,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_go::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Go language: {}", e)))?;

        Ok(Self {
            parser,
            verbose: false,
        })
    }

    /// Create parser with verbose progress reporting
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Parse every non-test Go file directly inside `dir` and group the
    /// declarations by package clause. Package names map to packages in
    /// lexicographic order; declaration order within a package follows
    /// lexicographic file order, then source order.
    pub fn parse_dir(&mut self, dir: &Path, exclude: &[Pattern]) -> Result<BTreeMap<String, Package>> {
        let files = discover_files(dir, exclude)?;

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut pkgs: BTreeMap<String, Package> = BTreeMap::new();

        for path in &files {
            if let Some(ref pb) = progress {
                let msg = path.file_name().unwrap_or_default().to_string_lossy().to_string();
                pb.set_message(msg);
                pb.inc(1);
            }

            let unit = self.parse_file(path)?;
            let pkg = pkgs
                .entry(unit.package.clone())
                .or_insert_with(|| Package::new(&unit.package));
            if pkg.doc.is_none() {
                pkg.doc = unit.doc;
            }
            pkg.decls.extend(unit.decls);
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Parsing complete");
        }

        Ok(pkgs)
    }

    /// Parse a Go file
    pub fn parse_file(&mut self, path: &Path) -> Result<SourceFile> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;

        self.parse_source(&source, path)
    }

    /// Parse Go source code. A file that fails to parse or has no package
    /// clause is fatal for the run.
    pub fn parse_source(&mut self, source: &str, path: &Path) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse Go source"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parse(path, "syntax error"));
        }

        let mut package = None;
        let mut doc = None;
        let mut decls = Vec::new();

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "package_clause" => {
                    // In tree-sitter-go, the package name is a child node,
                    // not a field
                    let mut pkg_cursor = child.walk();
                    for pkg_child in child.children(&mut pkg_cursor) {
                        if pkg_child.kind() == "package_identifier" {
                            if let Ok(name) = pkg_child.utf8_text(source.as_bytes()) {
                                package = Some(name.to_string());
                                break;
                            }
                        }
                    }
                    doc = collect_doc(&child, source);
                }
                "function_declaration" => {
                    if let Some(func) = parse_function(&child, source) {
                        decls.push(Decl::Func(func));
                    }
                }
                "method_declaration" => {
                    if let Some(func) = parse_method(&child, source) {
                        decls.push(Decl::Func(func));
                    }
                }
                "type_declaration" => {
                    decls.push(Decl::Generic(parse_type_decl(&child, source)));
                }
                "const_declaration" => {
                    decls.push(Decl::Generic(parse_value_decl(&child, source, GenDeclKind::Const)));
                }
                "var_declaration" => {
                    decls.push(Decl::Generic(parse_value_decl(&child, source, GenDeclKind::Var)));
                }
                "import_declaration" => {
                    let mut g = GenDecl::new(GenDeclKind::Import, child.start_position().row + 1);
                    g.doc = collect_doc(&child, source);
                    decls.push(Decl::Generic(g));
                }
                _ => {}
            }
        }

        let package = package.ok_or_else(|| Error::parse(path, "missing package clause"))?;

        Ok(SourceFile {
            package,
            doc,
            decls,
        })
    }
}

/// Discover the Go files directly inside `dir`, sorted by path. Any file
/// whose name contains `_test` is excluded, as are names matching one of
/// the exclude patterns.
pub fn discover_files(dir: &Path, exclude: &[Pattern]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).max_depth(1).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if path.extension().map_or(true, |e| e != "go") {
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.contains("_test") {
            continue;
        }

        if exclude.iter().any(|p| p.matches(name)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Parse function declaration
fn parse_function(node: &Node, source: &str) -> Option<FuncDecl> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()?
        .to_string();

    let mut func = FuncDecl::new(&name, node.start_position().row + 1);
    func.doc = collect_doc(node, source);
    func.type_params = field_text(node, "type_parameters", source);
    func.params = field_text(node, "parameters", source).unwrap_or_else(|| "()".to_string());
    func.results = field_text(node, "result", source);

    Some(func)
}

/// Parse method declaration (function with receiver)
fn parse_method(node: &Node, source: &str) -> Option<FuncDecl> {
    let mut func = parse_function(node, source)?;

    let recv_node = node.child_by_field_name("receiver")?;
    let text = recv_node.utf8_text(source.as_bytes()).ok()?.to_string();
    let type_name = receiver_type_name(&recv_node, source)?;
    func.receiver = Some(Receiver { text, type_name });

    Some(func)
}

/// Extract the base type name from a receiver parameter list
fn receiver_type_name(recv: &Node, source: &str) -> Option<String> {
    let mut cursor = recv.walk();
    for child in recv.children(&mut cursor) {
        if child.kind() == "parameter_declaration" {
            if let Some(type_node) = child.child_by_field_name("type") {
                let type_text = type_node.utf8_text(source.as_bytes()).ok()?;
                return Some(receiver_base(type_text));
            }
        }
    }
    None
}

/// Strip pointer and type-argument decoration from a receiver type,
/// e.g. `*List[T]` becomes `List`
fn receiver_base(type_text: &str) -> String {
    let t = type_text.trim().trim_start_matches('*').trim();
    match t.find('[') {
        Some(i) => t[..i].to_string(),
        None => t.to_string(),
    }
}

/// Parse type_declaration into a grouped declaration with one spec per
/// type_spec/type_alias
fn parse_type_decl(node: &Node, source: &str) -> GenDecl {
    let mut decl = GenDecl::new(GenDeclKind::Type, node.start_position().row + 1);
    decl.doc = collect_doc(node, source);

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "type_spec" || child.kind() == "type_alias" {
            if let Some(name) = child
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            {
                let mut spec = Spec::new(name, child.start_position().row + 1);
                spec.doc = collect_doc(&child, source);
                decl.specs.push(spec);
            }
        }
    }

    decl
}

/// Parse const or var declarations into a grouped declaration; each spec
/// records its first declared name
fn parse_value_decl(node: &Node, source: &str, kind: GenDeclKind) -> GenDecl {
    let mut decl = GenDecl::new(kind, node.start_position().row + 1);
    decl.doc = collect_doc(node, source);

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "const_spec" || child.kind() == "var_spec" {
            if let Some(name) = child
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            {
                let mut spec = Spec::new(name, child.start_position().row + 1);
                spec.doc = collect_doc(&child, source);
                decl.specs.push(spec);
            }
        }
    }

    decl
}

/// Text of a named field, as written in source
fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        .map(|s| s.to_string())
}

/// Collect the contiguous comment lines directly above a node as its doc
/// text. A blank line between the comment and the node detaches it.
fn collect_doc(node: &Node, source: &str) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut expected_row = node.start_position().row;
    let mut cur = node.prev_sibling();

    while let Some(prev) = cur {
        if prev.kind() != "comment" || prev.end_position().row + 1 != expected_row {
            break;
        }
        let text = prev.utf8_text(source.as_bytes()).ok()?;
        lines.push(comment_text(text));
        expected_row = prev.start_position().row;
        cur = prev.prev_sibling();
    }

    if lines.is_empty() {
        return None;
    }

    lines.reverse();
    let doc = lines.join("\n");
    if doc.trim().is_empty() {
        None
    } else {
        Some(doc)
    }
}

/// Strip comment markers from a single comment node
fn comment_text(text: &str) -> String {
    text.trim_start_matches("//")
        .trim_start_matches("/*")
        .trim_end_matches("*/")
        .trim()
        .to_string()
}
