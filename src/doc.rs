// Doc model: the normalized view of a package's documentation that the
// card template traverses. Built once per package, never mutated.

use crate::parser::{Decl, GenDeclKind, Package};
use serde::{Deserialize, Serialize};

/// Documentation model for one package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageDoc {
    /// Package name
    pub name: String,
    /// Package-level doc comment (empty when absent)
    pub doc: String,
    /// Top-level functions, in source order
    pub funcs: Vec<FunctionDoc>,
    /// Declared types, in source order
    pub types: Vec<TypeDoc>,
}

/// Documentation for a function or method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDoc {
    pub name: String,
    pub doc: String,
    /// The declaration node this entry came from
    pub decl: Decl,
}

/// Documentation for a type and its methods
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDoc {
    pub name: String,
    pub doc: String,
    /// The declaration node this entry came from; every spec of a grouped
    /// declaration carries the same node
    pub decl: Decl,
    /// Methods declared on this type, in source order
    pub methods: Vec<FunctionDoc>,
}

impl PackageDoc {
    /// Build the doc model from a parsed package. All declarations are
    /// included, exported or not; visibility is applied at template time.
    pub fn build(pkg: &Package) -> Self {
        let mut types: Vec<TypeDoc> = Vec::new();

        for decl in &pkg.decls {
            if let Decl::Generic(g) = decl {
                if g.kind != GenDeclKind::Type {
                    continue;
                }
                for spec in &g.specs {
                    let doc = spec.doc.clone().or_else(|| g.doc.clone()).unwrap_or_default();
                    types.push(TypeDoc {
                        name: spec.name.clone(),
                        doc,
                        decl: decl.clone(),
                        methods: Vec::new(),
                    });
                }
            }
        }

        let mut funcs = Vec::new();

        for decl in &pkg.decls {
            if let Decl::Func(f) = decl {
                let entry = FunctionDoc {
                    name: f.name.clone(),
                    doc: f.doc.clone().unwrap_or_default(),
                    decl: decl.clone(),
                };
                match &f.receiver {
                    None => funcs.push(entry),
                    Some(recv) => {
                        // Methods with no matching type in the package are
                        // dropped
                        if let Some(t) = types.iter_mut().find(|t| t.name == recv.type_name) {
                            t.methods.push(entry);
                        }
                    }
                }
            }
        }

        Self {
            name: pkg.name.clone(),
            doc: pkg.doc.clone().unwrap_or_default(),
            funcs,
            types,
        }
    }
}

/// Reduce a doc comment to its first sentence: everything up to the first
/// period, trimmed, newlines turned into spaces and tabs deleted, with a
/// trailing period appended. No real sentence-boundary detection.
pub fn first_sentence(text: &str) -> String {
    let first = text.split('.').next().unwrap_or("");
    let mut sentence = normalize(first);
    sentence.push('.');
    sentence
}

fn normalize(s: &str) -> String {
    s.trim().replace('\n', " ").replace('\t', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{FuncDecl, GenDecl, Receiver, Spec};

    fn func(name: &str, doc: Option<&str>) -> Decl {
        let mut f = FuncDecl::new(name, 1);
        f.doc = doc.map(|d| d.to_string());
        Decl::Func(f)
    }

    fn method(name: &str, recv_type: &str) -> Decl {
        let mut f = FuncDecl::new(name, 1);
        f.receiver = Some(Receiver::new(&format!("(x *{})", recv_type), recv_type));
        Decl::Func(f)
    }

    fn type_decl(names: &[&str], doc: Option<&str>) -> Decl {
        let mut g = GenDecl::new(GenDeclKind::Type, 1);
        g.doc = doc.map(|d| d.to_string());
        for name in names {
            g.specs.push(Spec::new(name, 1));
        }
        Decl::Generic(g)
    }

    #[test]
    fn test_first_sentence_basic() {
        assert_eq!(
            first_sentence("Hello world. Second sentence."),
            "Hello world."
        );
    }

    #[test]
    fn test_first_sentence_no_period() {
        assert_eq!(first_sentence("NoPeriodHere"), "NoPeriodHere.");
    }

    #[test]
    fn test_first_sentence_empty() {
        assert_eq!(first_sentence(""), ".");
    }

    #[test]
    fn test_first_sentence_newlines_and_tabs() {
        assert_eq!(
            first_sentence("Line one\nLine two. rest"),
            "Line one Line two."
        );
        assert_eq!(first_sentence("has\ta tab. rest"), "hasa tab.");
    }

    #[test]
    fn test_first_sentence_properties() {
        let inputs = [
            "",
            "plain",
            "Two. Sentences.",
            "  padded  . x",
            "multi\nline\ndoc. tail",
            "tab\there. tail",
        ];
        for input in inputs {
            let s = first_sentence(input);
            assert!(s.ends_with('.'), "{:?} -> {:?}", input, s);
            assert!(!s[..s.len() - 1].ends_with('.'), "{:?} -> {:?}", input, s);
            assert!(!s.contains('\n'), "{:?} -> {:?}", input, s);
            assert!(!s.contains('\t'), "{:?} -> {:?}", input, s);
        }
    }

    #[test]
    fn test_build_empty_package() {
        let pkg = Package::new("empty");
        let doc = PackageDoc::build(&pkg);
        assert_eq!(doc.name, "empty");
        assert_eq!(doc.doc, "");
        assert!(doc.funcs.is_empty());
        assert!(doc.types.is_empty());
    }

    #[test]
    fn test_build_preserves_order() {
        let mut pkg = Package::new("calc");
        pkg.decls.push(func("Add", Some("Add sums.")));
        pkg.decls.push(func("sub", None));
        pkg.decls.push(func("Mul", None));

        let doc = PackageDoc::build(&pkg);
        let names: Vec<&str> = doc.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Add", "sub", "Mul"]);
    }

    #[test]
    fn test_build_includes_unexported() {
        // Inclusion flags are forced on; filtering happens in the template
        let mut pkg = Package::new("calc");
        pkg.decls.push(func("sub", None));
        pkg.decls.push(type_decl(&["point"], None));

        let doc = PackageDoc::build(&pkg);
        assert_eq!(doc.funcs.len(), 1);
        assert_eq!(doc.types.len(), 1);
    }

    #[test]
    fn test_build_attributes_methods() {
        let mut pkg = Package::new("geo");
        pkg.decls.push(type_decl(&["Point"], Some("Point is a 2D point.")));
        pkg.decls.push(method("Distance", "Point"));
        pkg.decls.push(method("Scale", "Point"));

        let doc = PackageDoc::build(&pkg);
        assert!(doc.funcs.is_empty());
        assert_eq!(doc.types.len(), 1);
        let methods: Vec<&str> = doc.types[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["Distance", "Scale"]);
    }

    #[test]
    fn test_build_drops_orphan_methods() {
        let mut pkg = Package::new("geo");
        pkg.decls.push(method("Distance", "Elsewhere"));

        let doc = PackageDoc::build(&pkg);
        assert!(doc.funcs.is_empty());
        assert!(doc.types.is_empty());
    }

    #[test]
    fn test_build_method_declared_before_type() {
        let mut pkg = Package::new("geo");
        pkg.decls.push(method("Distance", "Point"));
        pkg.decls.push(type_decl(&["Point"], None));

        let doc = PackageDoc::build(&pkg);
        assert_eq!(doc.types[0].methods.len(), 1);
    }

    #[test]
    fn test_build_grouped_specs_share_decl() {
        let mut pkg = Package::new("kinds");
        pkg.decls.push(type_decl(&["small", "Big"], Some("Group doc.")));

        let doc = PackageDoc::build(&pkg);
        assert_eq!(doc.types.len(), 2);
        assert_eq!(doc.types[0].name, "small");
        assert_eq!(doc.types[1].name, "Big");
        assert_eq!(doc.types[0].decl, doc.types[1].decl);
        // Both inherit the group doc when the spec has none
        assert_eq!(doc.types[1].doc, "Group doc.");
        // Visibility still keys off the first spec of the shared node
        assert!(!doc.types[1].decl.is_exported());
    }

    #[test]
    fn test_build_spec_doc_overrides_group_doc() {
        let mut g = GenDecl::new(GenDeclKind::Type, 1);
        g.doc = Some("Group doc.".to_string());
        let mut spec = Spec::new("Point", 2);
        spec.doc = Some("Point doc.".to_string());
        g.specs.push(spec);

        let mut pkg = Package::new("geo");
        pkg.decls.push(Decl::Generic(g));

        let doc = PackageDoc::build(&pkg);
        assert_eq!(doc.types[0].doc, "Point doc.");
    }

    #[test]
    fn test_build_ignores_const_var_groups() {
        let mut g = GenDecl::new(GenDeclKind::Const, 1);
        g.specs.push(Spec::new("MaxSize", 1));

        let mut pkg = Package::new("limits");
        pkg.decls.push(Decl::Generic(g));

        let doc = PackageDoc::build(&pkg);
        assert!(doc.types.is_empty());
        assert!(doc.funcs.is_empty());
    }
}
