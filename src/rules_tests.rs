use super::*;
use crate::ast::ScopeType;
use std::path::Path;

fn run(src: &str, language: Language, file_kind: FileKind) -> ASTNode {
    let mut repo = Repository::new();
    parse_file(&mut repo, src, Path::new("A.cpp"), language, file_kind);
    assert!(repo.is_at_root());
    repo.into_root()
}

#[test]
fn test_class_with_members_and_access() {
    let root = run(
        "class A {\npublic:\n    int x;\nprivate:\n    int y;\n};",
        Language::Cpp,
        FileKind::Header,
    );
    let class = &root.children[0];
    assert_eq!(class.node_type, ScopeType::Class);
    assert_eq!(class.name, "A");
    assert_eq!(class.decl.len(), 2);
    assert_eq!(class.decl[0].access, Access::Public);
    assert_eq!(class.decl[1].access, Access::Private);
    assert!(class.decl.iter().all(|d| d.decl_type == DeclType::DataDecl));
}

#[test]
fn test_struct_defaults_to_public_access() {
    let root = run("struct S {\n    int x;\n};", Language::Cpp, FileKind::Header);
    let s = &root.children[0];
    assert_eq!(s.node_type, ScopeType::Struct);
    assert_eq!(s.decl[0].access, Access::Public);
}

#[test]
fn test_namespace_wraps_class() {
    let root = run("namespace N {\nclass A {\n};\n}", Language::Cpp, FileKind::Header);
    let ns = &root.children[0];
    assert_eq!(ns.node_type, ScopeType::Namespace);
    assert_eq!(ns.name, "N");
    assert_eq!(ns.children[0].node_type, ScopeType::Class);
    assert_eq!(ns.children[0].name, "A");
}

#[test]
fn test_function_with_control_and_lambda_children() {
    let root = run(
        "void f() {\n    if (x) {\n        auto g = [](int y) { return y; };\n    }\n}",
        Language::Cpp,
        FileKind::Implementation,
    );
    let f = &root.children[0];
    assert_eq!(f.node_type, ScopeType::Function);
    assert_eq!(f.name, "f");
    let ctrl = &f.children[0];
    assert_eq!(ctrl.node_type, ScopeType::Control);
    let lambda = &ctrl.children[0];
    assert_eq!(lambda.node_type, ScopeType::Lambda);
}

#[test]
fn test_out_of_line_member_relocates_under_header_class() {
    let mut repo = Repository::new();
    parse_file(&mut repo, "class A {\n    void f();\n};", Path::new("A.h"), Language::Cpp, FileKind::Header);
    parse_file(&mut repo, "void A::f() {\n}", Path::new("A.cpp"), Language::Cpp, FileKind::Implementation);
    assert!(repo.is_at_root());
    let root = repo.into_root();
    let class = &root.children[0];
    assert_eq!(class.node_type, ScopeType::Class);
    // One FunctionDecl prototype recorded in the header, and the relocated
    // out-of-line definition attached as a child.
    assert_eq!(class.decl.len(), 1);
    assert_eq!(class.decl[0].decl_type, DeclType::FunctionDecl);
    assert_eq!(class.children.len(), 1);
    assert_eq!(class.children[0].name, "f");
    assert_eq!(class.children[0].node_type, ScopeType::Function);
}

#[test]
fn test_out_of_line_member_without_header_falls_back_to_lexical() {
    let mut repo = Repository::new();
    parse_file(&mut repo, "void A::f() {\n}", Path::new("A.cpp"), Language::Cpp, FileKind::Implementation);
    let root = repo.into_root();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "f");
}

#[test]
fn test_csharp_interface_and_no_relocation() {
    let root = run(
        "interface I {\n    void F::Bar() {\n    }\n}",
        Language::CSharp,
        FileKind::Implementation,
    );
    let iface = &root.children[0];
    assert_eq!(iface.node_type, ScopeType::Interface);
    // C# never relocates qualified names, so this attaches lexically under I.
    assert_eq!(iface.children[0].name, "Bar");
}

#[test]
fn test_anonymous_scope_catch_all() {
    let root = run("{\n    int x;\n}", Language::Cpp, FileKind::Implementation);
    assert_eq!(root.children[0].node_type, ScopeType::Anonymous);
}

#[test]
fn test_unmatched_close_brace_recorded_as_internal_error() {
    let mut repo = Repository::new();
    parse_file(&mut repo, "}", Path::new("A.cpp"), Language::Cpp, FileKind::Implementation);
    assert!(repo.is_at_root());
    assert_eq!(repo.diagnostics().len(), 1);
    assert!(matches!(repo.diagnostics()[0], Diagnostic::InternalError { .. }));
}

#[test]
fn test_unterminated_scope_resets_to_root_and_warns() {
    let mut repo = Repository::new();
    parse_file(&mut repo, "class A {\n    void f() {\n", Path::new("A.cpp"), Language::Cpp, FileKind::Implementation);
    assert!(repo.is_at_root());
    assert_eq!(repo.diagnostics().len(), 1);
    assert!(matches!(repo.diagnostics()[0], Diagnostic::InternalError { .. }));
}

#[test]
fn test_strip_template_prefix_avoids_false_class_match() {
    // "template<class T>" must not trip the `class` rule on its own.
    let tokens: Vec<Token> = Tokenizer::new("template<class T> struct Box {").collect();
    let effective = strip_template_prefix(&tokens);
    assert_eq!(effective[0].lexeme, "struct");
}

#[test]
fn test_template_function_still_detected() {
    let root = run("template<typename T>\nT f(T x) {\n}", Language::Cpp, FileKind::Implementation);
    assert_eq!(root.children[0].node_type, ScopeType::Function);
    assert_eq!(root.children[0].name, "f");
}

#[test]
fn test_function_decl_vs_data_decl_classification() {
    let root = run("class A {\n    void proto();\n    int count;\n};", Language::Cpp, FileKind::Header);
    let class = &root.children[0];
    assert_eq!(class.decl[0].decl_type, DeclType::FunctionDecl);
    assert_eq!(class.decl[1].decl_type, DeclType::DataDecl);
}

#[test]
fn test_typedef_and_using_classified_other() {
    let root = run("namespace N {\n    typedef int Int32;\n    using Real = double;\n}", Language::Cpp, FileKind::Header);
    let ns = &root.children[0];
    assert!(ns.decl.iter().all(|d| d.decl_type == DeclType::Other));
}

#[test]
fn test_function_name_and_path_extracts_qualifiers() {
    let tokens: Vec<Token> = Tokenizer::new("void A::B::f ( ) {").collect();
    let (name, path) = function_name_and_path(&tokens).unwrap();
    assert_eq!(name, "f");
    assert_eq!(path, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_lambda_not_misread_as_function() {
    let tokens: Vec<Token> = Tokenizer::new("[] ( int x ) {").collect();
    assert!(function_name_and_path(&tokens).is_none());
    assert!(is_lambda_shape(&tokens));
}
