use super::*;
use crate::ast::ScopeType;
use std::path::Path;

fn class_node(name: &str) -> ASTNode {
    ASTNode {
        name: name.to_string(),
        node_type: ScopeType::Class,
        parent_type: None,
        package: String::new(),
        path: String::new(),
        start_line: 1,
        end_line: 1,
        complexity: 1,
        children: Vec::new(),
        decl: Vec::new(),
    }
}

fn function_node(name: &str) -> ASTNode {
    ASTNode { node_type: ScopeType::Function, ..class_node(name) }
}

#[test]
fn test_starts_at_root_with_depth_one() {
    let repo = Repository::new();
    assert_eq!(repo.depth(), 1);
    assert!(repo.is_at_root());
}

#[test]
fn test_push_then_pop_returns_to_root() {
    let mut repo = Repository::new();
    repo.set_current_file(Path::new("A.h"));
    repo.push_scope(class_node("A"), None);
    assert_eq!(repo.depth(), 2);
    repo.pop_scope(10).unwrap();
    assert!(repo.is_at_root());
    let root = repo.into_root();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "A");
    assert_eq!(root.children[0].end_line, 10);
}

#[test]
fn test_default_access_class_is_private_struct_is_public() {
    let mut repo = Repository::new();
    repo.push_scope(class_node("A"), None);
    assert_eq!(repo.current_access(), Access::Private);
    repo.pop_scope(1).unwrap();

    let mut s = class_node("S");
    s.node_type = ScopeType::Struct;
    repo.push_scope(s, None);
    assert_eq!(repo.current_access(), Access::Public);
}

#[test]
fn test_unmatched_close_brace_is_error() {
    let mut repo = Repository::new();
    assert!(repo.pop_scope(5).is_err());
    assert!(repo.is_at_root());
}

#[test]
fn test_reset_to_root_discards_open_scopes() {
    let mut repo = Repository::new();
    repo.push_scope(class_node("A"), None);
    repo.push_scope(function_node("f"), None);
    assert_eq!(repo.depth(), 3);
    repo.reset_to_root();
    assert!(repo.is_at_root());
}

#[test]
fn test_relocation_attaches_under_existing_path() {
    let mut repo = Repository::new();
    // Header pass: namespace A { class B { }; }
    repo.push_scope(
        ASTNode { node_type: ScopeType::Namespace, ..class_node("A") },
        None,
    );
    repo.push_scope(class_node("B"), None);
    repo.pop_scope(5).unwrap();
    repo.pop_scope(6).unwrap();

    // Impl pass: void A::B::f(){} relocates under B.
    repo.push_scope(function_node("f"), Some(vec!["A".to_string(), "B".to_string()]));
    repo.pop_scope(20).unwrap();

    let root = repo.into_root();
    let ns_a = &root.children[0];
    let class_b = &ns_a.children[0];
    assert_eq!(class_b.children.len(), 1);
    assert_eq!(class_b.children[0].name, "f");
}

#[test]
fn test_relocation_falls_back_to_lexical_scope_when_path_missing() {
    let mut repo = Repository::new();
    // No prior header pass — A::B doesn't exist yet.
    repo.push_scope(function_node("f"), Some(vec!["A".to_string(), "B".to_string()]));
    repo.pop_scope(3).unwrap();
    let root = repo.into_root();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "f");
}
