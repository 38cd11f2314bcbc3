use super::*;
use crate::ast::{Declaration, ScopeType};

fn node(name: &str, node_type: ScopeType, package: &str, children: Vec<ASTNode>) -> ASTNode {
    ASTNode {
        name: name.to_string(),
        node_type,
        parent_type: None,
        package: package.to_string(),
        path: String::new(),
        start_line: 1,
        end_line: 2,
        complexity: 0,
        children,
        decl: Vec::<Declaration>::new(),
    }
}

#[test]
fn test_leaf_function_complexity_is_one() {
    let mut f = node("f", ScopeType::Function, "A.cpp", vec![]);
    compute_complexity(&mut f);
    assert_eq!(f.complexity, 1);
}

#[test]
fn test_nested_control_and_lambda_accumulate() {
    let lambda = node("", ScopeType::Lambda, "A.cpp", vec![]);
    let control = node("", ScopeType::Control, "A.cpp", vec![lambda]);
    let mut f = node("f", ScopeType::Function, "A.cpp", vec![control]);
    compute_complexity(&mut f);
    assert_eq!(f.children[0].children[0].complexity, 1); // lambda
    assert_eq!(f.children[0].complexity, 2); // control: 1 + lambda
    assert_eq!(f.complexity, 3); // function: 1 + control
}

#[test]
fn test_collect_rows_excludes_control_anonymous_and_root() {
    let lambda = node("l", ScopeType::Lambda, "A.cpp", vec![]);
    let control = node("", ScopeType::Control, "A.cpp", vec![lambda]);
    let anon = node("", ScopeType::Anonymous, "A.cpp", vec![]);
    let f = node("f", ScopeType::Function, "A.cpp", vec![control, anon]);
    let mut root = ASTNode::root();
    root.children.push(f);

    let rows = collect_rows(&root);
    let names: Vec<&str> = rows.iter().map(|r| r.node.name.as_str()).collect();
    assert_eq!(names, vec!["f", "l"]);
}

#[test]
fn test_sort_by_stem_ascending_then_extension_descending() {
    let a = node("a", ScopeType::Function, "A.cpp", vec![]);
    let b = node("b", ScopeType::Class, "B.h", vec![]);
    let c = node("c", ScopeType::Class, "C.hpp", vec![]);
    let d = node("d", ScopeType::Function, "D.h", vec![]);
    let mut root = ASTNode::root();
    root.children.extend([a, b, c, d]);

    let rows = collect_rows(&root);
    let packages: Vec<&str> = rows.iter().map(|r| r.package).collect();
    assert_eq!(packages, vec!["A.cpp", "B.h", "C.hpp", "D.h"]);
}

#[test]
fn test_repeated_stem_keeps_header_and_impl_rows_adjacent() {
    let decl = node("A", ScopeType::Class, "A.h", vec![]);
    let def = node("f", ScopeType::Function, "A.cpp", vec![]);
    let other = node("b", ScopeType::Function, "B.cpp", vec![]);
    let mut root = ASTNode::root();
    root.children.extend([other, def, decl]);

    let rows = collect_rows(&root);
    let packages: Vec<&str> = rows.iter().map(|r| r.package).collect();
    assert_eq!(packages, vec!["A.h", "A.cpp", "B.cpp"]);
}

#[test]
fn test_root_itself_is_never_a_row() {
    let root = ASTNode::root();
    assert!(collect_rows(&root).is_empty());
}
