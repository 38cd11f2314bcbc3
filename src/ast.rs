//! Component E: AST node model. Tree nodes are named program scopes
//! annotated with source ranges, complexity, and declarations. Spec §3, §4.E.

use serde::{Deserialize, Serialize};

/// Visibility of a declaration. Default is `Private` inside a `class` body
/// and `Public` inside a `struct` or `namespace` body (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// Shape of a declaration found inside a scope body (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclType {
    DataDecl,
    FunctionDecl,
    LambdaDecl,
    Other,
}

/// A single declaration attached to its enclosing `ASTNode` (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub package: String,
    pub line: u32,
    pub access: Access,
    pub decl_type: DeclType,
    pub raw: Vec<String>,
}

/// The kind of lexical scope an `ASTNode` represents (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeType {
    Namespace,
    Class,
    Struct,
    Interface,
    Function,
    Lambda,
    Control,
    Anonymous,
}

impl ScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeType::Namespace => "namespace",
            ScopeType::Class => "class",
            ScopeType::Struct => "struct",
            ScopeType::Interface => "interface",
            ScopeType::Function => "function",
            ScopeType::Lambda => "lambda",
            ScopeType::Control => "control",
            ScopeType::Anonymous => "anonymous",
        }
    }

    /// Whether this scope kind counts as a user-defined type for the type
    /// table (spec §4.G: class/struct/interface).
    pub fn is_user_type(&self) -> bool {
        matches!(self, ScopeType::Class | ScopeType::Struct | ScopeType::Interface)
    }

    /// Whether this scope kind is collected by the metrics walker (spec
    /// §4.F: "namespace, function, class, interface, struct, lambda").
    pub fn is_metrics_unit(&self) -> bool {
        matches!(
            self,
            ScopeType::Namespace
                | ScopeType::Function
                | ScopeType::Class
                | ScopeType::Interface
                | ScopeType::Struct
                | ScopeType::Lambda
        )
    }
}

impl std::fmt::Display for ScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named program scope: namespace, class, struct, function, lambda, or
/// control block. The root node represents the whole corpus and is named
/// `"Global Namespace"` (spec §3). Children are owned directly — the tree
/// never back-references its parent (spec §4.E, §9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTNode {
    pub name: String,
    pub node_type: ScopeType,
    pub parent_type: Option<ScopeType>,
    pub package: String,
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub complexity: u32,
    pub children: Vec<ASTNode>,
    pub decl: Vec<Declaration>,
}

pub const GLOBAL_NAMESPACE: &str = "Global Namespace";

impl ASTNode {
    pub fn root() -> ASTNode {
        ASTNode {
            name: GLOBAL_NAMESPACE.to_string(),
            node_type: ScopeType::Namespace,
            parent_type: None,
            package: String::new(),
            path: String::new(),
            start_line: 1,
            end_line: u32::MAX,
            complexity: 1,
            children: Vec::new(),
            decl: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.name == GLOBAL_NAMESPACE && self.parent_type.is_none()
    }

    /// One-line summary used by the tree walker and AST dump: `(type,
    /// name, lines [start-end], complexity)` (spec §4.E).
    pub fn show(&self) -> String {
        format!(
            "({}, {}, [{}-{}], {})",
            self.node_type, self.name, self.start_line, self.end_line, self.complexity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_global_namespace() {
        let root = ASTNode::root();
        assert_eq!(root.name, GLOBAL_NAMESPACE);
        assert!(root.is_root());
        assert!(root.parent_type.is_none());
    }

    #[test]
    fn test_show_format() {
        let node = ASTNode {
            name: "f".to_string(),
            node_type: ScopeType::Function,
            parent_type: Some(ScopeType::Class),
            package: "A.cpp".to_string(),
            path: ".".to_string(),
            start_line: 5,
            end_line: 10,
            complexity: 3,
            children: Vec::new(),
            decl: Vec::new(),
        };
        assert_eq!(node.show(), "(function, f, [5-10], 3)");
    }

    #[test]
    fn test_scope_type_is_user_type() {
        assert!(ScopeType::Class.is_user_type());
        assert!(ScopeType::Struct.is_user_type());
        assert!(ScopeType::Interface.is_user_type());
        assert!(!ScopeType::Function.is_user_type());
        assert!(!ScopeType::Namespace.is_user_type());
    }

    #[test]
    fn test_scope_type_is_metrics_unit() {
        assert!(ScopeType::Lambda.is_metrics_unit());
        assert!(!ScopeType::Control.is_metrics_unit());
        assert!(!ScopeType::Anonymous.is_metrics_unit());
    }

    #[test]
    fn test_scope_type_display() {
        assert_eq!(ScopeType::Namespace.to_string(), "namespace");
        assert_eq!(ScopeType::Interface.to_string(), "interface");
    }
}
