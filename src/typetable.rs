//! Component G: type table builder. Walks the accumulated AST once to map
//! every user-defined type name to the file that defines it, the lookup
//! the dependency resolver needs for its second pass. Spec §4.G.

use std::collections::HashMap;

use crate::ast::ASTNode;
use crate::error::Diagnostic;

/// Type name -> defining file. Built once, read many times during
/// dependency resolution.
pub struct TypeTable {
    types: HashMap<String, String>,
}

impl TypeTable {
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Walks `root`, recording every `class`/`struct`/`interface` scope and
/// every `typedef`/`using`/`enum` declaration it finds. A name defined
/// twice (e.g. a class re-opened, or genuinely redefined across files)
/// keeps the most recently encountered definition; the collision is
/// reported as a diagnostic rather than failing the build (spec §4.G,
/// §9 "last writer wins").
pub fn build(root: &ASTNode) -> (TypeTable, Vec<Diagnostic>) {
    let mut types = HashMap::new();
    let mut diagnostics = Vec::new();
    walk(root, &mut types, &mut diagnostics);
    (TypeTable { types }, diagnostics)
}

fn walk(node: &ASTNode, types: &mut HashMap<String, String>, diagnostics: &mut Vec<Diagnostic>) {
    if node.node_type.is_user_type() && !node.name.is_empty() {
        insert(types, diagnostics, node.name.clone(), node.package.clone(), node.start_line);
    }
    for decl in &node.decl {
        if let Some(name) = introduced_type_name(&decl.raw) {
            insert(types, diagnostics, name, decl.package.clone(), decl.line);
        }
    }
    for child in &node.children {
        walk(child, types, diagnostics);
    }
}

fn insert(types: &mut HashMap<String, String>, diagnostics: &mut Vec<Diagnostic>, name: String, file: String, line: u32) {
    if let Some(existing) = types.get(&name) {
        if existing != &file {
            diagnostics.push(Diagnostic::ParseWarning {
                file,
                line,
                message: format!("type '{name}' redefined (previously in {existing})"),
            });
        }
    }
    types.insert(name, file);
}

/// Pulls the introduced name out of a `typedef`/`using`/`enum` raw token
/// sequence, if any of the three shapes is recognized.
fn introduced_type_name(raw: &[String]) -> Option<String> {
    match raw.first().map(|s| s.as_str()) {
        Some("using") => {
            let candidate = raw.get(1)?;
            if candidate == "namespace" || !is_identifier_like(candidate) {
                return None;
            }
            Some(candidate.clone())
        }
        Some("typedef") | Some("enum") => {
            let name = raw.get(raw.len().checked_sub(2)?)?;
            is_identifier_like(name).then(|| name.clone())
        }
        _ => None,
    }
}

fn is_identifier_like(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
#[path = "typetable_tests.rs"]
mod tests;
