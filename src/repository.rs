//! Component D: scope stack & repository. Process-wide, single-writer
//! state mutated by the active parsing pass: current language, current
//! file, the explicit scope stack, and the shared root AST. Spec §3, §4.D.

use std::path::{Path, PathBuf};

use crate::ast::{Access, ASTNode, Declaration, ScopeType};
use crate::error::Diagnostic;
use crate::language::Language;

/// Default access for a newly opened scope (spec §3: "Default for class
/// body = private; for struct/namespace = public").
fn default_access(node_type: ScopeType) -> Access {
    match node_type {
        ScopeType::Class => Access::Private,
        _ => Access::Public,
    }
}

/// An open scope on the stack, plus the bookkeeping needed to close it:
/// the access mode currently in effect, and — for C++ out-of-line member
/// definitions — the qualified path its finished node should be relocated
/// under instead of the current lexical parent (spec §4.C).
struct Frame {
    node: ASTNode,
    access: Access,
    relocate_path: Option<Vec<String>>,
}

/// Mutable during parsing, read-only after (spec §3 "Repository").
pub struct Repository {
    language: Option<Language>,
    current_file: Option<PathBuf>,
    current_package: String,
    current_path: String,
    stack: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
}

impl Repository {
    pub fn new() -> Self {
        Repository {
            language: None,
            current_file: None,
            current_package: String::new(),
            current_path: String::new(),
            stack: vec![Frame { node: ASTNode::root(), access: Access::Public, relocate_path: None }],
            diagnostics: Vec::new(),
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn set_current_file(&mut self, path: &Path) {
        let package = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let dir = path.parent().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        self.current_file = Some(path.to_path_buf());
        self.current_package = package;
        self.current_path = dir;
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn current_package(&self) -> &str {
        &self.current_package
    }

    /// Depth of the open-scope stack. Spec §8 property 5: after parsing
    /// completes the stack contains exactly the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.stack.len() == 1
    }

    /// Push a newly opened scope. `relocate_path` is `Some` only for a C++
    /// out-of-line member function (`A::B::f`); on pop it is looked up in
    /// the accumulated root rather than attached to the current lexical
    /// parent (spec §4.C).
    pub fn push_scope(&mut self, mut node: ASTNode, relocate_path: Option<Vec<String>>) {
        let access = default_access(node.node_type);
        node.package = self.current_package.clone();
        node.path = self.current_path.clone();
        node.parent_type = Some(self.stack.last().unwrap().node.node_type);
        self.stack.push(Frame { node, access, relocate_path });
    }

    /// Close the top scope, setting its end line and attaching it to its
    /// parent — either the current lexical parent, or (for a relocated
    /// C++ member) the node resolved by qualified path, falling back to
    /// the lexical parent if that path doesn't exist yet (spec §4.C).
    /// Returns `Err` if the stack held only the root (unmatched `}`,
    /// spec §7 `InternalError`).
    pub fn pop_scope(&mut self, end_line: u32) -> Result<(), ()> {
        if self.stack.len() <= 1 {
            return Err(());
        }
        let mut frame = self.stack.pop().unwrap();
        frame.node.end_line = end_line.max(frame.node.start_line);

        let attached = if let Some(path) = &frame.relocate_path {
            let root = &mut self.stack[0].node;
            match resolve_path_mut(root, path) {
                Some(parent) => {
                    parent.children.push(frame.node);
                    true
                }
                None => false,
            }
        } else {
            false
        };

        if !attached {
            self.stack.last_mut().unwrap().node.children.push(frame.node);
        }
        Ok(())
    }

    /// Spec §7 `InternalError` recovery: reset the stack to just the
    /// root, discarding any still-open scopes from the current file, and
    /// keep going — the AST accumulated so far remains usable.
    pub fn reset_to_root(&mut self) {
        self.stack.truncate(1);
    }

    pub fn current_node_mut(&mut self) -> &mut ASTNode {
        &mut self.stack.last_mut().unwrap().node
    }

    pub fn current_node(&self) -> &ASTNode {
        &self.stack.last().unwrap().node
    }

    pub fn current_access(&self) -> Access {
        self.stack.last().unwrap().access
    }

    pub fn set_current_access(&mut self, access: Access) {
        self.stack.last_mut().unwrap().access = access;
    }

    pub fn record_declaration(&mut self, decl: Declaration) {
        self.current_node_mut().decl.push(decl);
    }

    pub fn push_diagnostic(&mut self, d: Diagnostic) {
        self.diagnostics.push(d);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the repository, returning the finished root AST. Callers
    /// should have already verified `is_at_root()`.
    pub fn into_root(mut self) -> ASTNode {
        self.stack.truncate(1);
        self.stack.pop().unwrap().node
    }

    pub fn root(&self) -> &ASTNode {
        &self.stack[0].node
    }
}

impl Default for Repository {
    fn default() -> Self {
        Repository::new()
    }
}

/// Find the node named `path[0]` anywhere in the tree, then descend
/// through direct children named `path[1]`, `path[2]`, ... "Path-matched
/// left-to-right" per spec §4.C.
fn resolve_path_mut<'a>(root: &'a mut ASTNode, path: &[String]) -> Option<&'a mut ASTNode> {
    let (head, rest) = path.split_first()?;
    let mut current = find_named_anywhere(root, head)?;
    for component in rest {
        current = current.children.iter_mut().find(|c| &c.name == component)?;
    }
    Some(current)
}

fn find_named_anywhere<'a>(node: &'a mut ASTNode, name: &str) -> Option<&'a mut ASTNode> {
    if node.name == name {
        return Some(node);
    }
    for child in node.children.iter_mut() {
        if let Some(found) = find_named_anywhere(child, name) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
