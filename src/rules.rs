//! Component C: rule/action engine. Pattern-matches semi-expressions and
//! fires actions that mutate the repository. Spec §4.C.
//!
//! Rules are evaluated as a tagged-variant match rather than a hierarchy
//! of rule objects (spec §9: "implementations should prefer a tagged-
//! variant or table-of-function-values approach"). Patterns are checked
//! in the order spec.md's table lists them, with one override: the
//! scope-closing `}` always wins, per the explicit tie-break policy.

use std::path::Path;

use crate::ast::{Access, ASTNode, DeclType, Declaration, ScopeType};
use crate::error::Diagnostic;
use crate::language::{FileKind, Language};
use crate::repository::Repository;
use crate::semiexpr::{SemiExpression, SemiExpressionCollector};
use crate::token::{Token, Tokenizer};

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "do", "try", "catch", "else"];

/// Tokenize and parse one file, mutating `repo` in place. This is the
/// single entry point the per-file driver calls for both the header pass
/// and the implementation pass (spec §4.C "headers first, then
/// implementations").
pub fn parse_file(repo: &mut Repository, source: &str, path: &Path, language: Language, file_kind: FileKind) {
    repo.set_language(language);
    repo.set_current_file(path);

    let file_label = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let mut collector = SemiExpressionCollector::new(Tokenizer::new(source));
    while let Some(se) = collector.next() {
        apply(repo, &se, language, file_kind, &file_label);
    }

    if !repo.is_at_root() {
        repo.push_diagnostic(Diagnostic::InternalError {
            file: file_label,
            line: 0,
            message: "unterminated scope at end of file".to_string(),
        });
        repo.reset_to_root();
    }
}

fn apply(repo: &mut Repository, se: &SemiExpression, language: Language, file_kind: FileKind, file: &str) {
    // Scope-closer always wins (spec §4.C tie-break policy).
    if se.closes_scope() {
        if repo.pop_scope(se.start_line).is_err() {
            repo.push_diagnostic(Diagnostic::InternalError {
                file: file.to_string(),
                line: se.start_line,
                message: "unmatched }".to_string(),
            });
        }
        return;
    }

    if se.opens_scope() {
        let effective = strip_template_prefix(&se.tokens);

        if let Some(name) = keyword_then_id(effective, "namespace") {
            push_named(repo, ScopeType::Namespace, name, se.start_line, None);
            return;
        }
        if let Some(name) = keyword_then_id(effective, "class") {
            push_named(repo, ScopeType::Class, name, se.start_line, None);
            return;
        }
        if let Some(name) = keyword_then_id(effective, "struct") {
            push_named(repo, ScopeType::Struct, name, se.start_line, None);
            return;
        }
        if language == Language::CSharp {
            if let Some(name) = keyword_then_id(effective, "interface") {
                push_named(repo, ScopeType::Interface, name, se.start_line, None);
                return;
            }
        }
        if !starts_with_control_keyword(effective) {
            if let Some((name, path)) = function_name_and_path(effective) {
                let relocate = if language == Language::Cpp && file_kind == FileKind::Implementation && !path.is_empty() {
                    Some(path)
                } else {
                    None
                };
                push_named(repo, ScopeType::Function, name, se.start_line, relocate);
                return;
            }
        }
        if is_lambda_shape(effective) {
            push_named(repo, ScopeType::Lambda, String::new(), se.start_line, None);
            return;
        }
        if starts_with_control_keyword(effective) {
            push_named(repo, ScopeType::Control, String::new(), se.start_line, None);
            return;
        }
        // Every `{` must push something, so the matching `}` has a scope
        // to close (spec §9 "Scope closure").
        push_named(repo, ScopeType::Anonymous, String::new(), se.start_line, None);
        return;
    }

    let mut tokens = se.tokens.as_slice();
    if let Some((access, consumed)) = access_prefix(tokens) {
        repo.set_current_access(access);
        tokens = &tokens[consumed..];
        if tokens.is_empty() {
            return;
        }
    }

    let in_declaring_scope = matches!(
        repo.current_node().node_type,
        ScopeType::Class | ScopeType::Struct | ScopeType::Namespace | ScopeType::Interface
    );
    if in_declaring_scope {
        if let Some(decl_type) = classify_decl(tokens) {
            repo.record_declaration(Declaration {
                package: repo.current_package().to_string(),
                line: se.start_line,
                access: repo.current_access(),
                decl_type,
                raw: tokens.iter().map(|t| t.lexeme.clone()).collect(),
            });
        }
    }
}

fn push_named(repo: &mut Repository, node_type: ScopeType, name: String, start_line: u32, relocate: Option<Vec<String>>) {
    let node = ASTNode {
        name,
        node_type,
        parent_type: None, // filled in by Repository::push_scope
        package: String::new(),
        path: String::new(),
        start_line,
        end_line: start_line,
        complexity: 1,
        children: Vec::new(),
        decl: Vec::new(),
    };
    repo.push_scope(node, relocate);
}

/// `template<...>` is consumed but not matched against; the keyword/shape
/// rules run on the tokens after the balanced `<...>` (spec §4.C).
fn strip_template_prefix(tokens: &[Token]) -> &[Token] {
    if tokens.first().map(|t| t.lexeme.as_str()) != Some("template") {
        return tokens;
    }
    if tokens.get(1).map(|t| t.lexeme.as_str()) != Some("<") {
        return tokens;
    }
    let mut depth = 0i32;
    for (i, tok) in tokens.iter().enumerate().skip(1) {
        match tok.lexeme.as_str() {
            "<" => depth += 1,
            ">" => depth -= 1,
            ">>" => depth -= 2,
            _ => {}
        }
        if depth <= 0 {
            return &tokens[i + 1..];
        }
    }
    tokens
}

fn keyword_then_id(tokens: &[Token], keyword: &str) -> Option<String> {
    let idx = tokens.iter().position(|t| t.lexeme == keyword)?;
    tokens.get(idx + 1).filter(|t| t.is_identifier_like()).map(|t| t.lexeme.clone())
}

fn starts_with_control_keyword(tokens: &[Token]) -> bool {
    tokens.first().is_some_and(|t| CONTROL_KEYWORDS.contains(&t.lexeme.as_str()))
}

/// C++ lambda shape: `[` capture-list `]` params `(` `)` ... `{` somewhere
/// in the semi-expression (spec §4.C) — not necessarily at position 0,
/// since a lambda is most often the initializer of a local variable
/// (`auto g = [](int y) { ... };`) rather than a bare statement.
fn is_lambda_shape(tokens: &[Token]) -> bool {
    let Some(open_bracket) = tokens.iter().position(|t| t.lexeme == "[") else {
        return false;
    };
    let Some(close_bracket) = tokens.iter().skip(open_bracket + 1).position(|t| t.lexeme == "]") else {
        return false;
    };
    let close_bracket = close_bracket + open_bracket + 1;
    let Some(open_paren) = tokens.iter().skip(close_bracket + 1).position(|t| t.lexeme == "(") else {
        return false;
    };
    let open_paren = open_paren + close_bracket + 1;
    tokens.iter().skip(open_paren + 1).any(|t| t.lexeme == ")")
}

/// Finds `ident (` ... `)` before the closing brace and returns the
/// function name plus any `A::B::` qualifier path walked off its left.
/// Requires an identifier immediately before the first `(` — this is what
/// keeps a lambda (`](...)`) from being misread as a function (spec
/// §4.C), since its token before `(` is `]`, not an identifier.
fn function_name_and_path(tokens: &[Token]) -> Option<(String, Vec<String>)> {
    let open_idx = tokens.iter().position(|t| t.lexeme == "(")?;
    if open_idx == 0 {
        return None;
    }
    let close_idx = tokens.iter().skip(open_idx).position(|t| t.lexeme == ")")? + open_idx;
    if close_idx <= open_idx {
        return None;
    }
    let name_idx = open_idx - 1;
    if !tokens[name_idx].is_identifier_like() {
        return None;
    }
    let name = tokens[name_idx].lexeme.clone();

    let mut path = Vec::new();
    let mut i = name_idx;
    while i >= 2 && tokens[i - 1].lexeme == "::" && tokens[i - 2].is_identifier_like() {
        path.insert(0, tokens[i - 2].lexeme.clone());
        i -= 2;
    }
    Some((name, path))
}

/// Detects a leading `public:`/`private:`/`protected:` label at the front
/// of a semi-expression, returning the access it sets and how many
/// tokens it consumes. The collector never splits on `:` (spec §4.B), so
/// a label followed by a real member arrives as one unit — e.g.
/// `public:\n    int x;` tokenizes to `[public, :, int, x, ;]` — rather
/// than the label standing alone (spec §4.C row "contains
/// public:/private:/protected:", not "equals").
fn access_prefix(tokens: &[Token]) -> Option<(Access, usize)> {
    if tokens.len() < 2 || tokens[1].lexeme != ":" {
        return None;
    }
    let access = match tokens[0].lexeme.as_str() {
        "public" => Access::Public,
        "private" => Access::Private,
        "protected" => Access::Protected,
        _ => return None,
    };
    Some((access, 2))
}

/// Heuristic data-declaration shape for a semi-expression inside a
/// class/struct/namespace that doesn't open or close a scope (spec
/// §4.C rule 10).
fn classify_decl(tokens: &[Token]) -> Option<DeclType> {
    if tokens.len() < 2 || tokens.last()?.lexeme != ";" {
        return None;
    }
    if matches!(tokens[0].lexeme.as_str(), "typedef" | "using" | "enum") {
        return Some(DeclType::Other);
    }
    let has_parens = tokens.iter().any(|t| t.lexeme == "(") && tokens.iter().any(|t| t.lexeme == ")");
    if has_parens {
        return Some(DeclType::FunctionDecl);
    }
    let has_lambda_init = tokens.iter().any(|t| t.lexeme == "[") && tokens.iter().any(|t| t.lexeme == "=");
    if has_lambda_init {
        return Some(DeclType::LambdaDecl);
    }
    let last_idx = tokens.len() - 1;
    let name_idx = match tokens.iter().position(|t| t.lexeme == "=") {
        Some(eq_idx) if eq_idx > 0 => eq_idx - 1,
        Some(_) => return None,
        None => last_idx.saturating_sub(1),
    };
    if tokens.get(name_idx).is_some_and(|t| t.is_identifier_like()) {
        Some(DeclType::DataDecl)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
