//! Component F: metrics walker. Computes per-scope complexity in a single
//! post-order pass over the accumulated AST, then flattens the tree into
//! the rows the display layer prints. Spec §4.F.

use std::path::Path;

use crate::ast::ASTNode;

/// One row of the metrics table: the owning file and the scope it names.
pub struct MetricsRow<'a> {
    pub package: &'a str,
    pub node: &'a ASTNode,
}

/// Recomputes `complexity` for every node, post-order: `1 + sum(children
/// complexity)` (spec §4.F). Every scope counts toward its parent's total,
/// including `control` and `anonymous` scopes that aren't themselves
/// listed as metrics rows — an `if` still costs one point of complexity
/// even though it isn't a named unit.
pub fn compute_complexity(node: &mut ASTNode) {
    let mut total = 1u32;
    for child in node.children.iter_mut() {
        compute_complexity(child);
        total += child.complexity;
    }
    node.complexity = total;
}

/// Flattens the tree into the rows the metrics table displays: every
/// `namespace`, `function`, `class`, `interface`, `struct`, or `lambda`
/// scope. Spec §4.F sorts stably by extension descending and then stably
/// by stem ascending; two sequential stable sorts make the *last* key
/// primary, so the compositional effect — and the tuple compared here —
/// is stem ascending first, extension descending second: each file's own
/// rows land next to each other (`A.h`, `A.cpp`, `B.h`, `B.cpp`, ...),
/// which is what lets the table's header repeat only on a real file
/// change (spec §6).
pub fn collect_rows(root: &ASTNode) -> Vec<MetricsRow<'_>> {
    let mut rows = Vec::new();
    walk(root, &mut rows);
    rows.sort_by(|a, b| sort_key(a.package).cmp(&sort_key(b.package)));
    rows
}

fn walk<'a>(node: &'a ASTNode, rows: &mut Vec<MetricsRow<'a>>) {
    if !node.is_root() && node.node_type.is_metrics_unit() {
        rows.push(MetricsRow { package: &node.package, node });
    }
    for child in &node.children {
        walk(child, rows);
    }
}

/// `(stem ascending, extension descending)` — stem is the primary key
/// (groups a file's header and implementation rows together), extension
/// the secondary tie-break (`Reverse` puts `.h` before `.cpp`).
fn sort_key(package: &str) -> (String, std::cmp::Reverse<String>) {
    let path = Path::new(package);
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned()).unwrap_or_default();
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    (stem, std::cmp::Reverse(ext))
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
