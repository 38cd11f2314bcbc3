//! Component J: display. Reads AST/metrics/dependency state and prints
//! it; never mutates. Spec §4.J, §6.

use std::collections::BTreeMap;
use std::io::Write;

use ptree::TreeBuilder;

use crate::ast::ASTNode;
use crate::deps::DependencyTable;
use crate::metrics::MetricsRow;

const FILE_W: usize = 25;
const TYPE_W: usize = 12;
const NAME_W: usize = 35;
const LINE_W: usize = 8;

/// Prints the metrics table: one row per scope, right-justified fixed
/// columns, with the header repeated whenever the file name changes
/// (spec §6).
pub fn print_metrics_table(rows: &[MetricsRow], out: &mut impl Write) -> std::io::Result<()> {
    let mut last_file: Option<&str> = None;
    for row in rows {
        if last_file != Some(row.package) {
            writeln!(
                out,
                "{:>FILE_W$} {:>TYPE_W$} {:>NAME_W$} {:>LINE_W$} {:>LINE_W$} {:>LINE_W$}",
                "file", "type", "name", "start", "size", "complexity"
            )?;
            last_file = Some(row.package);
        }
        let size = row.node.end_line.saturating_sub(row.node.start_line) + 1;
        writeln!(
            out,
            "{:>FILE_W$} {:>TYPE_W$} {:>NAME_W$} {:>LINE_W$} {:>LINE_W$} {:>LINE_W$}",
            row.package,
            row.node.node_type.as_str(),
            row.node.name,
            row.node.start_line,
            size,
            row.node.complexity,
        )?;
    }
    Ok(())
}

/// Prints per-file source-line counts (spec §6 `/s`), sorted by file
/// name for determinism.
pub fn print_sloc(sloc: &BTreeMap<String, usize>, out: &mut impl Write) -> std::io::Result<()> {
    for (file, count) in sloc {
        writeln!(out, "{:>FILE_W$} {:>8}", file, count)?;
    }
    Ok(())
}

/// Prints the dependency table in discovery order, one record per file,
/// its own dependency set sorted ascending (spec §6).
pub fn print_dependency_table(order: &[String], table: &DependencyTable, out: &mut impl Write) -> std::io::Result<()> {
    for file in order {
        let deps = table.get(file).cloned().unwrap_or_default();
        let list: Vec<&str> = deps.iter().map(|s| s.as_str()).collect();
        writeln!(out, "{file} -> [{}]", list.join(", "))?;
    }
    Ok(())
}

/// Renders the AST as a tree via `ptree` (spec §6 `/a`; format adopted
/// from the pack's parser-tree printer rather than hand-rolled indentation).
pub fn print_ast_dump(root: &ASTNode) -> std::io::Result<()> {
    let mut builder = TreeBuilder::new(root.show());
    for child in &root.children {
        add_node(&mut builder, child);
    }
    let tree = builder.build();
    ptree::print_tree(&tree)
}

fn add_node(builder: &mut TreeBuilder, node: &ASTNode) {
    builder.begin_child(node.show());
    for child in &node.children {
        add_node(builder, child);
    }
    builder.end_child();
}
