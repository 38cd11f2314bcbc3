//! Component H: dependency resolver. Second pass over the corpus: for
//! every file, re-tokenize its source and record which other files define
//! a type the file's tokens reference. Spec §4.H.
//!
//! This pass is independent per file — it only reads the type table built
//! from phase one — so the driver may run it across worker threads and
//! merge the per-chunk maps (spec's ambient `--threads` option).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::token::Tokenizer;
use crate::typetable::TypeTable;

/// File name -> the set of file names it depends on, sorted for
/// deterministic output.
pub type DependencyTable = BTreeMap<String, BTreeSet<String>>;

fn file_label(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Scans one file's source for identifier tokens that name a type the
/// table knows about, excluding the file's own type(s) (a type always
/// "depends on" the file that defines it, which is never interesting)
/// and any reference to itself by name.
pub fn resolve_file(types: &TypeTable, path: &Path, source: &str) -> BTreeSet<String> {
    let own_file = file_label(path);
    let mut deps = BTreeSet::new();
    for tok in Tokenizer::new(source) {
        if !tok.is_identifier_like() {
            continue;
        }
        if let Some(defining_file) = types.lookup(&tok.lexeme) {
            if defining_file != own_file {
                deps.insert(defining_file.to_string());
            }
        }
    }
    deps
}

/// Resolves dependencies for every `(path, source)` pair, splitting the
/// work across up to `threads` worker threads and merging their results.
/// `threads == 0` or `1` runs single-threaded.
pub fn resolve_all(types: &TypeTable, files: &[(PathBuf, String)], threads: usize) -> DependencyTable {
    let worker_count = threads.max(1).min(files.len().max(1));
    if worker_count <= 1 {
        return files.iter().map(|(path, src)| (file_label(path), resolve_file(types, path, src))).collect();
    }

    let chunk_size = files.len().div_ceil(worker_count);
    let chunks: Vec<&[(PathBuf, String)]> = files.chunks(chunk_size.max(1)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                scope.spawn(move || {
                    chunk.iter().map(|(path, src)| (file_label(path), resolve_file(types, path, src))).collect::<Vec<_>>()
                })
            })
            .collect();

        handles.into_iter().flat_map(|h| h.join().unwrap_or_default()).collect()
    })
}

#[cfg(test)]
#[path = "deps_tests.rs"]
mod tests;
