//! Component I: file discovery driver (external per spec §4.I, but still
//! needed for the binary to run end to end). Walks the root directory with
//! `ignore`'s gitignore-aware builder, filters by the user's glob
//! patterns, and orders headers before implementation files so the parser
//! can rely on the headers-first invariant (spec §4.C, §5).

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

use crate::error::AnalysisError;
use crate::language::{FileKind, Language};

/// The ordered file list plus the raw walk counts spec §4.I calls for.
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub files_visited: usize,
    pub dirs_visited: usize,
}

/// Walks `root`, keeping only entries that match one of `patterns` (glob
/// syntax, e.g. `*.h`, `*.cpp`, `*.cs`) and that the tool recognizes as
/// C++ or C# (spec §4.I "discovers files"). Returns headers before
/// implementation files; within each group, entries keep the walk's
/// natural (alphabetical-per-directory) order.
pub fn discover(root: &Path, patterns: &[String]) -> Result<Discovery, AnalysisError> {
    if !root.is_dir() {
        return Err(AnalysisError::PathError(root.to_path_buf()));
    }

    let mut overrides = OverrideBuilder::new(root);
    for pattern in patterns {
        overrides.add(pattern).map_err(|_| AnalysisError::UsageError(format!("invalid pattern: {pattern}")))?;
    }
    let overrides = overrides.build().map_err(|_| AnalysisError::UsageError("invalid pattern set".to_string()))?;

    let mut files_visited = 0usize;
    let mut dirs_visited = 0usize;
    let mut headers = Vec::new();
    let mut impls = Vec::new();

    for entry in WalkBuilder::new(root).overrides(overrides).build() {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir {
            dirs_visited += 1;
            continue;
        }
        let path = entry.path();
        if Language::of(path).is_none() {
            continue;
        }
        files_visited += 1;
        match Language::file_kind(path) {
            FileKind::Header => headers.push(path.to_path_buf()),
            FileKind::Implementation => impls.push(path.to_path_buf()),
        }
    }

    headers.sort();
    impls.sort();
    let mut files = headers;
    files.extend(impls);

    Ok(Discovery { files, files_visited, dirs_visited })
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
