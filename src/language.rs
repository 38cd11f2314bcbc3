//! Source language detection from file extension (spec §4.D: "current language").

use std::path::Path;

/// The two language families the rule engine understands. Detected purely
/// from extension — the core never sniffs file content to pick a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
    CSharp,
}

/// Whether a C++ file is a header or an implementation file. Drives the
/// headers-first ordering (spec §4.C "C++ member out-of-line relocation")
/// and the metrics sort (spec §4.F: ".h groups before .cpp").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Header,
    Implementation,
}

impl Language {
    /// Classify a file by extension. Returns `None` for anything outside
    /// the corpus this tool understands.
    pub fn of(path: &Path) -> Option<Language> {
        match path.extension().and_then(|e| e.to_str())?.to_lowercase().as_str() {
            "h" | "hpp" | "hh" | "hxx" | "cpp" | "cc" | "cxx" => Some(Language::Cpp),
            "cs" => Some(Language::CSharp),
            _ => None,
        }
    }

    /// Whether this is a C++ header (vs. implementation) file. C# has no
    /// header/implementation split, so it's never a header for ordering
    /// purposes.
    pub fn file_kind(path: &Path) -> FileKind {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()) {
            Some(ext) if matches!(ext.as_str(), "h" | "hpp" | "hh" | "hxx") => FileKind::Header,
            _ => FileKind::Implementation,
        }
    }
}
