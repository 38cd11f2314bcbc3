//! CLI argument struct and the `/`-prefixed option translation spec §6
//! calls for. `clap` can't parse `/`-prefixed flags directly, so argv is
//! rewritten into clap's `--long` form before `AnalyzeArgs::parse_from`
//! ever sees it — clap remains the actual parser.

use std::path::PathBuf;

use clap::Parser;

/// Type-based dependency analysis over a corpus of C++/C# source files.
#[derive(Parser, Debug)]
#[command(name = "depscope", version, about)]
pub struct AnalyzeArgs {
    /// Root directory to analyze (must exist).
    pub root: PathBuf,

    /// File patterns to include, e.g. `*.h` `*.cpp` `*.cs`. At least one required.
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Emit the function/scope metrics table (spec /m).
    #[arg(long)]
    pub metrics: bool,

    /// Emit per-file source-line counts (spec /s).
    #[arg(long)]
    pub sloc: bool,

    /// Emit an AST dump (spec /a).
    #[arg(long)]
    pub ast: bool,

    /// Enable the result log sink (spec /r).
    #[arg(long = "result-log")]
    pub result_log: bool,

    /// Enable the demo log sink (spec /d).
    #[arg(long = "demo-log")]
    pub demo_log: bool,

    /// Enable the debug log sink (spec /b).
    #[arg(long = "debug-log")]
    pub debug_log: bool,

    /// Also tee every enabled sink to `<root>/logFile.txt` (spec /f).
    #[arg(long = "log-file")]
    pub log_file: bool,

    /// Worker threads for the dependency-resolution pass (0 = auto-detect).
    #[arg(long, default_value = "0")]
    pub threads: usize,
}

/// Rewrites exact `/x` tokens into their `--longform` equivalent. Only
/// whole arguments that exactly match a known flag are translated — an
/// absolute root path like `/home/user/project` is untouched, since it
/// never equals one of these short tokens outright.
pub fn translate_slash_flags(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "/m" => "--metrics".to_string(),
            "/s" => "--sloc".to_string(),
            "/a" => "--ast".to_string(),
            "/r" => "--result-log".to_string(),
            "/d" => "--demo-log".to_string(),
            "/b" => "--debug-log".to_string(),
            "/f" => "--log-file".to_string(),
            _ => arg,
        })
        .collect()
}
