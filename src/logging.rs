//! Logging setup: the three named sinks from spec §6 (`result`, `demo`,
//! `debug`), each gated by its own CLI flag, implemented as `tracing`
//! targets rather than separate file handles.

use std::fs::File;
use std::path::Path;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::error::AnalysisError;

/// Which sinks the CLI asked for (`/r`, `/d`, `/b`, `/f`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFlags {
    pub result: bool,
    pub demo: bool,
    pub debug: bool,
    pub log_file: bool,
}

/// Builds the `EnvFilter` directive string for whichever sinks are
/// enabled; a disabled sink's target is filtered out entirely rather than
/// merely lowered in severity.
fn filter_directives(flags: LogFlags) -> String {
    let mut directives = vec!["off".to_string()];
    if flags.result {
        directives.push("result=info".to_string());
    }
    if flags.demo {
        directives.push("demo=info".to_string());
    }
    if flags.debug {
        directives.push("debug=info".to_string());
    }
    directives.join(",")
}

/// Installs the global `tracing` subscriber. When `/f` is set, every
/// enabled sink is additionally teed to `<root>/logFile.txt` via
/// `MakeWriterExt::and` — no extra dependency needed for the fan-out.
pub fn init(root: &Path, flags: LogFlags) -> Result<(), AnalysisError> {
    let filter = EnvFilter::new(filter_directives(flags));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).without_time().with_target(true);

    // `try_init` rather than `init`: a global subscriber may already be
    // installed (e.g. repeated calls within one process, as in tests) —
    // that's not a failure worth surfacing as `AnalysisError`.
    if flags.log_file {
        let log_path = root.join("logFile.txt");
        let file = File::create(&log_path).map_err(|source| AnalysisError::IoError { path: log_path, source })?;
        let _ = builder.with_writer(std::io::stderr.and(file)).try_init();
    } else {
        let _ = builder.with_writer(std::io::stderr).try_init();
    }
    Ok(())
}
