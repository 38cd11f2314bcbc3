//! CLI layer: argument translation/parsing and command dispatch.

pub mod args;
pub mod display;

use clap::Parser;

use crate::logging::{self, LogFlags};
use args::AnalyzeArgs;

/// Parses argv, runs the pipeline, prints whichever outputs were asked
/// for, and returns the process exit code (spec §6: `0` success, `1`
/// fatal error).
pub fn run() -> i32 {
    let argv = std::env::args().collect::<Vec<_>>();
    run_with_args(argv)
}

fn run_with_args(argv: Vec<String>) -> i32 {
    let translated = args::translate_slash_flags(argv);
    let args = match AnalyzeArgs::try_parse_from(translated) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    let log_flags = LogFlags {
        result: args.result_log,
        demo: args.demo_log,
        debug: args.debug_log,
        log_file: args.log_file,
    };
    if let Err(e) = logging::init(&args.root, log_flags) {
        eprintln!("Error: {e}");
        return 1;
    }

    match crate::analyze(&args.root, &args.patterns, args.threads) {
        Ok(output) => {
            for diagnostic in &output.diagnostics {
                tracing::event!(target: "debug", tracing::Level::INFO, "{diagnostic}");
            }

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if args.metrics {
                let _ = display::print_metrics_table(&output.metrics_rows(), &mut out);
            }
            if args.sloc {
                let _ = display::print_sloc(&output.sloc, &mut out);
            }
            if args.ast {
                let _ = display::print_ast_dump(&output.root);
            }
            tracing::event!(target: "result", tracing::Level::INFO, "analyzed {} files", output.discovery_order.len());
            let _ = display::print_dependency_table(&output.discovery_order, &output.dependencies, &mut out);
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
