//! Type-based dependency analysis over a corpus of C++/C# source files.
//!
//! Binary crate entry point. All CLI logic is in the `cli` module.

fn main() {
    std::process::exit(depscope::cli::run());
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
