//! md2sp-html - Convert Markdown files to HTML optimized for SharePoint.
//!
//! Reads one markdown file and writes inline-styled HTML to a file or to
//! stdout. Diagnostics and logs go to stderr.

mod convert;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use convert::ConvertArgs;
use output::Output;

/// Convert Markdown files to HTML optimized for SharePoint with code block highlighting.
#[derive(Parser)]
#[command(name = "md2sp-html", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to ERROR
    let filter = if cli.convert.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.convert.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
