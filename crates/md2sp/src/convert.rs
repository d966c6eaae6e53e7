//! Convert command implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use md2sp_config::{CliSettings, Config};
use md2sp_core::{ConvertOptions, Theme, convert, wrap_document};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for converting one markdown file.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Input markdown file path.
    input: PathBuf,

    /// Output HTML file path (prints to stdout if not provided).
    output: Option<PathBuf>,

    /// Wrap output in basic HTML structure with <body> tag.
    #[arg(short, long)]
    wrap: bool,

    /// Generate table of contents.
    #[arg(short, long)]
    toc: bool,

    /// Use dark theme for SharePoint (black/dark background).
    #[arg(short, long)]
    dark_theme: bool,

    /// Title for table of contents (default: "Table of Contents").
    #[arg(long, value_name = "TITLE")]
    toc_title: Option<String>,

    /// Path to configuration file (default: auto-discover md2sp.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is missing, configuration fails or
    /// reading or writing a file fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let input_path = std::path::absolute(&self.input)?;
        if !input_path.is_file() {
            return Err(CliError::InputNotFound(input_path));
        }

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = fs::read_to_string(&input_path)?;
        tracing::info!(path = %input_path.display(), bytes = markdown.len(), "Read input");

        let options = ConvertOptions {
            include_toc: config.convert.toc,
            toc_title: config.convert.toc_title,
            theme: config.convert.theme,
        };
        let mut html = convert(&markdown, &options);
        if config.output.wrap {
            html = wrap_document(&html, &document_title(&self.input));
        }

        match &self.output {
            Some(output) => {
                let output_path = std::path::absolute(output)?;
                fs::write(&output_path, &html)?;
                tracing::info!(path = %output_path.display(), bytes = html.len(), "Wrote output");
                Output::new().success(&format!(
                    "Successfully converted {} to {}",
                    self.input.display(),
                    output.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Map flags to config overrides.
    ///
    /// Boolean flags only ever switch a feature on, so an absent flag leaves
    /// the config file value in place. A blank `--toc-title` counts as absent.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            toc: self.toc.then_some(true),
            toc_title: self
                .toc_title
                .as_ref()
                .filter(|title| !title.trim().is_empty())
                .cloned(),
            theme: self.dark_theme.then_some(Theme::Dark),
            wrap: self.wrap.then_some(true),
        }
    }
}

/// Document title for the wrapper: the input's file name without extension.
fn document_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
