//! End-to-end tests for the `md2sp-html` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_md2sp-html"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_converts_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc.md"), "# Title\n\nHello **world**.").unwrap();

    let output = run(dir.path(), &["doc.md"]);

    assert_eq!(output.status.code(), Some(0));
    let html = stdout(&output);
    assert!(html.starts_with(r#"<h1 style="font-size: 2em;"#));
    assert!(html.contains(r#"<strong style="font-weight: bold;">world</strong>"#));
    assert!(html.ends_with("</p>\n\n"));
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["missing.md"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("Error: Input file not found: "));
    assert!(err.contains("missing.md"));
}

#[test]
fn test_writes_wrapped_output_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "Some text").unwrap();

    let output = run(dir.path(), &["notes.md", "out.html", "--wrap"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("Successfully converted notes.md to out.html"));

    let html = fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert!(html.starts_with(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>notes</title>\n</head>\n<body>\n"
    ));
    assert!(html.contains(r#"<p style="margin: 1em 0; line-height: 1.6;">Some text</p>"#));
    assert!(html.ends_with("</body>\n</html>"));
}

#[test]
fn test_wrap_applies_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page.md"), "Text").unwrap();

    let output = run(dir.path(), &["page.md", "-w"]);

    let html = stdout(&output);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>page</title>"));
}

#[test]
fn test_toc_and_dark_theme() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("guide.md"),
        "# Intro\n\n## Setup Guide\n\n```rust\nfn main() {}\n```\n",
    )
    .unwrap();

    let output = run(
        dir.path(),
        &["guide.md", "-t", "-d", "--toc-title", "Contents"],
    );

    assert_eq!(output.status.code(), Some(0));
    let html = stdout(&output);
    assert!(html.starts_with(r#"<div class="md2sp-toc" style="background-color: #151b23;"#));
    assert!(html.contains(">Contents</p>"));
    assert!(html.contains(r##"href="#setup-guide""##));
    assert!(html.contains("background-color: #1e1e1e"));
}

#[test]
fn test_discovered_config_applies() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("md2sp.toml"),
        "[convert]\ntoc = true\ntoc_title = \"From Config\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("doc.md"), "# Intro\n").unwrap();

    let output = run(dir.path(), &["doc.md"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(">From Config</p>"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.toml"), "[convert]\ntheme = \"sepia\"\n").unwrap();
    fs::write(dir.path().join("doc.md"), "# Intro\n").unwrap();

    let output = run(dir.path(), &["doc.md", "--config", "bad.toml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("TOML parse error"));
}

#[test]
fn test_empty_toc_title_uses_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc.md"), "# Intro\n").unwrap();

    let output = run(dir.path(), &["doc.md", "--toc", "--toc-title", ""]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(">Table of Contents</p>"));
}
