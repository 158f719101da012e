//! wordgrid CLI - table manifest checking and rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use wordgrid::render::GridStats;
use wordgrid::{read_manifest_file, Document, JsonFormat, StyleNotice, ValidationMode, WriterRegistry};

#[derive(Parser)]
#[command(name = "wordgrid")]
#[command(version)]
#[command(about = "Check and render word-processing table manifests", long_about = None)]
struct Cli {
    /// Input manifest file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Keep rows whose span differs from the column count, overriding the
    /// manifest's validation setting
    #[arg(long, global = true, env = "WORDGRID_LENIENT")]
    lenient: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a manifest and report its tables
    Check {
        /// Input manifest file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List the registered styles in index order
    Styles {
        /// Input manifest file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a manifest to JSON
    Json {
        /// Input manifest file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render a manifest to plain text
    Text {
        /// Input manifest file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write a manifest with a registered writer
    Convert {
        /// Input manifest file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file; its extension selects the writer
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Writer name, overriding the output extension
        #[arg(short, long)]
        writer: Option<String>,
    },

    /// Show version information
    Version,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = BuildOptions {
        lenient: cli.lenient,
    };

    let result = match cli.command {
        Some(Commands::Check { input }) => cmd_check(&input, options).map(|report| {
            print!("{}", report);
        }),
        Some(Commands::Styles { input, json }) => cmd_styles(&input, options, json),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, options, output.as_deref(), compact),
        Some(Commands::Text { input, output }) => cmd_text(&input, options, output.as_deref()),
        Some(Commands::Convert {
            input,
            output,
            writer,
        }) => cmd_convert(&input, options, &output, writer.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: check if input is provided
            if let Some(input) = cli.input {
                cmd_check(&input, options).map(|report| print!("{}", report))
            } else {
                println!("{}", "Usage: wordgrid <FILE>".yellow());
                println!("       wordgrid --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Command-line overrides applied on top of a manifest's settings.
#[derive(Debug, Clone, Copy, Default)]
struct BuildOptions {
    lenient: bool,
}

fn load(input: &Path, options: BuildOptions) -> CliResult<Document> {
    let manifest = read_manifest_file(input)?;
    let mut settings = manifest.effective_settings();
    if options.lenient {
        settings.validation = ValidationMode::Lenient;
    }
    let doc = manifest.build_with(settings)?;
    for notice in doc.styles().notices() {
        eprintln!("{}: {}", "Notice".yellow().bold(), notice);
    }
    Ok(doc)
}

fn emit(content: &str, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_check(input: &Path, options: BuildOptions) -> CliResult<String> {
    let doc = load(input, options)?;
    let mut report = String::new();

    report.push_str(&format!("{}\n", "Document Check".cyan().bold()));
    report.push_str(&format!("{}\n", "─".repeat(40).dimmed()));
    report.push_str(&format!("{}: {}\n", "File".bold(), input.display()));
    if let Some(ref title) = doc.metadata.title {
        report.push_str(&format!("{}: {}\n", "Title".bold(), title));
    }
    report.push_str(&format!(
        "{}: {}\n",
        "Default font".bold(),
        doc.settings.default_font_label()
    ));
    if let Some(spacing) = doc.settings.default_paragraph_spacing {
        report.push_str(&format!("{}: {} twips\n", "Paragraph spacing".bold(), spacing));
    }
    if let Some(ref renderer) = doc.settings.pdf_renderer {
        report.push_str(&format!(
            "{}: {} ({}), font {}\n",
            "PDF renderer".bold(),
            renderer.renderer.name(),
            renderer.library_path.display(),
            doc.settings.pdf_font()
        ));
    }
    report.push_str(&format!("{}: {}\n", "Styles".bold(), doc.styles().count()));
    report.push_str(&format!("{}: {}\n", "Blocks".bold(), doc.body().len()));

    for (i, table) in doc.tables().enumerate() {
        let style = table
            .style()
            .and_then(|s| s.name())
            .unwrap_or("(inline)");
        report.push_str(&format!(
            "{} {}: {} rows x {} columns, style {}\n",
            "Table".bold(),
            i + 1,
            table.row_count(),
            table.column_count(),
            style
        ));
    }

    let stats = GridStats::of_document(&doc);
    report.push_str(&format!(
        "{}: {} ({} merged), nesting depth {}\n",
        "Cells".bold(),
        stats.cells,
        stats.merged_cells,
        stats.max_depth
    ));

    let duplicates = doc
        .styles()
        .notices()
        .iter()
        .filter(|n| matches!(n, StyleNotice::DuplicateStyleNameIgnored { .. }))
        .count();
    if duplicates > 0 {
        report.push_str(&format!(
            "{} {} duplicate style name(s) ignored\n",
            "Warning:".yellow(),
            duplicates
        ));
    }

    report.push_str(&format!("{}\n", "OK".green().bold()));
    Ok(report)
}

fn cmd_styles(input: &Path, options: BuildOptions, json: bool) -> CliResult<()> {
    let doc = load(input, options)?;

    if json {
        let catalogue = wordgrid::render::styles_to_json(doc.styles(), JsonFormat::Pretty)?;
        println!("{}", catalogue);
        return Ok(());
    }

    println!("{}", "Styles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for style in doc.styles().iter() {
        println!(
            "{:>3}  {:<10} {}",
            style.index().unwrap_or_default(),
            style.kind().to_string().dimmed(),
            style.name().unwrap_or_default()
        );
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    options: BuildOptions,
    output: Option<&Path>,
    compact: bool,
) -> CliResult<()> {
    let doc = load(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = wordgrid::render::to_json(&doc, format)?;
    emit(&json, output)
}

fn cmd_text(input: &Path, options: BuildOptions, output: Option<&Path>) -> CliResult<()> {
    let doc = load(input, options)?;
    let text = wordgrid::render::to_text(&doc)?;
    emit(&text, output)
}

fn cmd_convert(
    input: &Path,
    options: BuildOptions,
    output: &Path,
    writer: Option<&str>,
) -> CliResult<()> {
    let doc = load(input, options)?;
    let registry = WriterRegistry::with_defaults();

    let writer = match writer {
        Some(name) => registry
            .get_by_name(name)
            .ok_or_else(|| wordgrid::Error::UnknownWriter(name.to_string()))?,
        None => registry.writer_for_path(output)?,
    };

    let bytes = writer.write(&doc)?;
    fs::write(output, bytes)?;
    println!(
        "{} {} ({})",
        "Saved to".green(),
        output.display(),
        writer.mime_type()
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "wordgrid".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Style registry and table grid tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const SPAN_MANIFEST: &str = r#"{
        "styles": [
            { "kind": "table", "name": "Colspan Rowspan",
              "attributes": { "borderSize": 6, "borderColor": "999999" } },
            { "kind": "table", "name": "Colspan Rowspan",
              "attributes": { "borderSize": 1 } }
        ],
        "body": [
            { "type": "table", "style": "Colspan Rowspan", "rows": [
                { "cells": [
                    { "width": 500, "text": "A" },
                    { "width": 1000, "style": { "gridSpan": 2 }, "text": "B" },
                    { "width": 500, "style": { "vMerge": "restart" }, "text": "C" } ] },
                { "cells": [
                    { "width": 1500, "style": { "gridSpan": 3 }, "text": "D" },
                    { "style": { "vMerge": "continue" } } ] },
                { "cells": [
                    { "width": 500, "text": "E" },
                    { "width": 500, "text": "F" },
                    { "width": 500, "text": "G" },
                    { "style": { "vMerge": "continue" } } ] }
            ] }
        ]
    }"#;

    const SHORT_ROW_MANIFEST: &str = r#"{
        "body": [ { "type": "table", "rows": [
            { "cells": [ { "text": "1" }, { "text": "2" } ] },
            { "cells": [ { "text": "3" } ] }
        ] } ]
    }"#;

    const LENIENT_MANIFEST: &str = r#"{
        "settings": { "validation": "lenient", "default_font_name": "Calibri",
                      "default_font_size": 11, "default_paragraph_spacing": 120 },
        "body": [ { "type": "table", "rows": [
            { "cells": [ { "text": "1" }, { "text": "2" } ] },
            { "cells": [ { "text": "3" } ] }
        ] } ]
    }"#;

    fn strict() -> BuildOptions {
        BuildOptions::default()
    }

    fn lenient() -> BuildOptions {
        BuildOptions { lenient: true }
    }

    fn manifest_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_check_reports_tables() {
        colored::control::set_override(false);
        let file = manifest_file(SPAN_MANIFEST);
        let report = cmd_check(file.path(), strict()).unwrap();

        assert!(report.contains("Styles: 1"));
        assert!(report.contains("Table 1: 3 rows x 4 columns, style Colspan Rowspan"));
        assert!(report.contains("1 duplicate style name(s) ignored"));
        assert!(report.ends_with("OK\n"));
    }

    #[test]
    fn test_check_strict_rejects_short_rows() {
        let file = manifest_file(SHORT_ROW_MANIFEST);
        assert!(cmd_check(file.path(), strict()).is_err());
        assert!(cmd_check(file.path(), lenient()).is_ok());
    }

    #[test]
    fn test_manifest_settings_are_kept() {
        colored::control::set_override(false);
        let file = manifest_file(LENIENT_MANIFEST);
        let report = cmd_check(file.path(), strict()).unwrap();
        assert!(report.contains("Default font: Calibri 11pt"));
        assert!(report.contains("Paragraph spacing: 120 twips"));

        let doc = load(file.path(), strict()).unwrap();
        assert_eq!(doc.settings.validation, ValidationMode::Lenient);
        assert_eq!(doc.settings.default_font_name, "Calibri");
    }

    #[test]
    fn test_json_to_file() {
        let file = manifest_file(SPAN_MANIFEST);
        let dir = tempdir().unwrap();
        let out = dir.path().join("grid.json");

        cmd_json(file.path(), strict(), Some(&out), true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["body"][0]["type"], "table");
        assert_eq!(value["body"][0]["rows"][1]["cells"][1]["grid_span"], 1);
    }

    #[test]
    fn test_convert_by_extension() {
        let file = manifest_file(SPAN_MANIFEST);
        let dir = tempdir().unwrap();
        let out = dir.path().join("grid.txt");

        cmd_convert(file.path(), strict(), &out, None).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        // trailing whitespace is trimmed from the whole document
        assert_eq!(text, "A\tB\tC\nD\t\nE\tF\tG");
    }

    #[test]
    fn test_convert_unknown_writer() {
        let file = manifest_file(SPAN_MANIFEST);
        let dir = tempdir().unwrap();
        let out = dir.path().join("grid.odt");

        assert!(cmd_convert(file.path(), strict(), &out, None).is_err());
        assert!(cmd_convert(file.path(), strict(), &out, Some("rtf")).is_err());
    }
}
