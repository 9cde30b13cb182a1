//! Command-line interface for the c4izr utility
//!
//! Provides a CLI to convert draw.io diagrams into C4 system context
//! diagrams, one file or a whole directory at a time.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::container::{extract_pages, wrap_pages, Page};
use c4izr::core::logging::init_logging;
use c4izr::prelude::*;
use c4izr::DEFAULT_SCALING_FACTOR;

/// Directory used for batch output when `--output` is not a directory
pub const DEFAULT_OUTPUT_DIR: &str = "c4_output";

/// Prefix of every file written in batch mode
pub const OUTPUT_PREFIX: &str = "c4_";

/// c4izr - Convert draw.io diagrams to C4 system context diagrams
#[derive(Parser)]
#[command(name = "c4izr")]
#[command(about = "Convert draw.io diagrams to standard C4 representation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a .drawio file, or every .drawio file in a directory
    Convert(ConvertArgs),

    /// Summarize the diagrams in a file without converting them
    Inspect {
        /// Input .drawio file (use - for stdin)
        input: PathBuf,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to a .drawio file or a directory of .drawio files (use - for stdin)
    pub input: PathBuf,

    /// Output file for a single input, or directory for batch mode (use - for stdout)
    #[arg(short, long, default_value = "output.drawio")]
    pub output: PathBuf,

    /// Magnification of each system's offset from the diagram center
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SCALING_FACTOR,
        value_parser = parse_scaling_factor
    )]
    pub scaling_factor: f64,

    /// Select the first system as main system instead of prompting
    #[arg(long)]
    pub non_interactive: bool,

    /// Indent the output XML
    #[arg(long)]
    pub pretty: bool,

    /// Convert every page of the input instead of only the first
    #[arg(long)]
    pub all_pages: bool,
}

impl ConvertArgs {
    pub fn options(&self) -> TranslateOptions {
        TranslateOptions::new()
            .with_scaling_factor(self.scaling_factor)
            .with_interactive(!self.non_interactive)
    }
}

fn parse_scaling_factor(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("scaling factor must be positive, got {}", raw))
    }
}

/// Outcome of a directory conversion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub failed: usize,
}

/// Per-page section of `inspect --json`
#[derive(Debug, Serialize)]
struct PageReport<'a> {
    name: &'a str,
    vertices: Vec<VertexReport<'a>>,
    edges: usize,
    relationships: usize,
    floating_edges: usize,
    bounding_box: Option<[f64; 4]>,
    center: Option<[f64; 2]>,
    duplicate_labels: bool,
}

#[derive(Debug, Serialize)]
struct VertexReport<'a> {
    id: Option<&'a str>,
    label: &'a str,
    has_geometry: bool,
}

impl<'a> PageReport<'a> {
    fn new(name: &'a str, summary: &'a DiagramSummary) -> Self {
        Self {
            name,
            vertices: summary
                .vertices
                .iter()
                .map(|v| VertexReport {
                    id: v.id.as_deref(),
                    label: &v.label,
                    has_geometry: v.has_geometry,
                })
                .collect(),
            edges: summary.edge_count,
            relationships: summary.relationship_count(),
            floating_edges: summary.floating_edge_count,
            bounding_box: summary.geometry.map(|g| {
                let b = g.bounding_box;
                [b.min_x, b.min_y, b.max_x, b.max_y]
            }),
            center: summary.geometry.map(|g| [g.center.x, g.center.y]),
            duplicate_labels: summary.duplicate_labels,
        }
    }
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct C4izrApp;

impl C4izrApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let default_level = if cli.verbose && cli.log_level == LogLevel::Info {
            LogLevel::Debug
        } else {
            cli.log_level
        };
        let log_level_str = std::env::var("C4IZR_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| default_level.as_str().to_string());
        let log_format_str = std::env::var("C4IZR_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(
            Some(log_level_str.as_str()),
            Some(log_format_str.as_str()),
        ) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("c4izr v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert(args) => self.convert_command(&args),
            Commands::Inspect { input, json } => self.inspect_command(&input, json),
        }
    }

    /// Handle the convert command
    pub fn convert_command(&mut self, args: &ConvertArgs) -> Result<()> {
        if !is_stdio(&args.input) && !args.input.exists() {
            bail!("Input path '{}' does not exist", args.input.display());
        }

        if args.input.is_dir() {
            let output_dir = if args.output.is_dir() {
                args.output.clone()
            } else {
                PathBuf::from(DEFAULT_OUTPUT_DIR)
            };
            let report = self.convert_directory(&args.input, &output_dir, args)?;
            if report.converted == 0 {
                bail!(
                    "No diagrams were converted from '{}'",
                    args.input.display()
                );
            }
            return Ok(());
        }

        self.convert_file(&args.input, &args.output, args)
    }

    /// Convert one file and write the result to `output`
    pub fn convert_file(&mut self, input: &Path, output: &Path, args: &ConvertArgs) -> Result<()> {
        debug!(input = %input.display(), "Processing file");
        let content = self.read_input(input)?;
        let mut pages =
            extract_pages(&content).with_context(|| format!("Error reading file {}", input.display()))?;

        if !args.all_pages && pages.len() > 1 {
            info!(
                pages = pages.len(),
                "Multiple diagrams found in {}. Converting only the first.",
                input.display()
            );
            pages.truncate(1);
        }

        let mut translator = Translator::new(args.options());
        let models: Vec<&str> = pages.iter().map(|p| p.model.as_str()).collect();
        let translated = translator
            .translate_many(&models)
            .into_iter()
            .zip(&pages)
            .map(|(result, page)| {
                result.with_context(|| format!("Error translating page '{}'", page.name))
            })
            .collect::<Result<Vec<String>>>()?;

        let document = wrap_pages(
            pages
                .iter()
                .zip(&translated)
                .map(|(page, model): (&Page, &String)| (page.name.as_str(), model.as_str())),
        )?;
        let document = if args.pretty {
            pretty_print(&document)
        } else {
            document
        };

        self.write_output(output, &document)?;
        if !is_stdio(output) {
            info!("Conversion successful. Output written to {}", output.display());
        }
        Ok(())
    }

    /// Convert every `.drawio` file below `input_dir`
    ///
    /// Failures are logged and counted; they do not stop the batch.
    pub fn convert_directory(
        &mut self,
        input_dir: &Path,
        output_dir: &Path,
        args: &ConvertArgs,
    ) -> Result<BatchReport> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory '{}'", output_dir.display())
        })?;

        let mut report = BatchReport::default();
        for file in find_drawio_files(input_dir)? {
            let target = batch_output_path(input_dir, output_dir, &file);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            match self.convert_file(&file, &target, args) {
                Ok(()) => report.converted += 1,
                Err(e) => {
                    error!("Error processing {}: {:#}", file.display(), e);
                    report.failed += 1;
                }
            }
        }

        info!(
            converted = report.converted,
            failed = report.failed,
            "Processing complete: {} files converted successfully, {} failures",
            report.converted,
            report.failed
        );
        Ok(report)
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: &Path, json: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let pages = extract_pages(&content)?;
        let summaries = pages
            .iter()
            .map(|page| inspect(&page.model))
            .collect::<c4izr::Result<Vec<_>>>()?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if json {
            let reports: Vec<_> = pages
                .iter()
                .zip(&summaries)
                .map(|(page, summary)| PageReport::new(&page.name, summary))
                .collect();
            let document = serde_json::json!({
                "file": input.display().to_string(),
                "pages": reports,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        } else {
            for (page, summary) in pages.iter().zip(&summaries) {
                write_summary(&mut out, &page.name, summary)?;
            }
        }
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: &Path) -> Result<String> {
        if is_stdio(input) {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            return Ok(content);
        }
        fs::read_to_string(input)
            .map_err(|e| anyhow!("Failed to read input file '{}': {}", input.display(), e))
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: &Path, content: &str) -> Result<()> {
        if is_stdio(output) {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", content)?;
            stdout.flush()?;
            return Ok(());
        }
        fs::write(output, content)
            .map_err(|e| anyhow!("Failed to write output file '{}': {}", output.display(), e))
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// All `.drawio` files below `dir`, sorted for a stable processing order
pub fn find_drawio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current)
            .with_context(|| format!("Failed to read directory '{}'", current.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("drawio"))
            {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// `<output_dir>/c4_<path relative to input_dir>`
pub fn batch_output_path(input_dir: &Path, output_dir: &Path, file: &Path) -> PathBuf {
    let relative = file.strip_prefix(input_dir).unwrap_or(file);
    output_dir.join(format!("{}{}", OUTPUT_PREFIX, relative.display()))
}

fn write_summary(out: &mut impl Write, name: &str, summary: &DiagramSummary) -> io::Result<()> {
    writeln!(out, "Page: {}", name)?;
    writeln!(out, "  Systems: {}", summary.vertex_count())?;
    for (ix, vertex) in summary.vertices.iter().enumerate() {
        let geometry = if vertex.has_geometry { "" } else { " (no geometry)" };
        writeln!(out, "    {}. {}{}", ix + 1, vertex.label, geometry)?;
    }
    writeln!(
        out,
        "  Relationships: {} ({} floating edges)",
        summary.relationship_count(),
        summary.floating_edge_count
    )?;
    if let Some(geometry) = &summary.geometry {
        writeln!(out, "  Bounding box: {}", geometry.bounding_box)?;
        writeln!(out, "  Center: {}", geometry.center)?;
    }
    if summary.duplicate_labels {
        writeln!(out, "  Warning: duplicate system names")?;
    }
    Ok(())
}
