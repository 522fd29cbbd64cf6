//! CLI binary for pdfsift.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfsift::{
    clean_markdown, convert, convert_to_file, inspect, ConversionConfig, ProgressCallback,
    SharedProgressCallback,
};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar on stderr using
/// [indicatif]. Extraction is sequential, so events arrive in page order and
/// the bar simply counts up.
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically
    /// by `on_extraction_start` (called before any pages are read).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_extraction_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Opening");
        bar.set_message("Reading PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Extracting");
    }
}

impl ProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Extracting text from {total_pages} pages…"))
        ));
    }

    fn on_page_extracted(&self, page_num: u32, _total_pages: usize, chars: usize) {
        self.bar.set_message(format!("page {page_num} ({chars} chars)"));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, total_pages: usize, non_empty: usize) {
        self.bar.finish_and_clear();
        let skipped = total_pages.saturating_sub(non_empty);

        if non_empty == 0 {
            eprintln!(
                "{} no text extracted from {} pages — scanned or image-only document?",
                red("✘"),
                total_pages
            );
        } else if skipped > 0 {
            eprintln!(
                "{} {}/{} pages had extractable text  ({} empty)",
                cyan("⚠"),
                bold(&non_empty.to_string()),
                total_pages,
                skipped
            );
        } else {
            eprintln!(
                "{} {} pages extracted",
                green("✔"),
                bold(&non_empty.to_string())
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert next to the input (document.pdf → document.md)
  pdfsift document.pdf

  # Choose the destination
  pdfsift document.pdf -o notes/document.md

  # Write Markdown to stdout instead of a file
  pdfsift document.pdf -o -

  # Custom title, no table of contents
  pdfsift --title "Refactoring UI" --no-toc book.pdf

  # Re-run only the markdown post-pass on an existing file (in place)
  pdfsift --cleanup-only GUIDE.md

  # Inspect PDF metadata, no conversion
  pdfsift --inspect-only document.pdf

  # Machine-readable result
  pdfsift --json document.pdf > result.json

HOW IT WORKS:
  1. Extract    flat text per page (lopdf; no OCR, no rasterisation)
  2. Normalize  strip page-number artifacts from every line
  3. Classify   headings by line shape (all-caps, short title-case lines)
  4. Assemble   title + table of contents + per-page markdown sections
  5. Clean      restyle page markers, collapse duplicate separators/blanks

NOTES:
  Works on text-first PDFs (books, reports, articles). Scanned documents
  carry no text layer and come out empty — run OCR first. Encrypted
  documents are rejected; decrypt with: qpdf --decrypt in.pdf out.pdf
  Heading detection is heuristic: it judges lines purely by shape, so odd
  typography can misfile the occasional line.

ENVIRONMENT VARIABLES:
  RUST_LOG          Log filter (overrides -q/-v), e.g. RUST_LOG=pdfsift=debug
  PDFSIFT_OUTPUT    Default for --output
"#;

/// Extract text-first PDF documents into structured Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "pdfsift",
    version,
    about = "Extract text-first PDF documents into structured Markdown",
    long_about = "Extract PDF documents into clean, structured Markdown using deterministic \
text heuristics: page-number artifacts are stripped, headings are recovered from line shape, \
and the table of contents is rebuilt from dot-leader lines. No OCR, no rasterisation, no \
network — the same PDF always produces the same Markdown.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to convert (markdown file with --cleanup-only).
    input: PathBuf,

    /// Output file. Defaults to <INPUT> with extension .md; use '-' for stdout.
    #[arg(short, long, env = "PDFSIFT_OUTPUT")]
    output: Option<PathBuf>,

    /// Document title for the leading heading (default: input file stem).
    #[arg(long, env = "PDFSIFT_TITLE")]
    title: Option<String>,

    /// Skip the table-of-contents block.
    #[arg(long)]
    no_toc: bool,

    /// Keep the raw assembler output (skip the markdown post-pass).
    #[arg(long)]
    no_cleanup: bool,

    /// Treat INPUT as markdown and run only the post-pass on it.
    #[arg(long)]
    cleanup_only: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Output structured JSON (ConversionOutput) instead of Markdown.
    #[arg(long, env = "PDFSIFT_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDFSIFT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFSIFT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFSIFT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    let to_stdout = output_path.as_os_str() == "-";

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet
        && !cli.no_progress
        && !cli.json
        && !to_stdout
        && io::stderr().is_terminal();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input).context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            println!("Encrypted:    {}", meta.encrypted);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Cleanup-only mode ────────────────────────────────────────────────
    // The default output path equals the input here, so a bare
    // `pdfsift --cleanup-only file.md` cleans the file in place.
    if cli.cleanup_only {
        let raw = std::fs::read_to_string(&cli.input)
            .with_context(|| format!("Failed to read {}", cli.input.display()))?;
        let cleaned = clean_markdown(&raw);

        if to_stdout {
            write_stdout(&cleaned)?;
        } else {
            std::fs::write(&output_path, &cleaned)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            if !cli.quiet {
                eprintln!(
                    "{} cleaned markdown written to {}",
                    green("✔"),
                    bold(&output_path.display().to_string())
                );
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress: Option<SharedProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as SharedProgressCallback)
    } else {
        None
    };
    let config = build_config(&cli, progress);

    // ── Run conversion ───────────────────────────────────────────────────
    if cli.json {
        let output = convert(&cli.input, &config).context("Conversion failed")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if to_stdout {
        let output = convert(&cli.input, &config).context("Conversion failed")?;
        write_stdout(&output.markdown)?;
        if !cli.quiet {
            eprintln!("{}", output.summary());
        }
    } else {
        let stats = convert_to_file(&cli.input, &output_path, &config).context("Conversion failed")?;

        // Summary line (the callback already printed the extraction tick).
        if !cli.quiet {
            eprintln!(
                "{}  {}/{} pages  {} headings  {}ms  →  {}",
                green("✔"),
                stats.extracted_pages,
                stats.total_pages,
                stats.major_headings + stats.minor_headings,
                stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
            eprintln!(
                "   {}  /  {}  /  {}",
                dim(&format!("{} TOC entries", stats.toc_entries)),
                dim(&format!("{} artifact lines dropped", stats.dropped_lines)),
                dim(&format!("{} pages without text", stats.skipped_pages)),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<SharedProgressCallback>) -> ConversionConfig {
    let mut builder = ConversionConfig::builder()
        .include_toc(!cli.no_toc)
        .cleanup(!cli.no_cleanup);

    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build()
}

/// Default output path: the input with its extension replaced by `.md`.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("md")
}

/// Write markdown to stdout, ensuring a trailing newline.
fn write_stdout(markdown: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(markdown.as_bytes())
        .context("Failed to write to stdout")?;
    if !markdown.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
