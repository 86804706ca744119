//! CLI binary for bengali-pdf2txt.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints the files written.

use anyhow::{Context, Result};
use bengali_pdf2txt::{
    extract, inspect, ChunkPolicy, ExtractionConfig, ExtractionProgressCallback, PageSelection,
    ProgressCallback, DEFAULT_WORDS_PER_FILE,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
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

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live progress bar plus one log line per page.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Per-page wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Starts as a spinner; `on_extraction_start` switches to a bar once
    /// the page count is known.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Rasterising PDF at 300 DPI…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("OCR");
        self.bar.reset_eta();
    }

    fn elapsed_secs(&self, page_num: usize) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut m| m.remove(&page_num))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Running OCR on {total_pages} pages…"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        if let Ok(mut m) = self.start_times.lock() {
            m.insert(page_num, Instant::now());
        }
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, total: usize, chars: usize) {
        let elapsed = self.elapsed_secs(page_num);
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {:<8}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{chars:>5} chars")),
            dim(&format!("{elapsed:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        let elapsed = self.elapsed_secs(page_num);
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Keep long tesseract stderr dumps on one line.
        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}  {}",
            red("✗"),
            page_num,
            total,
            red(&msg),
            dim(&format!("{elapsed:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, total_pages: usize, success_count: usize) {
        let failed = total_pages.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} pages recognised",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages recognised  ({} failed)",
                if failed == total_pages {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_pages,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # 1000-word files: puthi_1.txt, puthi_2.txt, …
  pdf2txt puthi.pdf

  # 500 words per file, written to ./out
  pdf2txt --words-per-file 500 --output-dir out puthi.pdf

  # One file, keep Latin text, digits and punctuation too
  pdf2txt --whole-document --no-script-filter puthi.pdf

  # Pages 3 to 10 only, four OCR processes at once
  pdf2txt --pages 3-10 --concurrency 4 puthi.pdf

  # Inspect PDF metadata (no OCR)
  pdf2txt --inspect-only puthi.pdf

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Directory containing libpdfium (else the system library)
  TESSERACT_PATH    tesseract executable (default: tesseract on PATH)
  TESSDATA_PREFIX   Directory with ben.traineddata, passed to tesseract only
  RUST_LOG          Override the log filter (e.g. RUST_LOG=bengali_pdf2txt=debug)

SETUP:
  1. Install tesseract with Bengali data:  apt install tesseract-ocr tesseract-ocr-ben
  2. Get pdfium:  https://github.com/bblanchon/pdfium-binaries/releases
  3. Extract:     PDFIUM_LIB_PATH=/opt/pdfium/lib pdf2txt scan.pdf
"#;

/// Extract Bengali-script text from scanned PDFs with Tesseract OCR.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2txt",
    version,
    about = "Extract Bengali-script text from scanned PDFs with Tesseract OCR",
    long_about = "Rasterise every page of a scanned PDF at 300 DPI, OCR it with tesseract, \
normalise the text and write it to one or more UTF-8 .txt files named after the PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Tesseract language code.
    #[arg(short, long, env = "PDF2TXT_LANGUAGE", default_value = "ben")]
    language: String,

    /// Words per output file.
    #[arg(short, long, env = "PDF2TXT_WORDS_PER_FILE", default_value_t = DEFAULT_WORDS_PER_FILE as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    words_per_file: u64,

    /// Write all text to a single <name>.txt instead of word-count chunks.
    #[arg(long, env = "PDF2TXT_WHOLE_DOCUMENT")]
    whole_document: bool,

    /// Keep every character, not only the Bengali block U+0980–U+09FF.
    #[arg(long, env = "PDF2TXT_NO_SCRIPT_FILTER")]
    no_script_filter: bool,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDF2TXT_PAGES", default_value = "all")]
    pages: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2TXT_PASSWORD")]
    password: Option<String>,

    /// Directory to write the .txt files into (must exist). Default: current directory.
    #[arg(short, long, env = "PDF2TXT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Number of pages OCR'd at the same time.
    #[arg(short, long, env = "PDF2TXT_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,

    /// Directory containing the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib_dir: Option<PathBuf>,

    /// tesseract executable.
    #[arg(long, env = "TESSERACT_PATH", default_value = "tesseract")]
    tesseract: String,

    /// Directory with tesseract .traineddata files.
    #[arg(long, env = "TESSDATA_PREFIX")]
    tessdata_dir: Option<PathBuf>,

    /// Output structured JSON (ExtractionOutput) instead of the file list.
    #[arg(long, env = "PDF2TXT_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2TXT_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF metadata only, no OCR.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2TXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2TXT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already reports every page, so library INFO logs
    // are hidden while it is active.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
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

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input, &config)
            .await
            .context("Failed to inspect PDF")?;

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
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Run extraction ───────────────────────────────────────────────────
    let output = extract(&cli.input, &config)
        .await
        .with_context(|| format!("Extraction of '{}' failed", cli.input.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    for file in &output.files {
        println!("{}", file.display());
    }

    if !cli.quiet {
        let stats = &output.stats;
        let attempted = stats.processed_pages + stats.failed_pages;
        if !show_progress {
            eprintln!(
                "Recognised {}/{} pages in {}ms",
                stats.processed_pages, attempted, stats.total_duration_ms
            );
            if stats.failed_pages > 0 {
                eprintln!("  {} pages failed", stats.failed_pages);
            }
        }
        eprintln!(
            "{}  {} words  →  {} files  {}",
            if stats.failed_pages == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            bold(&stats.word_count.to_string()),
            bold(&stats.file_count.to_string()),
            dim(&format!("{}ms", stats.total_duration_ms)),
        );
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let chunk_policy = if cli.whole_document {
        ChunkPolicy::WholeDocument
    } else {
        ChunkPolicy::WordCount(cli.words_per_file as usize)
    };

    let mut builder = ExtractionConfig::builder()
        .language(&cli.language)
        .chunk_policy(chunk_policy)
        .script_filter(!cli.no_script_filter)
        .pages(parse_pages(&cli.pages)?)
        .concurrency(cli.concurrency)
        .tesseract_path(&cli.tesseract);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(ref dir) = cli.pdfium_lib_dir {
        builder = builder.pdfium_lib_dir(dir);
    }
    if let Some(ref dir) = cli.tessdata_dir {
        builder = builder.tessdata_dir(dir);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--pages` string into `PageSelection`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let s = s.trim().to_lowercase();

    if s == "all" {
        return Ok(PageSelection::All);
    }

    // Range: "3-15"
    if let Some((start, end)) = s.split_once('-') {
        let start: usize = start
            .trim()
            .parse()
            .context("Invalid start page in range")?;
        let end: usize = end.trim().parse().context("Invalid end page in range")?;

        if start < 1 {
            anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", start);
        }
        if start > end {
            anyhow::bail!(
                "Invalid page range '{}-{}': start must be <= end",
                start,
                end
            );
        }

        return Ok(PageSelection::Range(start, end));
    }

    // Set: "1,3,5,7"
    if s.contains(',') {
        let pages: Vec<usize> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid page number: '{}'", p.trim()))
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(&p) = pages.iter().find(|&&p| p < 1) {
            anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", p);
        }

        return Ok(PageSelection::Set(pages));
    }

    // Single page: "5"
    let page: usize = s.parse().context("Invalid page number")?;
    if page < 1 {
        anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", page);
    }

    Ok(PageSelection::Single(page))
}
