//! End-to-end tests against real pdfium and tesseract.
//!
//! These need a pdfium library, tesseract with Bengali data, and sample
//! scans in `./test_cases/`. They are gated behind the `E2E_ENABLED`
//! environment variable so they do not run in CI unless explicitly requested.
//!
//! Run with:
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=/opt/pdfium/lib cargo test --test e2e -- --nocapture

use bengali_pdf2txt::{extract, inspect, ChunkPolicy, ExtractionConfig, BENGALI_RANGE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test if E2E_ENABLED is not set *or* no PDF file at `path`.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP: set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP: test file not found: {}", p.display());
            return;
        }
        p
    }};
}

/// Route library logs to the test output; `RUST_LOG` overrides the level.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bengali_pdf2txt=info")),
        )
        .with_test_writer()
        .try_init();
}

fn base_config() -> bengali_pdf2txt::ExtractionConfigBuilder {
    init_tracing();
    let mut builder = ExtractionConfig::builder();
    if let Ok(dir) = std::env::var("PDFIUM_LIB_PATH") {
        builder = builder.pdfium_lib_dir(dir);
    }
    builder
}

#[tokio::test]
async fn test_inspect_bengali_scan() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("bengali_scan.pdf"));
    let config = base_config().build().expect("valid config");

    let meta = inspect(&path, &config).await.expect("inspect() should succeed");
    assert!(meta.page_count >= 1);
    println!("Metadata: {:?}", meta);
}

#[tokio::test]
async fn test_extract_bengali_scan_chunked() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("bengali_scan.pdf"));
    let out = tempfile::tempdir().unwrap();

    let config = base_config()
        .words_per_file(200)
        .output_dir(out.path())
        .build()
        .expect("valid config");

    let output = extract(&path, &config).await.expect("extraction should succeed");

    assert!(output.stats.processed_pages >= 1, "no page was recognised");
    assert!(!output.files.is_empty(), "expected at least one chunk file");
    for file in &output.files {
        let text = std::fs::read_to_string(file).unwrap();
        assert!(text.split_whitespace().count() <= 200);
        assert!(text
            .chars()
            .all(|c| c.is_whitespace() || BENGALI_RANGE.contains(c)));
    }
    println!(
        "[chunked] {} words in {} files, {}ms",
        output.stats.word_count, output.stats.file_count, output.stats.total_duration_ms
    );
}

#[tokio::test]
async fn test_extract_bengali_scan_whole_document() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("bengali_scan.pdf"));
    let out = tempfile::tempdir().unwrap();

    let config = base_config()
        .chunk_policy(ChunkPolicy::WholeDocument)
        .script_filter(false)
        .output_dir(out.path())
        .build()
        .expect("valid config");

    let output = extract(&path, &config).await.expect("extraction should succeed");

    assert_eq!(output.files, vec![out.path().join("bengali_scan.txt")]);
    assert_eq!(std::fs::read_to_string(&output.files[0]).unwrap(), output.text);
    println!("--- BEGIN OUTPUT ---\n{}\n--- END OUTPUT ---", output.text);
}
