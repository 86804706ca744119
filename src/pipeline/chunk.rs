//! Output chunking: split normalised text into files and write them.
//!
//! Planning is pure ([`plan_chunks`]); writing ([`write_chunks`]) creates or
//! overwrites each file in order. The destination directory is never created
//! and existing files are overwritten without checking.

use crate::config::ChunkPolicy;
use crate::error::ExtractError;
use crate::pipeline::normalize::words;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One file's worth of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub file_name: String,
    pub text: String,
}

/// File name for the `k`-th (1-based) word-count chunk.
pub fn chunk_file_name(base_name: &str, k: usize) -> String {
    format!("{base_name}_{k}.txt")
}

/// File name for the whole-document output.
pub fn whole_file_name(base_name: &str) -> String {
    format!("{base_name}.txt")
}

/// Split `text` according to `policy`.
///
/// `WordCount(n)` yields groups of at most `n` words joined by single
/// spaces, and nothing at all for text without words. `WholeDocument`
/// always yields exactly one chunk holding `text` unchanged.
pub fn plan_chunks(base_name: &str, text: &str, policy: ChunkPolicy) -> Vec<OutputChunk> {
    match policy {
        ChunkPolicy::WholeDocument => vec![OutputChunk {
            file_name: whole_file_name(base_name),
            text: text.to_string(),
        }],
        ChunkPolicy::WordCount(n) => words(text)
            .chunks(n.max(1))
            .enumerate()
            .map(|(i, group)| OutputChunk {
                file_name: chunk_file_name(base_name, i + 1),
                text: group.join(" "),
            })
            .collect(),
    }
}

/// Write chunks as UTF-8 files into `dir` (or the working directory when
/// `None`), returning the written paths in creation order.
pub async fn write_chunks(
    dir: Option<&Path>,
    chunks: &[OutputChunk],
) -> Result<Vec<PathBuf>, ExtractError> {
    let mut written = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let path = match dir {
            Some(d) => d.join(&chunk.file_name),
            None => PathBuf::from(&chunk.file_name),
        };
        tokio::fs::write(&path, chunk.text.as_bytes())
            .await
            .map_err(|source| ExtractError::OutputWriteFailed {
                path: path.clone(),
                source,
            })?;
        debug!("Wrote {} bytes to {}", chunk.text.len(), path.display());
        info!("Created file: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_counts(chunks: &[OutputChunk]) -> Vec<usize> {
        chunks.iter().map(|c| words(&c.text).len()).collect()
    }

    #[test]
    fn example_splits_three_words_into_two_files() {
        let chunks = plan_chunks("doc", "আমি ভালো আছি", ChunkPolicy::WordCount(2));
        assert_eq!(
            chunks,
            vec![
                OutputChunk {
                    file_name: "doc_1.txt".into(),
                    text: "আমি ভালো".into()
                },
                OutputChunk {
                    file_name: "doc_2.txt".into(),
                    text: "আছি".into()
                },
            ]
        );
    }

    #[test]
    fn chunks_rejoin_to_original_word_sequence() {
        let text = (1..=23).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let chunks = plan_chunks("b", &text, ChunkPolicy::WordCount(5));
        let rejoined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(words(&rejoined), words(&text));
        assert_eq!(word_counts(&chunks), vec![5, 5, 5, 5, 3]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let chunks = plan_chunks("b", "a b c d", ChunkPolicy::WordCount(2));
        assert_eq!(word_counts(&chunks), vec![2, 2]);
    }

    #[test]
    fn double_spaces_do_not_create_empty_words() {
        let chunks = plan_chunks("b", "আমি  ভালো", ChunkPolicy::WordCount(1000));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "আমি ভালো");
    }

    #[test]
    fn empty_text_gives_no_word_chunks() {
        assert!(plan_chunks("b", "", ChunkPolicy::WordCount(10)).is_empty());
        assert!(plan_chunks("b", "   ", ChunkPolicy::WordCount(10)).is_empty());
    }

    #[test]
    fn whole_document_is_one_chunk_even_when_empty() {
        let chunks = plan_chunks("scan", "", ChunkPolicy::WholeDocument);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].file_name, "scan.txt");
        assert_eq!(chunks[0].text, "");

        let chunks = plan_chunks("scan", "আমি  ভালো", ChunkPolicy::WholeDocument);
        assert_eq!(chunks[0].text, "আমি  ভালো");
    }

    #[tokio::test]
    async fn write_chunks_creates_utf8_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let chunks = plan_chunks("doc", "আমি ভালো আছি", ChunkPolicy::WordCount(2));
        let paths = write_chunks(Some(dir.path()), &chunks).await.unwrap();

        assert_eq!(
            paths,
            vec![dir.path().join("doc_1.txt"), dir.path().join("doc_2.txt")]
        );
        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "আমি ভালো");
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "আছি");
    }

    #[tokio::test]
    async fn write_chunks_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc.txt"), "stale contents").unwrap();
        let chunks = plan_chunks("doc", "নতুন", ChunkPolicy::WholeDocument);
        write_chunks(Some(dir.path()), &chunks).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("doc.txt")).unwrap(),
            "নতুন"
        );
    }

    #[tokio::test]
    async fn missing_directory_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let chunks = plan_chunks("doc", "x", ChunkPolicy::WholeDocument);
        let err = write_chunks(Some(&missing), &chunks).await.unwrap_err();
        assert!(matches!(err, ExtractError::OutputWriteFailed { .. }));
        assert!(!missing.exists());
    }
}
