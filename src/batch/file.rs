//! Line-delimited URL list on disk.

use super::{Batch, BatchQueue, BatchSource};
use crate::error::{Error, Result};

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Reads one URL per line, in batches of at most `batch_size`.
///
/// Blank lines are skipped and surrounding whitespace is trimmed. A trailing
/// partial batch is submitted as well. Lines are decoded lossily: bytes that
/// are not UTF-8 become U+FFFD and the line is still handed on as a URL.
#[derive(Debug, Clone)]
pub struct LineFileSource {
    path: PathBuf,
    batch_size: usize,
}

impl LineFileSource {
    /// A `batch_size` of zero is treated as one.
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            path: path.into(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn load_error(&self, source: std::io::Error) -> Error {
        Error::Load {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl BatchSource for LineFileSource {
    async fn load(&self, queue: &BatchQueue) -> Result<()> {
        let file = File::open(&self.path)
            .await
            .map_err(|e| self.load_error(e))?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        let mut batch: Batch = Vec::with_capacity(self.batch_size);

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(|e| self.load_error(e))?;
            if read == 0 {
                break;
            }

            let decoded = String::from_utf8_lossy(&line);
            let url = decoded.trim();
            if url.is_empty() {
                continue;
            }

            batch.push(url.to_owned());
            if batch.len() == self.batch_size {
                // The queue takes ownership; start a fresh buffer.
                let full = std::mem::replace(&mut batch, Vec::with_capacity(self.batch_size));
                debug!("Submitting batch of {} urls", full.len());
                queue.submit(full).await?;
            }
        }

        if !batch.is_empty() {
            debug!("Submitting trailing batch of {} urls", batch.len());
            queue.submit(batch).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn list(contents: impl AsRef<[u8]>) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_ref()).unwrap();
        file
    }

    async fn collect(source: &LineFileSource) -> Result<Vec<Batch>> {
        let (queue, mut receiver) = BatchQueue::bounded(16);
        source.load(&queue).await?;
        drop(queue);

        let mut batches = Vec::new();
        while let Some(batch) = receiver.recv().await {
            batches.push(batch);
        }
        Ok(batches)
    }

    #[tokio::test]
    async fn test_batches_and_trailing_partial() {
        let file = list("u1\nu2\n\nu3\r\n  u4  \nu5\n");
        let source = LineFileSource::new(file.path(), 2);

        let batches = collect(&source).await.unwrap();

        assert_eq!(
            batches,
            vec![
                vec!["u1".to_string(), "u2".to_string()],
                vec!["u3".to_string(), "u4".to_string()],
                vec!["u5".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_empty_tail() {
        let file = list("u1\nu2\n");
        let batches = collect(&LineFileSource::new(file.path(), 2)).await.unwrap();
        assert_eq!(batches.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let file = list("\n\n");
        let batches = collect(&LineFileSource::new(file.path(), 5)).await.unwrap();
        assert!(batches.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_line_is_kept() {
        let file = list(b"u1\n\xff\xfe\nu3\n");
        let batches = collect(&LineFileSource::new(file.path(), 1)).await.unwrap();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], vec!["u1".to_string()]);
        assert_eq!(batches[1], vec!["\u{fffd}\u{fffd}".to_string()]);
        assert_eq!(batches[2], vec!["u3".to_string()]);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let file = list("u1\nu2");
        let batches = collect(&LineFileSource::new(file.path(), 5)).await.unwrap();
        assert_eq!(batches, vec![vec!["u1".to_string(), "u2".to_string()]]);
    }

    #[tokio::test]
    async fn test_missing_file_is_load_error() {
        let source = LineFileSource::new("/definitely/not/here/images.txt", 5);
        let err = collect(&source).await.unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_zero_batch_size() {
        assert_eq!(LineFileSource::new("images.txt", 0).batch_size(), 1);
    }
}
