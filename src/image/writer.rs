//! Persistence of fetched images.

use async_trait::async_trait;
use reqwest::Response;
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// A writable destination for image bytes.
pub type Sink = Box<dyn AsyncWrite + Send + Unpin>;

/// Creates destination files and copies response bodies into them.
#[async_trait]
pub trait FileWriter: Send + Sync {
    /// Creates (or truncates) the file at `path`.
    async fn create(&self, path: &Path) -> io::Result<Sink>;

    /// Streams the body of `source` into `destination`, returning the number
    /// of bytes written.
    async fn copy(&self, destination: &mut Sink, source: Response) -> io::Result<u64>;
}

/// Writes images to the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileWriter;

#[async_trait]
impl FileWriter for LocalFileWriter {
    async fn create(&self, path: &Path) -> io::Result<Sink> {
        if let Some(parent) = path.parent() {
            debug!("Creating destination directory {:?}", parent);
            fs::create_dir_all(parent).await?;
        }

        debug!("Creating destination file {:?}", path);
        let file = fs::File::create(path).await?;
        Ok(Box::new(file))
    }

    async fn copy(&self, destination: &mut Sink, mut source: Response) -> io::Result<u64> {
        let mut written: u64 = 0;

        while let Some(chunk) = source.chunk().await.map_err(io::Error::other)? {
            destination.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        destination.flush().await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_writer_creates_parents_and_copies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/image.png");
        let response = Response::from(http::Response::new(b"png-bytes".to_vec()));

        let writer = LocalFileWriter;
        let mut sink = writer.create(&path).await.unwrap();
        let written = writer.copy(&mut sink, response).await.unwrap();
        drop(sink);

        assert_eq!(written, 9);
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_local_writer_create_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocalFileWriter.create(dir.path()).await;
        assert!(result.is_err());
    }
}
