//! In-memory URL list.

use super::{BatchQueue, BatchSource};
use crate::error::Result;

use async_trait::async_trait;

/// Serves a fixed list of URLs in chunks of `batch_size`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    urls: Vec<String>,
    batch_size: usize,
}

impl MemorySource {
    /// A `batch_size` of zero is treated as one.
    pub fn new<I, S>(urls: I, batch_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[async_trait]
impl BatchSource for MemorySource {
    async fn load(&self, queue: &BatchQueue) -> Result<()> {
        for chunk in self.urls.chunks(self.batch_size) {
            queue.submit(chunk.to_vec()).await?;
        }
        Ok(())
    }
}
