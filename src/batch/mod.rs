//! Batch sources: where URLs come from.
//!
//! A [`BatchSource`] pushes URL batches into a bounded [`BatchQueue`]. Each
//! submit waits while the queue is full, so a source can stream an
//! arbitrarily long list with bounded memory.
//!
//! - [`file`] - [`LineFileSource`], one URL per line of a text file
//! - [`memory`] - [`MemorySource`], an in-memory list

pub mod file;
pub mod memory;

pub use file::LineFileSource;
pub use memory::MemorySource;

use crate::error::{Error, Result};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A batch of URLs, owned by whoever holds it.
pub type Batch = Vec<String>;

/// Produces URL batches.
#[async_trait]
pub trait BatchSource: Send + Sync {
    /// Submits every batch to `queue`, in order.
    ///
    /// Returning an error aborts the whole run.
    async fn load(&self, queue: &BatchQueue) -> Result<()>;
}

/// Producer side of the bounded batch queue.
#[derive(Debug, Clone)]
pub struct BatchQueue {
    sender: mpsc::Sender<Batch>,
}

impl BatchQueue {
    /// Creates a queue holding at most `capacity` pending batches.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<Batch>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Hands a batch to the workers, waiting for room in the queue.
    ///
    /// Empty batches are dropped.
    pub async fn submit(&self, batch: Batch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        self.sender.send(batch).await.map_err(|_| Error::QueueClosed)
    }
}
