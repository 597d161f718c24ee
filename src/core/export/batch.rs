//! Paginated batch fetching
//!
//! Splits an id list into contiguous slices, fetches each slice in turn and
//! concatenates the results in request order.

use super::summary::ExportErrorType;
use crate::config::FailurePolicy;
use crate::domain::Result;
use std::future::Future;

/// Page size for `cardsInfo` requests
pub const CARDS_INFO_BATCH_SIZE: usize = 500;

/// A slice whose request failed under [`FailurePolicy::Continue`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the slice among all requests
    pub index: usize,
    /// Offset of the first id of the slice
    pub offset: usize,
    /// Number of ids in the slice
    pub len: usize,
    pub error_type: ExportErrorType,
    pub error: String,
}

/// Merged result of a batched fetch
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub items: Vec<T>,
    /// Number of requests issued
    pub requests: usize,
    pub failures: Vec<BatchFailure>,
}

impl<T> BatchOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sequential batch fetcher
#[derive(Debug, Clone, Copy)]
pub struct BatchFetcher {
    batch_size: usize,
    policy: FailurePolicy,
}

impl BatchFetcher {
    /// Create a fetcher; a zero batch size is treated as one
    pub fn new(batch_size: usize, policy: FailurePolicy) -> Self {
        Self {
            batch_size: batch_size.max(1),
            policy,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fetch every slice of `ids`, one request at a time
    ///
    /// Ids are never reordered. The number of requests is
    /// `ceil(ids.len() / batch_size)`.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`] the first failing request ends the fetch
    /// with its error. Under [`FailurePolicy::Continue`] failures are
    /// collected in [`BatchOutcome::failures`] and this never fails.
    pub async fn fetch<'a, I, T, F, Fut>(
        &self,
        ids: &'a [I],
        mut fetch_page: F,
    ) -> Result<BatchOutcome<T>>
    where
        F: FnMut(&'a [I]) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut outcome = BatchOutcome {
            items: Vec::with_capacity(ids.len()),
            requests: 0,
            failures: Vec::new(),
        };

        let total = ids.len().div_ceil(self.batch_size);

        for (index, chunk) in ids.chunks(self.batch_size).enumerate() {
            let offset = index * self.batch_size;
            outcome.requests += 1;

            crate::log_batch_progress!(index + 1, total, chunk.len());

            match fetch_page(chunk).await {
                Ok(items) => outcome.items.extend(items),
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        tracing::warn!(
                            batch = index,
                            offset,
                            len = chunk.len(),
                            error = %e,
                            "Batch failed, continuing"
                        );
                        outcome.failures.push(BatchFailure {
                            index,
                            offset,
                            len: chunk.len(),
                            error_type: ExportErrorType::from(&e),
                            error: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }
}
