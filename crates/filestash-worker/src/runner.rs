//! Worker runner: drains the job queue until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc, watch};

use filestash_core::config::WorkerConfig;

use crate::jobs::{JobExecutionError, ThumbnailJobHandler};
use crate::queue::ThumbnailJob;

/// How long shutdown waits for in-flight jobs.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Consumes queued jobs and runs them with bounded concurrency.
#[derive(Debug)]
pub struct WorkerRunner {
    receiver: mpsc::Receiver<ThumbnailJob>,
    handler: Arc<ThumbnailJobHandler>,
    concurrency: usize,
}

impl WorkerRunner {
    pub fn new(
        receiver: mpsc::Receiver<ThumbnailJob>,
        handler: Arc<ThumbnailJobHandler>,
        config: &WorkerConfig,
    ) -> Self {
        Self {
            receiver,
            handler,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Run until the cancel signal flips to `true` or every producer is gone.
    pub async fn run(mut self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(concurrency = self.concurrency, "Worker started");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        loop {
            let permit = tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Worker received shutdown signal");
                        break;
                    }
                    continue;
                }
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let job = tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Worker received shutdown signal");
                        break;
                    }
                    continue;
                }
                job = self.receiver.recv() => match job {
                    Some(job) => job,
                    None => {
                        tracing::info!("Job queue closed");
                        break;
                    }
                },
            };

            let handler = Arc::clone(&self.handler);
            tokio::spawn(async move {
                let _permit = permit;
                tracing::debug!(file_id = %job.file_id, "Processing thumbnail job");

                match handler.execute(&job).await {
                    Ok(_) => {}
                    Err(JobExecutionError::Permanent(msg)) => {
                        tracing::warn!(file_id = %job.file_id, "Thumbnail job dropped: {msg}");
                    }
                    Err(JobExecutionError::Internal(err)) => {
                        tracing::error!(file_id = %job.file_id, error = %err, "Thumbnail job failed");
                    }
                }
            });
        }

        tracing::info!("Worker waiting for in-flight jobs to complete");
        let permits = u32::try_from(self.concurrency).unwrap_or(u32::MAX);
        let _ = tokio::time::timeout(DRAIN_TIMEOUT, semaphore.acquire_many(permits)).await;
        tracing::info!("Worker shut down complete");
    }
}
