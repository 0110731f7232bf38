//! Orchestrator module for the search reindexer.
//!
//! Coordinates the document store, processor, loader and waiter for one full
//! reindex run.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use crate::loader::BatchUploader;
use crate::processor::RecordProcessor;
use crate::waiter::CompletionWaiter;
use search_reindexer_repository::{DocumentStore, IndexSettings, SearchIndexProvider};

/// A non-fatal problem noticed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// Index settings could not be applied; the existing settings stay in effect.
    Configuration(String),
    /// The index reports a different document count than was uploaded.
    VerificationMismatch { expected: u64, reported: u64 },
    /// The document count could not be read back.
    VerificationUnavailable(String),
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::Configuration(msg) => {
                write!(f, "index settings not applied: {}", msg)
            }
            PipelineWarning::VerificationMismatch { expected, reported } => write!(
                f,
                "index reports {} documents, expected {}",
                reported, expected
            ),
            PipelineWarning::VerificationUnavailable(msg) => {
                write!(f, "document count unavailable: {}", msg)
            }
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexSummary {
    /// Records read from the document store.
    pub fetched: usize,
    /// Documents submitted in the batch.
    pub uploaded: usize,
    pub task_uid: u64,
    /// Document count reported by the index after the run, if it could be read.
    pub indexed_count: Option<u64>,
    /// Number of mapping issues across all records.
    pub mapping_issues: usize,
    pub warnings: Vec<PipelineWarning>,
}

/// Orchestrator that runs the reindex pipeline end to end.
///
/// Steps run strictly in sequence. Nothing is written to the index before
/// the source records have been read and found non-empty.
pub struct Orchestrator {
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn SearchIndexProvider>,
    processor: RecordProcessor,
    uploader: BatchUploader,
    waiter: CompletionWaiter,
    settings: IndexSettings,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn SearchIndexProvider>,
        processor: RecordProcessor,
        uploader: BatchUploader,
        waiter: CompletionWaiter,
        settings: IndexSettings,
    ) -> Self {
        Self {
            store,
            provider,
            processor,
            uploader,
            waiter,
            settings,
        }
    }

    /// Run one full reindex.
    ///
    /// Configuration and verification problems are returned as warnings in
    /// the summary. Everything else stops the run with a [`PipelineError`].
    #[instrument(skip(self), fields(index = %self.settings.index_name))]
    pub async fn run(&self) -> Result<ReindexSummary, PipelineError> {
        info!("Fetching source records");
        let records = self.store.fetch_all().await.map_err(|e| {
            error!(error = %e, "Failed to read source records");
            PipelineError::from(e)
        })?;

        if records.is_empty() {
            error!("Document store returned no records, nothing to index");
            return Err(PipelineError::EmptySource);
        }
        let fetched = records.len();
        info!(count = fetched, "Fetched source records");

        let batch = self.processor.process_batch(records);
        for document in &batch.documents {
            debug!(
                slug = %document.slug,
                access_level = document.access_level,
                "Prepared document"
            );
        }
        if !batch.issues.is_empty() {
            warn!(
                issue_count = batch.issues.len(),
                "Some records were mapped with defaults"
            );
        }

        let mut warnings = Vec::new();
        self.apply_settings(&mut warnings).await;

        let task = self.uploader.upload(&batch.documents).await?;

        info!(task_uid = task.uid, "Waiting for indexing task");
        let terminal = self.waiter.wait_for(task).await.map_err(|e| {
            error!(task_uid = task.uid, error = %e, "Indexing task did not succeed");
            PipelineError::from(e)
        })?;
        info!(
            task_uid = task.uid,
            polls = terminal.polls,
            elapsed = ?terminal.elapsed,
            "Indexing task succeeded"
        );

        let expected = batch.documents.len() as u64;
        let indexed_count = self.verify(expected, &mut warnings).await;

        let summary = ReindexSummary {
            fetched,
            uploaded: batch.documents.len(),
            task_uid: task.uid,
            indexed_count,
            mapping_issues: batch.issues.len(),
            warnings,
        };
        info!(
            fetched = summary.fetched,
            uploaded = summary.uploaded,
            indexed = ?summary.indexed_count,
            warnings = summary.warnings.len(),
            "Reindex complete"
        );
        Ok(summary)
    }

    async fn apply_settings(&self, warnings: &mut Vec<PipelineWarning>) {
        match self.provider.configure_index(&self.settings).await {
            Ok(tasks) => {
                info!(settings_tasks = tasks.len(), "Index settings applied");
            }
            Err(e) => {
                warn!(error = %e, "Failed to apply index settings, continuing with existing settings");
                warnings.push(PipelineWarning::Configuration(e.to_string()));
            }
        }
    }

    /// Read back the document count. Index statistics may lag, so a mismatch
    /// is only a warning.
    async fn verify(&self, expected: u64, warnings: &mut Vec<PipelineWarning>) -> Option<u64> {
        match self.provider.document_count().await {
            Ok(reported) => {
                if reported == expected {
                    info!(count = reported, "Index document count verified");
                } else {
                    warn!(expected, reported, "Index document count differs from upload");
                    warnings.push(PipelineWarning::VerificationMismatch { expected, reported });
                }
                Some(reported)
            }
            Err(e) => {
                warn!(error = %e, "Failed to read index document count");
                warnings.push(PipelineWarning::VerificationUnavailable(e.to_string()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            PipelineWarning::VerificationMismatch {
                expected: 3,
                reported: 2
            }
            .to_string(),
            "index reports 2 documents, expected 3"
        );
        assert_eq!(
            PipelineWarning::Configuration("timeout".to_string()).to_string(),
            "index settings not applied: timeout"
        );
    }
}
