use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::domain::CandidateRecord;
use super::selection::SelectionSet;
use super::store::{PortalStore, StoreError};

/// Persists the working selection by replacing the entire stored
/// deliberation list.
///
/// The replace-all sequence (read rows, delete them, insert the new set)
/// runs under an advisory lock scoped to the deliberation collection, so
/// submissions that share a synchronizer cannot interleave and lose writes.
/// The individual steps are still not atomic against the store: a failed
/// insert leaves the collection empty until the caller resubmits.
pub struct DelibsSynchronizer<S> {
    store: Arc<S>,
    write_lock: Mutex<()>,
}

impl<S> DelibsSynchronizer<S>
where
    S: PortalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the stored deliberation set with `selected`.
    ///
    /// There is no automatic retry; after an error the stored state may be
    /// partial (see [`SyncError`]) and the caller converges by resubmitting
    /// the same selection.
    pub async fn submit(&self, selected: &SelectionSet) -> Result<(), SyncError> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .store
            .delib_rows()
            .await
            .map_err(SyncError::ReadOrDeleteFailed)?;
        let row_ids: Vec<_> = existing.iter().map(|entry| entry.id).collect();

        self.store
            .delete_delib_rows(&row_ids)
            .await
            .map_err(SyncError::ReadOrDeleteFailed)?;

        let ids = selected.snapshot();
        if !ids.is_empty() {
            self.store
                .insert_delib_rows(&ids)
                .await
                .map_err(SyncError::InsertFailed)?;
        }

        info!(
            replaced = row_ids.len(),
            submitted = ids.len(),
            "deliberation set replaced"
        );
        Ok(())
    }

    /// The stored deliberation set joined back to candidate records. Empty on
    /// any read failure.
    pub async fn roster(&self) -> Vec<CandidateRecord> {
        let entries = match self.store.delib_rows().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "deliberation listing failed");
                return Vec::new();
            }
        };

        if entries.is_empty() {
            return Vec::new();
        }

        let ids: Vec<_> = entries.into_iter().map(|entry| entry.prospect_id).collect();
        match self.store.candidates_by_ids(&ids).await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "deliberation roster join failed");
                Vec::new()
            }
        }
    }
}

/// Submission failures that reach the caller. Read paths degrade silently,
/// but a swallowed write failure could hide a lost deliberation list, so
/// these propagate.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The stored set could not be read or cleared; nothing was inserted and
    /// the collection holds whatever the partial deletes left behind.
    #[error("failed to read or clear the stored deliberation set: {0}")]
    ReadOrDeleteFailed(#[source] StoreError),
    /// The old set was cleared but the new entries did not land; the
    /// collection may now be empty.
    #[error("cleared the deliberation set but failed to store the new entries: {0}")]
    InsertFailed(#[source] StoreError),
}
