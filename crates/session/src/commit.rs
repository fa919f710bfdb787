//! The commit pipeline: optimistic local write, remote persist, then a
//! server-authoritative full-sheet refresh.

use std::collections::HashSet;
use std::sync::Arc;

use gridsync_client::{RemoteSheetService, SetCellRequest};
use gridsync_core::{CellRecord, SheetCache, SyncError, SyncResult};
use tokio::sync::RwLock;

/// How one commit resolved. All failures are non-fatal values; the edit
/// session returns to idle regardless.
#[derive(Debug)]
pub enum CommitOutcome {
    /// Draft matched the baseline; nothing was sent or written.
    Unchanged,
    /// Persisted and reconciled with the server's recomputation.
    Committed,
    /// set-cell failed. The optimistic write is NOT rolled back, so the
    /// cache may diverge from the server until the next successful commit.
    PersistFailed(SyncError),
    /// set-cell succeeded but the follow-up get-sheet failed; the
    /// optimistic write stands uncorrected (formula cells show no computed
    /// value until a later refresh).
    RefreshFailed(SyncError),
}

impl CommitOutcome {
    /// Whether the edit reached the server.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Committed | Self::RefreshFailed(_))
    }
}

/// Orchestrates commits for one workbook.
///
/// Cache mutations happen only between await points and only through this
/// type (plus the initial sheet load), keeping the single-writer discipline.
/// Locks are never held across a network call.
#[derive(Clone)]
pub struct CommitProtocol {
    workbook_id: String,
    service: Arc<dyn RemoteSheetService>,
    cache: Arc<RwLock<SheetCache>>,
    in_flight: Arc<RwLock<HashSet<(String, String)>>>,
}

impl CommitProtocol {
    pub fn new(
        workbook_id: impl Into<String>,
        service: Arc<dyn RemoteSheetService>,
        cache: Arc<RwLock<SheetCache>>,
    ) -> Self {
        Self {
            workbook_id: workbook_id.into(),
            service,
            cache,
            in_flight: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    #[must_use]
    pub fn cache(&self) -> Arc<RwLock<SheetCache>> {
        Arc::clone(&self.cache)
    }

    /// Commit a draft for one cell.
    ///
    /// Steps: no-op check, classification, optimistic write, persist,
    /// ticketed full-sheet refresh. At most one commit per cell may be in
    /// flight; a second attempt is rejected with
    /// [`SyncError::CommitInFlight`] before any cache or network effect.
    pub async fn commit(
        &self,
        sheet: &str,
        address: &str,
        draft: &str,
        baseline: &str,
    ) -> SyncResult<CommitOutcome> {
        // Idempotence: identical draft means zero calls, zero mutations
        if draft == baseline {
            return Ok(CommitOutcome::Unchanged);
        }

        let key = (sheet.to_string(), address.to_string());
        {
            let mut in_flight = self.in_flight.write().await;
            if !in_flight.insert(key.clone()) {
                return Err(SyncError::CommitInFlight {
                    sheet: sheet.to_string(),
                    address: address.to_string(),
                });
            }
        }

        let result = self.run(sheet, address, draft).await;

        self.in_flight.write().await.remove(&key);
        result
    }

    async fn run(&self, sheet: &str, address: &str, draft: &str) -> SyncResult<CommitOutcome> {
        // Classification + optimistic write, preserving the cell's style
        let record = {
            let mut cache = self.cache.write().await;
            let style = cache
                .get(sheet, address)
                .map(|existing| existing.style.clone())
                .unwrap_or_default();
            let record = CellRecord::from_draft(draft, style);
            cache.put(sheet, address, record.clone())?;
            record
        };

        // Persist. No rollback on failure: the optimistic value stays and
        // the divergence is reported, not hidden.
        let request = SetCellRequest::from_record(sheet, address, &record);
        if let Err(err) = self.service.set_cell(&self.workbook_id, &request).await {
            tracing::warn!(%sheet, %address, error = %err, "persist failed; cache keeps optimistic value");
            return Ok(CommitOutcome::PersistFailed(err));
        }

        // Reconcile: the client cannot compute formula values itself, so ask
        // for the recomputed sheet and swap it in wholesale. The ticket is
        // issued at request time; a later-issued refresh wins.
        let ticket = self.cache.write().await.begin_refresh(sheet);
        match self.service.get_sheet(&self.workbook_id, sheet).await {
            Ok(snapshot) => {
                let mut cache = self.cache.write().await;
                if !cache.complete_refresh(sheet, ticket, snapshot.into_records()) {
                    tracing::debug!(%sheet, ticket, "dropping refresh superseded by a later request");
                }
                Ok(CommitOutcome::Committed)
            }
            Err(err) => {
                tracing::warn!(%sheet, %address, error = %err, "refresh failed; optimistic value stands");
                Ok(CommitOutcome::RefreshFailed(err))
            }
        }
    }

    /// Fetch and (re)load a sheet outside the commit path; the initial
    /// population used on workbook open. Goes through the same ticketing so
    /// it cannot clobber a newer refresh.
    pub async fn load_sheet(&self, sheet: &str) -> SyncResult<()> {
        let ticket = self.cache.write().await.begin_refresh(sheet);
        let snapshot = self.service.get_sheet(&self.workbook_id, sheet).await?;
        self.cache
            .write()
            .await
            .complete_refresh(sheet, ticket, snapshot.into_records());
        Ok(())
    }
}
