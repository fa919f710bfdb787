//! The facade the presentation layer drives: selection, keystrokes, and the
//! commit/cancel triggers, wired to the cache and the remote service.

use std::sync::Arc;

use gridsync_client::RemoteSheetService;
use gridsync_core::{a1, ActiveCellTracker, CellRecord, SheetCache, SyncResult};
use tokio::sync::RwLock;

use crate::commit::{CommitOutcome, CommitProtocol};
use crate::session::{EditPhase, EditSession};

/// One view onto one sheet of a workbook.
///
/// Owns the selection tracker and edit session; shares the cache with the
/// commit protocol. All methods take `&mut self`, matching the single
/// UI-thread model: event handlers run one at a time, suspending only at
/// the network calls inside a commit.
pub struct WorkbookView {
    sheet: String,
    protocol: CommitProtocol,
    cache: Arc<RwLock<SheetCache>>,
    tracker: ActiveCellTracker,
    session: EditSession,
}

impl WorkbookView {
    /// Open a workbook view on `sheet`, fetching its initial contents.
    pub async fn open(
        workbook_id: impl Into<String>,
        sheet: impl Into<String>,
        service: Arc<dyn RemoteSheetService>,
    ) -> SyncResult<Self> {
        let sheet = sheet.into();
        let cache = Arc::new(RwLock::new(SheetCache::new()));
        let protocol = CommitProtocol::new(workbook_id, service, Arc::clone(&cache));
        protocol.load_sheet(&sheet).await?;

        Ok(Self {
            sheet,
            protocol,
            cache,
            tracker: ActiveCellTracker::new(),
            session: EditSession::new(),
        })
    }

    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    /// The active cell's address, if any.
    #[must_use]
    pub fn active_cell(&self) -> Option<&str> {
        self.tracker.active()
    }

    #[must_use]
    pub fn phase(&self) -> EditPhase {
        self.session.phase()
    }

    /// Text the edit box should show for the active cell.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.session.draft()
    }

    /// Shared cache handle, for rendering the visible grid.
    #[must_use]
    pub fn cache(&self) -> Arc<RwLock<SheetCache>> {
        Arc::clone(&self.cache)
    }

    /// One cell of the current sheet, for rendering.
    pub async fn cell(&self, address: &str) -> Option<CellRecord> {
        self.cache.read().await.get(&self.sheet, address).cloned()
    }

    /// Make `address` the active cell.
    ///
    /// An in-progress edit on the previous cell is committed first (blur
    /// semantics); its outcome is returned so the caller can surface
    /// failures. The new cell's display text becomes the session baseline.
    pub async fn select(&mut self, address: &str) -> SyncResult<Option<CommitOutcome>> {
        a1::parse_a1(address)?;
        let finalized = self.finalize_editing().await?;

        self.tracker.select(address);
        let baseline = self.cache.read().await.display_text(&self.sheet, address);
        self.session.reset(baseline);
        Ok(finalized)
    }

    /// Deselect, e.g. after a sheet switch. Commits an in-progress edit
    /// first, then resets the session to an empty draft.
    pub async fn clear_selection(&mut self) -> SyncResult<Option<CommitOutcome>> {
        let finalized = self.finalize_editing().await?;
        self.tracker.clear();
        self.session.reset("");
        Ok(finalized)
    }

    /// Switch this view to another sheet, loading it if needed. Clears the
    /// selection; a pending edit on the old sheet is committed first.
    pub async fn switch_sheet(
        &mut self,
        sheet: impl Into<String>,
    ) -> SyncResult<Option<CommitOutcome>> {
        let finalized = self.clear_selection().await?;
        let sheet = sheet.into();
        if !self.cache.read().await.contains_sheet(&sheet) {
            self.protocol.load_sheet(&sheet).await?;
        }
        self.sheet = sheet;
        Ok(finalized)
    }

    /// A keystroke changed the draft text. Ignored with no selection.
    pub fn input(&mut self, text: impl Into<String>) {
        if self.tracker.active().is_some() {
            self.session.input(text);
        }
    }

    /// Enter pressed in the edit box. (The caller is expected to have
    /// suppressed the default newline/navigation behavior.)
    pub async fn press_enter(&mut self) -> SyncResult<CommitOutcome> {
        self.commit_active().await
    }

    /// The edit box lost focus.
    pub async fn blur(&mut self) -> SyncResult<CommitOutcome> {
        self.commit_active().await
    }

    /// Escape pressed: discard the draft and restore the baseline. Purely
    /// local; never touches the network.
    pub fn press_escape(&mut self) {
        self.session.cancel();
    }

    async fn finalize_editing(&mut self) -> SyncResult<Option<CommitOutcome>> {
        if self.session.phase() == EditPhase::Editing {
            return self.commit_active().await.map(Some);
        }
        Ok(None)
    }

    async fn commit_active(&mut self) -> SyncResult<CommitOutcome> {
        let Some(address) = self.tracker.active().map(str::to_string) else {
            return Ok(CommitOutcome::Unchanged);
        };
        let Some(pending) = self.session.begin_commit() else {
            return Ok(CommitOutcome::Unchanged);
        };

        let result = self
            .protocol
            .commit(&self.sheet, &address, &pending.draft, &pending.baseline)
            .await;

        // Success or failure, the session resolves to Idle with whatever
        // the cache now holds for the edited cell.
        let baseline = self.cache.read().await.display_text(&self.sheet, &address);
        self.session.finish_commit(baseline);
        result
    }
}
