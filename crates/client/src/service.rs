//! The remote sheet service boundary and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use gridsync_core::{SyncError, SyncResult};
use reqwest::Client;

use crate::wire::{GetSheetResponse, SetCellRequest, SetCellResponse, SheetSnapshot};

/// The backend operations the sync core consumes.
///
/// Formula evaluation lives behind this boundary: `set_cell` persists an
/// edit, `get_sheet` returns the recomputed sheet. The reference contract
/// keeps them as two round trips because the set-cell response carries no
/// recomputed state.
#[async_trait]
pub trait RemoteSheetService: Send + Sync {
    /// Persist one cell edit.
    async fn set_cell(&self, workbook_id: &str, request: &SetCellRequest) -> SyncResult<()>;

    /// Fetch the server-authoritative snapshot of one sheet.
    async fn get_sheet(&self, workbook_id: &str, sheet: &str) -> SyncResult<SheetSnapshot>;
}

/// Default per-request timeout applied to both round trips.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP implementation of [`RemoteSheetService`].
#[derive(Debug, Clone)]
pub struct HttpSheetService {
    client: Client,
    base_url: String,
}

impl HttpSheetService {
    /// Create a service client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> SyncResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a service client with a custom per-request timeout. A timed-out
    /// call surfaces as an ordinary persist/refresh failure.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> SyncResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| SyncError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RemoteSheetService for HttpSheetService {
    async fn set_cell(&self, workbook_id: &str, request: &SetCellRequest) -> SyncResult<()> {
        let url = format!("{}/api/workbooks/{}/cells", self.base_url, workbook_id);
        tracing::debug!(%url, sheet = %request.sheet, address = %request.address, "set-cell");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: SetCellResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        if !body.success {
            return Err(SyncError::Rejected(
                body.error.unwrap_or_else(|| "set-cell failed".to_string()),
            ));
        }

        Ok(())
    }

    async fn get_sheet(&self, workbook_id: &str, sheet: &str) -> SyncResult<SheetSnapshot> {
        let url = format!(
            "{}/api/workbooks/{}/sheets/{}",
            self.base_url, workbook_id, sheet
        );
        tracing::debug!(%url, %sheet, "get-sheet");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GetSheetResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        body.into_snapshot()
    }
}
