//! In-memory stand-in for the remote sheet service: records every call and
//! replays scripted results, with optional per-call delays for ordering
//! tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gridsync_client::{RemoteSheetService, SetCellRequest, SheetSnapshot};
use gridsync_core::{CellRecord, SheetRecords, SyncResult};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetCell {
        sheet: String,
        address: String,
        value: String,
        formula: Option<String>,
    },
    GetSheet {
        sheet: String,
    },
}

/// Scripted fake of [`RemoteSheetService`].
///
/// Unscripted calls succeed: `set_cell` returns `Ok(())` and `get_sheet`
/// returns the configured default snapshot. Scripted results are consumed
/// in call order, each optionally preceded by a delay.
#[derive(Default)]
pub struct ScriptedService {
    calls: Mutex<Vec<Call>>,
    snapshot: Mutex<SheetRecords>,
    set_cell_script: Mutex<VecDeque<(Duration, SyncResult<()>)>>,
    get_sheet_script: Mutex<VecDeque<(Duration, SyncResult<SheetSnapshot>)>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(entries: &[(&str, CellRecord)]) -> Self {
        let service = Self::new();
        service.set_snapshot(entries);
        service
    }

    /// Replace the default get-sheet snapshot.
    pub fn set_snapshot(&self, entries: &[(&str, CellRecord)]) {
        *self.snapshot.lock().unwrap() = records(entries);
    }

    pub fn push_set_cell(&self, delay: Duration, result: SyncResult<()>) {
        self.set_cell_script.lock().unwrap().push_back((delay, result));
    }

    pub fn push_get_sheet(&self, delay: Duration, result: SyncResult<SheetSnapshot>) {
        self.get_sheet_script.lock().unwrap().push_back((delay, result));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteSheetService for ScriptedService {
    async fn set_cell(&self, _workbook_id: &str, request: &SetCellRequest) -> SyncResult<()> {
        self.calls.lock().unwrap().push(Call::SetCell {
            sheet: request.sheet.clone(),
            address: request.address.clone(),
            value: request.value.clone(),
            formula: request.formula.clone(),
        });

        let scripted = self.set_cell_script.lock().unwrap().pop_front();
        match scripted {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(()),
        }
    }

    async fn get_sheet(&self, _workbook_id: &str, sheet: &str) -> SyncResult<SheetSnapshot> {
        self.calls.lock().unwrap().push(Call::GetSheet {
            sheet: sheet.to_string(),
        });

        let scripted = self.get_sheet_script.lock().unwrap().pop_front();
        match scripted {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(SheetSnapshot::new(self.snapshot.lock().unwrap().clone())),
        }
    }
}

/// Build a per-sheet record map from literal entries.
pub fn records(entries: &[(&str, CellRecord)]) -> SheetRecords {
    entries
        .iter()
        .map(|(address, record)| ((*address).to_string(), record.clone()))
        .collect()
}

/// Build a snapshot from literal entries.
pub fn snapshot(entries: &[(&str, CellRecord)]) -> SheetSnapshot {
    SheetSnapshot::new(records(entries))
}
