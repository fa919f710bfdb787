//! Request and response shapes for the backend's set-cell / get-sheet API.
//!
//! The sync core depends only on these shapes, not on transport details.

use gridsync_core::{CellRecord, SheetRecords, StyleAttributes, SyncError, SyncResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Body of the set-cell call.
///
/// `formula` is present only for formula edits; `style` only when the edit
/// changes style (the commit protocol never does, so it stays `None` there).
#[derive(Debug, Clone, Serialize)]
pub struct SetCellRequest {
    pub sheet: String,
    pub address: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleAttributes>,
}

impl SetCellRequest {
    /// Build the persist request for a freshly classified record.
    #[must_use]
    pub fn from_record(sheet: &str, address: &str, record: &CellRecord) -> Self {
        Self {
            sheet: sheet.to_string(),
            address: address.to_string(),
            value: record.value.clone(),
            formula: record.is_formula().then(|| record.formula.clone()),
            style: None,
        }
    }
}

/// Body of the set-cell response.
#[derive(Debug, Deserialize)]
pub struct SetCellResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Top-level get-sheet response envelope.
#[derive(Debug, Deserialize)]
pub struct GetSheetResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<SheetData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SheetData {
    pub sheet: SheetBody,
}

#[derive(Debug, Deserialize)]
pub struct SheetBody {
    #[serde(default)]
    pub cells: IndexMap<String, CellPayload>,
}

/// One cell as the server serializes it. Absent fields default to empty.
#[derive(Debug, Default, Deserialize)]
pub struct CellPayload {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub style: StyleAttributes,
}

impl From<CellPayload> for CellRecord {
    fn from(payload: CellPayload) -> Self {
        CellRecord {
            value: payload.value,
            formula: payload.formula,
            style: payload.style,
        }
    }
}

/// Server-authoritative snapshot of one sheet's cells.
#[derive(Debug, Clone, Default)]
pub struct SheetSnapshot {
    pub cells: SheetRecords,
}

impl SheetSnapshot {
    #[must_use]
    pub fn new(cells: SheetRecords) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn into_records(self) -> SheetRecords {
        self.cells
    }
}

impl GetSheetResponse {
    /// Convert the envelope into a snapshot, mapping `success: false` (or a
    /// success body with no data) to a typed rejection.
    pub fn into_snapshot(self) -> SyncResult<SheetSnapshot> {
        if !self.success {
            return Err(SyncError::Rejected(
                self.error.unwrap_or_else(|| "get-sheet failed".to_string()),
            ));
        }
        let data = self
            .data
            .ok_or_else(|| SyncError::Decode("get-sheet response missing data".to_string()))?;
        let cells = data
            .sheet
            .cells
            .into_iter()
            .map(|(address, payload)| (address, payload.into()))
            .collect();
        Ok(SheetSnapshot::new(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_request_omits_formula() {
        let request = SetCellRequest::from_record("Sheet1", "A1", &CellRecord::literal("42"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["value"], "42");
        assert!(json.get("formula").is_none());
        assert!(json.get("style").is_none());
    }

    #[test]
    fn test_formula_request_carries_source() {
        let request = SetCellRequest::from_record("Sheet1", "C1", &CellRecord::formula("A1+B1"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["value"], "");
        assert_eq!(json["formula"], "A1+B1");
    }

    #[test]
    fn test_partial_cells_default_empty() {
        let response: GetSheetResponse = serde_json::from_str(
            r#"{"success":true,"data":{"sheet":{"cells":{"A1":{"value":"5"},"B1":{}}}}}"#,
        )
        .unwrap();
        let snapshot = response.into_snapshot().unwrap();

        assert_eq!(snapshot.cells["A1"].value, "5");
        assert_eq!(snapshot.cells["A1"].formula, "");
        assert_eq!(snapshot.cells["B1"], CellRecord::default());
    }

    #[test]
    fn test_unsuccessful_body_is_rejected() {
        let response: GetSheetResponse =
            serde_json::from_str(r#"{"success":false,"error":"no such sheet"}"#).unwrap();
        let err = response.into_snapshot().unwrap_err();
        assert!(matches!(err, SyncError::Rejected(message) if message == "no such sheet"));
    }
}
