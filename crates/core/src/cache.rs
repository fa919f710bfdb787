use std::collections::HashMap;

use indexmap::IndexMap;

use crate::a1::parse_a1;
use crate::error::SyncResult;
use crate::record::CellRecord;

/// Per-sheet mapping from A1 address to cell record.
pub type SheetRecords = IndexMap<String, CellRecord>;

/// Client-side cache of cell contents for one workbook.
///
/// Not authoritative: the remote engine owns computed values. The cache is
/// invalidated coarsely, one whole sheet at a time, after each commit.
///
/// Single-writer discipline: only the commit protocol and sheet load mutate
/// the cache; reads are unrestricted.
#[derive(Debug, Default)]
pub struct SheetCache {
    sheets: IndexMap<String, SheetRecords>,
    /// Per-sheet refresh tickets. `issued` advances when a refresh request
    /// is sent; `applied` records the newest ticket whose snapshot landed.
    /// A snapshot is applied only if its ticket is newer than `applied`,
    /// so the later-issued request wins regardless of arrival order.
    issued: HashMap<String, u64>,
    applied: HashMap<String, u64>,
}

impl SheetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one cell. No side effects.
    #[must_use]
    pub fn get(&self, sheet: &str, address: &str) -> Option<&CellRecord> {
        self.sheets.get(sheet)?.get(address)
    }

    /// Overwrite a single entry; the optimistic-write path.
    ///
    /// Rejects addresses that are not valid A1 notation.
    pub fn put(&mut self, sheet: &str, address: &str, record: CellRecord) -> SyncResult<()> {
        parse_a1(address)?;
        self.sheets
            .entry(sheet.to_string())
            .or_default()
            .insert(address.to_string(), record);
        Ok(())
    }

    /// Initial population of a sheet, e.g. on workbook load.
    pub fn load_sheet(&mut self, sheet: &str, records: SheetRecords) {
        self.sheets.insert(sheet.to_string(), records);
    }

    /// Issue a refresh ticket for a sheet. Call at request time, before the
    /// get-sheet round trip starts.
    pub fn begin_refresh(&mut self, sheet: &str) -> u64 {
        let ticket = self.issued.entry(sheet.to_string()).or_insert(0);
        *ticket += 1;
        *ticket
    }

    /// Atomically swap a sheet's entire mapping with a refresh snapshot.
    ///
    /// This is a full replace, not a merge: entries written locally after
    /// the refresh request was issued are discarded. Returns `false` (and
    /// drops the snapshot) when a later-issued refresh already landed.
    pub fn complete_refresh(&mut self, sheet: &str, ticket: u64, records: SheetRecords) -> bool {
        let applied = self.applied.entry(sheet.to_string()).or_insert(0);
        if ticket <= *applied {
            return false;
        }
        *applied = ticket;
        self.sheets.insert(sheet.to_string(), records);
        true
    }

    /// Whether the cache holds any entry for this sheet.
    #[must_use]
    pub fn contains_sheet(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    /// All cached records for a sheet, for rendering.
    #[must_use]
    pub fn sheet(&self, sheet: &str) -> Option<&SheetRecords> {
        self.sheets.get(sheet)
    }

    /// Display projection for a cell: `=`-prefixed formula source, else the
    /// value, else empty string for an absent cell.
    #[must_use]
    pub fn display_text(&self, sheet: &str, address: &str) -> String {
        self.get(sheet, address)
            .map(CellRecord::display_text)
            .unwrap_or_default()
    }
}
