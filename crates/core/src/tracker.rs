/// Tracks which single cell is currently selected in a workbook view.
///
/// At most one address is active at a time; a sheet switch clears it.
#[derive(Debug, Default)]
pub struct ActiveCellTracker {
    active: Option<String>,
}

impl ActiveCellTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `address` the active cell.
    pub fn select(&mut self, address: impl Into<String>) {
        self.active = Some(address.into());
    }

    /// No cell selected.
    pub fn clear(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_clear() {
        let mut tracker = ActiveCellTracker::new();
        assert!(tracker.active().is_none());

        tracker.select("B2");
        assert_eq!(tracker.active(), Some("B2"));

        tracker.select("C3");
        assert_eq!(tracker.active(), Some("C3"));

        tracker.clear();
        assert!(tracker.active().is_none());
    }
}
