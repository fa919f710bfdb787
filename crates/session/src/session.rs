//! The single-active-cell edit session.
//!
//! One explicit state machine replaces the scattered is-editing flags a UI
//! would otherwise juggle. The legal transitions:
//!
//! | From       | Trigger            | To         |
//! |------------|--------------------|------------|
//! | Idle       | selection change   | Idle       |
//! | Idle       | keystroke          | Editing    |
//! | Editing    | keystroke          | Editing    |
//! | Editing    | Enter / blur       | Committing |
//! | Editing    | Escape             | Idle       |
//! | Committing | commit resolves    | Idle       |
//!
//! Escape is purely local: it restores the baseline without any network
//! traffic. A commit always resolves back to `Idle`, success or not, so the
//! UI can never observe a stuck `Committing`.

/// Lifecycle phase of the active cell's edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    #[default]
    Idle,
    Editing,
    Committing,
}

/// Draft and baseline captured when a commit starts.
#[derive(Debug, Clone)]
pub struct PendingCommit {
    pub draft: String,
    pub baseline: String,
}

/// Ephemeral edit state scoped to exactly one active cell.
#[derive(Debug, Default)]
pub struct EditSession {
    draft: String,
    baseline: String,
    phase: EditPhase,
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// What the edit box currently shows.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// What was displayed before editing began.
    #[must_use]
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.baseline
    }

    /// Selection changed: adopt the new cell's display text as baseline.
    pub fn reset(&mut self, baseline: impl Into<String>) {
        self.baseline = baseline.into();
        self.draft = self.baseline.clone();
        self.phase = EditPhase::Idle;
    }

    /// A keystroke changed the draft. Ignored while a commit is in flight.
    pub fn input(&mut self, text: impl Into<String>) {
        if self.phase == EditPhase::Committing {
            return;
        }
        self.draft = text.into();
        self.phase = EditPhase::Editing;
    }

    /// Escape: restore the baseline. Local only, never touches the network.
    pub fn cancel(&mut self) {
        if self.phase == EditPhase::Editing {
            self.draft = self.baseline.clone();
            self.phase = EditPhase::Idle;
        }
    }

    /// Enter or blur: move to `Committing` and hand back the draft/baseline
    /// pair to run the commit with. Returns `None` when there is nothing to
    /// commit (not in `Editing`).
    pub fn begin_commit(&mut self) -> Option<PendingCommit> {
        if self.phase != EditPhase::Editing {
            return None;
        }
        self.phase = EditPhase::Committing;
        Some(PendingCommit {
            draft: self.draft.clone(),
            baseline: self.baseline.clone(),
        })
    }

    /// The commit resolved (success or failure): back to `Idle` with the
    /// post-commit cache content as the new baseline.
    pub fn finish_commit(&mut self, new_baseline: impl Into<String>) {
        self.baseline = new_baseline.into();
        self.draft = self.baseline.clone();
        self.phase = EditPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_and_empty() {
        let session = EditSession::new();
        assert_eq!(session.phase(), EditPhase::Idle);
        assert_eq!(session.draft(), "");
    }

    #[test]
    fn test_keystroke_enters_editing() {
        let mut session = EditSession::new();
        session.reset("5");
        assert_eq!(session.phase(), EditPhase::Idle);

        session.input("52");
        assert_eq!(session.phase(), EditPhase::Editing);
        assert_eq!(session.draft(), "52");
        assert_eq!(session.baseline(), "5");
        assert!(session.is_dirty());
    }

    #[test]
    fn test_cancel_restores_baseline() {
        let mut session = EditSession::new();
        session.reset("10");
        session.input("99");

        session.cancel();
        assert_eq!(session.phase(), EditPhase::Idle);
        assert_eq!(session.draft(), "10");
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_cancel_is_a_noop_when_idle() {
        let mut session = EditSession::new();
        session.reset("7");
        session.cancel();
        assert_eq!(session.draft(), "7");
        assert_eq!(session.phase(), EditPhase::Idle);
    }

    #[test]
    fn test_begin_commit_only_from_editing() {
        let mut session = EditSession::new();
        session.reset("1");
        assert!(session.begin_commit().is_none());

        session.input("2");
        let pending = session.begin_commit().unwrap();
        assert_eq!(pending.draft, "2");
        assert_eq!(pending.baseline, "1");
        assert_eq!(session.phase(), EditPhase::Committing);

        // No double commit from Committing
        assert!(session.begin_commit().is_none());
    }

    #[test]
    fn test_input_ignored_while_committing() {
        let mut session = EditSession::new();
        session.reset("1");
        session.input("2");
        session.begin_commit().unwrap();

        session.input("3");
        assert_eq!(session.draft(), "2");
        assert_eq!(session.phase(), EditPhase::Committing);
    }

    #[test]
    fn test_finish_commit_returns_to_idle() {
        let mut session = EditSession::new();
        session.reset("1");
        session.input("=A1");
        session.begin_commit().unwrap();

        session.finish_commit("=A1");
        assert_eq!(session.phase(), EditPhase::Idle);
        assert_eq!(session.baseline(), "=A1");
        assert_eq!(session.draft(), "=A1");
    }

    #[test]
    fn test_reset_replaces_any_state() {
        let mut session = EditSession::new();
        session.reset("old");
        session.input("typing");

        session.reset("new");
        assert_eq!(session.phase(), EditPhase::Idle);
        assert_eq!(session.draft(), "new");
        assert_eq!(session.baseline(), "new");
    }
}
