//! # Application Store
//!
//! [`AppState`] is the single source of truth for the application. It is
//! constructed once at startup, rehydrated from durable storage over the seed
//! defaults, and handed by `&mut` reference to whatever drives it. Every
//! action is an ordinary method; the borrow checker provides the
//! single-writer discipline, so there is no locking.
//!
//! ## Persistence
//!
//! After any action that changes state, the persisted projection
//! ([`Snapshot`]) is written through the [`StateBackend`]. Writes are
//! best-effort: a failed write is logged and the in-memory state stays as
//! it is. No rollback.
//!
//! The practice session and the faculty board are rebuilt for each run and
//! are never persisted; the board is laid out from the seed questions.
//!
//! ## Not-found policy
//!
//! Actions that name a stale id (`update_textbook_status`,
//! `move_mcq_to_category`) are silent no-ops. They return what happened so
//! callers and tests can still assert on it.

use crate::error::Result;
use crate::faculty::{Bucket, FacultyBoard, MoveOutcome};
use crate::model::{
    Mcq, Settings, SettingsUpdate, SystemProgress, Textbook, TextbookStatus, UserStats,
};
use crate::practice::{PracticeSession, SelectOutcome};
use crate::seed;
use crate::store::{load_snapshot, save_snapshot, Snapshot, StateBackend};
use tracing::{debug, warn};

pub struct AppState<B: StateBackend> {
    backend: B,
    storage_key: String,
    textbooks: Vec<Textbook>,
    mcqs: Vec<Mcq>,
    system_progress: Vec<SystemProgress>,
    streak: u32,
    user_stats: UserStats,
    settings: Settings,
    practice: PracticeSession,
    faculty: FacultyBoard,
}

impl<B: StateBackend> AppState<B> {
    /// Rehydrate from `backend`, falling back to seed defaults for anything
    /// not yet persisted.
    pub fn load(backend: B, storage_key: impl Into<String>) -> Result<Self> {
        let storage_key = storage_key.into();
        let snapshot = load_snapshot(&backend, &storage_key)?;
        debug!(
            key = %storage_key,
            textbooks = snapshot.textbooks.len(),
            mcqs = snapshot.mcqs.len(),
            "state rehydrated"
        );
        Ok(Self::from_snapshot(backend, storage_key, snapshot))
    }

    /// Build a store from an explicit snapshot. Nothing is written until the
    /// first action.
    pub fn from_snapshot(backend: B, storage_key: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            backend,
            storage_key: storage_key.into(),
            textbooks: snapshot.textbooks,
            mcqs: snapshot.mcqs,
            system_progress: snapshot.system_progress,
            streak: snapshot.streak,
            user_stats: snapshot.user_stats,
            settings: snapshot.settings,
            practice: PracticeSession::new(),
            faculty: FacultyBoard::seeded(&seed::mcqs()),
        }
    }

    // --- Snapshot reads ---

    pub fn textbooks(&self) -> &[Textbook] {
        &self.textbooks
    }

    pub fn mcqs(&self) -> &[Mcq] {
        &self.mcqs
    }

    pub fn system_progress(&self) -> &[SystemProgress] {
        &self.system_progress
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn user_stats(&self) -> &UserStats {
        &self.user_stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn practice(&self) -> &PracticeSession {
        &self.practice
    }

    pub fn faculty(&self) -> &FacultyBoard {
        &self.faculty
    }

    /// The question the practice session points at, if any.
    pub fn current_question(&self) -> Option<&Mcq> {
        self.practice.current_question(&self.mcqs)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The persisted projection of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            textbooks: self.textbooks.clone(),
            mcqs: self.mcqs.clone(),
            system_progress: self.system_progress.clone(),
            streak: self.streak,
            user_stats: self.user_stats.clone(),
            settings: self.settings.clone(),
        }
    }

    fn persist(&self) {
        if let Err(e) = save_snapshot(&self.backend, &self.storage_key, &self.snapshot()) {
            warn!(key = %self.storage_key, error = %e, "failed to persist state");
        }
    }

    // --- Textbooks ---

    pub fn add_textbook(&mut self, textbook: Textbook) {
        if self.textbooks.iter().any(|t| t.id == textbook.id) {
            warn!(id = %textbook.id, "adding textbook with duplicate id");
        }
        self.textbooks.push(textbook);
        self.persist();
    }

    /// Returns false (and changes nothing) if no textbook has this id.
    pub fn update_textbook_status(&mut self, id: &str, status: TextbookStatus) -> bool {
        let Some(textbook) = self.textbooks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "status update ignored: unknown textbook");
            return false;
        };
        textbook.status = status;
        self.persist();
        true
    }

    // --- Questions & practice ---

    /// Replace the active question list. The practice session restarts so its
    /// index stays inside the new list.
    pub fn set_questions(&mut self, mcqs: Vec<Mcq>) {
        self.mcqs = mcqs;
        self.practice.reset();
        self.persist();
    }

    pub fn select_answer(&mut self, answer_id: &str) -> SelectOutcome {
        let outcome = self.practice.select_answer(&self.mcqs, answer_id);
        if matches!(outcome, SelectOutcome::Recorded { .. }) {
            self.persist();
        }
        outcome
    }

    pub fn next_question(&mut self) {
        self.practice.next_question(self.mcqs.len());
        self.persist();
    }

    pub fn toggle_explanation(&mut self) {
        self.practice.toggle_explanation();
        self.persist();
    }

    pub fn reset_practice(&mut self) {
        self.practice.reset();
        self.persist();
    }

    // --- Faculty review ---

    pub fn move_mcq_to_category(&mut self, mcq_id: &str, from: Bucket, to: Bucket) -> MoveOutcome {
        let outcome = self.faculty.move_mcq(mcq_id, from, to);
        if outcome == MoveOutcome::Moved {
            self.persist();
        }
        outcome
    }

    /// Queue questions for review. Ids already on the board are skipped.
    /// Returns how many were added.
    pub fn add_to_faculty_pending(&mut self, mcqs: &[Mcq]) -> usize {
        let added = mcqs
            .iter()
            .filter(|mcq| self.faculty.insert(Bucket::Pending, (*mcq).clone()))
            .count();
        if added > 0 {
            self.persist();
        }
        added
    }

    /// Move every pending question to approved, in pending order.
    pub fn approve_all_pending(&mut self) -> Vec<String> {
        let moved = self.faculty.approve_all_pending();
        if !moved.is_empty() {
            self.persist();
        }
        moved
    }

    // --- Settings ---

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
        self.persist();
    }
}
