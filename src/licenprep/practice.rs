//! # Practice Session
//!
//! Quiz progress over the store's active question list. The session is a small
//! state machine:
//!
//! ```text
//!  Unanswered ──select_answer──▶ Answered ──next_question──▶ Unanswered (index + 1, wrapping)
//!      ▲                                                          │
//!      └──────────────────────── reset (index 0) ─────────────────┘
//! ```
//!
//! Correctness is computed once, when the answer is selected, and stays fixed
//! until the session moves to another question. Practice is cyclic: advancing
//! past the last question wraps to the first.
//!
//! The session holds only an index, never a question. Callers resolve the
//! current question through [`PracticeSession::current_question`], which
//! returns `None` when the collection is empty instead of indexing out of
//! bounds.

use crate::model::Mcq;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeState {
    Unanswered,
    Answered,
}

/// Result of [`PracticeSession::select_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Recorded { correct: bool },
    /// An answer was already chosen for this question; nothing changed.
    AlreadyAnswered,
    /// The question list is empty.
    NoQuestion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeSession {
    current_question_index: usize,
    selected_answer: Option<String>,
    is_answered: bool,
    is_correct: Option<bool>,
    show_explanation: bool,
}

impl PracticeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn show_explanation(&self) -> bool {
        self.show_explanation
    }

    pub fn state(&self) -> PracticeState {
        if self.is_answered {
            PracticeState::Answered
        } else {
            PracticeState::Unanswered
        }
    }

    pub fn current_question<'a>(&self, mcqs: &'a [Mcq]) -> Option<&'a Mcq> {
        mcqs.get(self.current_question_index)
    }

    pub fn select_answer(&mut self, mcqs: &[Mcq], answer_id: &str) -> SelectOutcome {
        let Some(question) = self.current_question(mcqs) else {
            debug!(answer_id, "select ignored: no question available");
            return SelectOutcome::NoQuestion;
        };
        if self.is_answered {
            debug!(answer_id, question = %question.id, "select ignored: already answered");
            return SelectOutcome::AlreadyAnswered;
        }

        let correct = answer_id == question.correct_answer;
        self.selected_answer = Some(answer_id.to_string());
        self.is_answered = true;
        self.is_correct = Some(correct);
        self.show_explanation = true;
        SelectOutcome::Recorded { correct }
    }

    /// Advance to the next question, wrapping to 0 after the last one.
    /// With an empty collection the index stays at 0.
    pub fn next_question(&mut self, total: usize) {
        let next = if total == 0 {
            0
        } else {
            (self.current_question_index + 1) % total
        };
        *self = Self {
            current_question_index: next,
            ..Self::default()
        };
    }

    pub fn toggle_explanation(&mut self) {
        self.show_explanation = !self.show_explanation;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn starts_unanswered_at_zero() {
        let session = PracticeSession::new();
        assert_eq!(session.state(), PracticeState::Unanswered);
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.is_correct(), None);
        assert!(!session.show_explanation());
    }

    #[test]
    fn correct_selection_then_next() {
        let mcqs = seed::mcqs();
        let mut session = PracticeSession::new();

        // q1's correct answer is "b"
        let outcome = session.select_answer(&mcqs, "b");
        assert_eq!(outcome, SelectOutcome::Recorded { correct: true });
        assert_eq!(session.selected_answer(), Some("b"));
        assert!(session.is_answered());
        assert_eq!(session.is_correct(), Some(true));
        assert!(session.show_explanation());

        session.next_question(mcqs.len());
        assert_eq!(session.current_question_index(), 1);
        assert!(!session.is_answered());
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.is_correct(), None);
        assert!(!session.show_explanation());
    }

    #[test]
    fn incorrect_selection_is_recorded() {
        let mcqs = seed::mcqs();
        let mut session = PracticeSession::new();
        assert_eq!(
            session.select_answer(&mcqs, "a"),
            SelectOutcome::Recorded { correct: false }
        );
        assert_eq!(session.is_correct(), Some(false));
    }

    #[test]
    fn second_selection_does_not_change_correctness() {
        let mcqs = seed::mcqs();
        let mut session = PracticeSession::new();
        session.select_answer(&mcqs, "a");

        let outcome = session.select_answer(&mcqs, "b");
        assert_eq!(outcome, SelectOutcome::AlreadyAnswered);
        assert_eq!(session.is_correct(), Some(false));
        assert_eq!(session.selected_answer(), Some("a"));
    }

    #[test]
    fn next_wraps_after_last_question() {
        let mcqs = seed::mcqs();
        let mut session = PracticeSession::new();
        for _ in 0..mcqs.len() - 1 {
            session.next_question(mcqs.len());
        }
        assert_eq!(session.current_question_index(), mcqs.len() - 1);

        session.next_question(mcqs.len());
        assert_eq!(session.current_question_index(), 0);
    }

    #[test]
    fn wrap_holds_for_every_collection_size() {
        for total in 1..=7 {
            let mut session = PracticeSession::new();
            for step in 1..=(3 * total) {
                session.next_question(total);
                assert_eq!(session.current_question_index(), step % total);
                assert!(session.current_question_index() < total);
            }
        }
    }

    #[test]
    fn empty_collection_has_no_question() {
        let mut session = PracticeSession::new();
        assert!(session.current_question(&[]).is_none());
        assert_eq!(session.select_answer(&[], "a"), SelectOutcome::NoQuestion);
        assert!(!session.is_answered());

        session.next_question(0);
        assert_eq!(session.current_question_index(), 0);
    }

    #[test]
    fn reset_from_any_state_yields_initial_values() {
        let mcqs = seed::mcqs();

        let mut answered = PracticeSession::new();
        answered.next_question(mcqs.len());
        answered.select_answer(&mcqs, "a");
        answered.toggle_explanation();
        answered.reset();
        assert_eq!(answered, PracticeSession::default());

        let mut fresh = PracticeSession::new();
        fresh.reset();
        assert_eq!(fresh, PracticeSession::default());
    }

    #[test]
    fn toggle_explanation_flips_visibility() {
        let mcqs = seed::mcqs();
        let mut session = PracticeSession::new();
        session.select_answer(&mcqs, "b");
        assert!(session.show_explanation());
        session.toggle_explanation();
        assert!(!session.show_explanation());
        assert!(session.is_answered());
    }
}
