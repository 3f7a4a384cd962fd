//! # API Facade
//!
//! The API layer is a thin facade over [`AppState`] and the
//! [`QuestionGenerator`]. It is the single entry point the presentation layer
//! talks to.
//!
//! The facade:
//! - **Validates form input** (settings bounds, required generation category,
//!   answer ids that are not options) before anything reaches the store
//! - **Composes actions** such as "generate, make active, queue for review"
//! - **Returns structured types** (`CmdResult`) with user-facing messages
//!
//! It does no printing and no formatting beyond message text; rendering
//! belongs to the CLI.
//!
//! `LicenPrepApi<B, G>` is generic over the storage backend and the
//! generator, so tests run it against `MemBackend` and a canned generator.

use crate::error::{LicenPrepError, Result};
use crate::faculty::{Bucket, MoveOutcome};
use crate::generation::{GenerateRequest, GenerationError, QuestionGenerator};
use crate::model::{
    Mcq, SettingsUpdate, SystemProgress, Textbook, TextbookStatus, MAX_TOKEN_BUDGET,
    MIN_TOKEN_BUDGET,
};
use crate::practice::SelectOutcome;
use crate::state::AppState;
use crate::store::StateBackend;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// File extensions accepted for textbook uploads.
pub const TEXTBOOK_EXTENSIONS: [&str; 5] = ["pdf", "ppt", "pptx", "doc", "docx"];

/// Largest accepted textbook upload (100 MB).
pub const MAX_TEXTBOOK_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Questions created or moved by the command.
    pub affected_questions: Vec<Mcq>,
    /// Textbooks created or updated by the command.
    pub affected_textbooks: Vec<Textbook>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_questions(mut self, questions: Vec<Mcq>) -> Self {
        self.affected_questions = questions;
        self
    }

    pub fn with_affected_textbooks(mut self, textbooks: Vec<Textbook>) -> Self {
        self.affected_textbooks = textbooks;
        self
    }
}

/// Read model behind the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub streak: u32,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub accuracy: Option<f64>,
    pub time_spent_minutes: u32,
    pub system_progress: Vec<SystemProgress>,
    pub textbooks_total: usize,
    pub textbooks_processed: usize,
    pub pending_review: usize,
    pub active_questions: usize,
}

pub struct LicenPrepApi<B: StateBackend, G: QuestionGenerator> {
    state: AppState<B>,
    generator: G,
}

impl<B: StateBackend, G: QuestionGenerator> LicenPrepApi<B, G> {
    pub fn new(state: AppState<B>, generator: G) -> Self {
        Self { state, generator }
    }

    pub fn state(&self) -> &AppState<B> {
        &self.state
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn dashboard(&self) -> Dashboard {
        let stats = self.state.user_stats();
        let textbooks = self.state.textbooks();
        Dashboard {
            streak: self.state.streak(),
            questions_answered: stats.questions_answered,
            correct_answers: stats.correct_answers,
            accuracy: stats.accuracy(),
            time_spent_minutes: stats.time_spent,
            system_progress: self.state.system_progress().to_vec(),
            textbooks_total: textbooks.len(),
            textbooks_processed: textbooks
                .iter()
                .filter(|t| t.status == TextbookStatus::Processed)
                .count(),
            pending_review: self.state.faculty().pending().len(),
            active_questions: self.state.mcqs().len(),
        }
    }

    // --- Textbooks ---

    /// Register an uploaded file. Only PDF, PowerPoint and Word documents up
    /// to [`MAX_TEXTBOOK_BYTES`] are accepted. The title defaults to the file
    /// stem and the MIME type is guessed from the extension.
    pub fn register_textbook(&mut self, path: &Path, title: Option<&str>) -> Result<CmdResult> {
        if !path.is_file() {
            return Err(LicenPrepError::Validation(format!(
                "No such file: {}",
                path.display()
            )));
        }
        validate_upload(path)?;

        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.to_string(),
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| LicenPrepError::Validation("Textbook title is required".into()))?,
        };
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let textbook = Textbook::new(uuid::Uuid::new_v4().to_string(), title, mime.essence_str());
        info!(id = %textbook.id, title = %textbook.title, "textbook registered");
        self.state.add_textbook(textbook.clone());

        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Uploaded \"{}\" ({})",
                textbook.title, textbook.mime_type
            )))
            .with_affected_textbooks(vec![textbook]))
    }

    pub fn set_textbook_status(&mut self, id: &str, status: TextbookStatus) -> CmdResult {
        if !self.state.update_textbook_status(id, status) {
            return CmdResult::default()
                .with_message(CmdMessage::warning(format!("No textbook with id {}", id)));
        }
        let updated: Vec<Textbook> = self
            .state
            .textbooks()
            .iter()
            .filter(|t| t.id == id)
            .cloned()
            .collect();
        CmdResult::default()
            .with_message(CmdMessage::success(format!("Textbook {} is now {}", id, status)))
            .with_affected_textbooks(updated)
    }

    // --- Generation ---

    /// Generate questions, make them the active practice set and queue them
    /// for faculty review. An empty result leaves the store unchanged.
    pub fn generate_quiz(&mut self, request: &GenerateRequest) -> Result<CmdResult> {
        request.validate().map_err(|e| match e {
            GenerationError::InvalidRequest(msg) => LicenPrepError::Validation(msg),
            other => LicenPrepError::Generation(other),
        })?;

        let questions = self.generator.generate(request)?;
        if questions.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
                "No questions were generated for {}",
                request.category
            ))));
        }

        self.state.set_questions(questions.clone());
        let queued = self.state.add_to_faculty_pending(&questions);

        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Generated {} question{} for {}",
            questions.len(),
            if questions.len() == 1 { "" } else { "s" },
            request.category
        )));
        if queued > 0 {
            result.add_message(CmdMessage::info(format!(
                "{} queued for faculty review",
                queued
            )));
        }
        Ok(result.with_affected_questions(questions))
    }

    // --- Practice ---

    pub fn current_question(&self) -> Option<&Mcq> {
        self.state.current_question()
    }

    /// Answer the current question. Ids that are not among its options are
    /// rejected here and never reach the store.
    pub fn answer(&mut self, answer_id: &str) -> CmdResult {
        let answer_id = answer_id.trim();
        let Some(question) = self.state.current_question() else {
            return CmdResult::default()
                .with_message(CmdMessage::warning("No question available"));
        };
        if question.answer(answer_id).is_none() {
            return CmdResult::default().with_message(CmdMessage::warning(format!(
                "\"{}\" is not one of the options",
                answer_id
            )));
        }

        match self.state.select_answer(answer_id) {
            SelectOutcome::Recorded { correct: true } => {
                CmdResult::default().with_message(CmdMessage::success("Correct!"))
            }
            SelectOutcome::Recorded { correct: false } => {
                let text = self
                    .state
                    .current_question()
                    .and_then(|q| q.correct_answer_text().map(str::to_string))
                    .unwrap_or_default();
                CmdResult::default()
                    .with_message(CmdMessage::error(format!("Incorrect. The answer is {}", text)))
            }
            SelectOutcome::AlreadyAnswered => CmdResult::default().with_message(
                CmdMessage::info("Already answered. Move to the next question."),
            ),
            SelectOutcome::NoQuestion => {
                CmdResult::default().with_message(CmdMessage::warning("No question available"))
            }
        }
    }

    pub fn next_question(&mut self) {
        self.state.next_question();
    }

    pub fn toggle_explanation(&mut self) {
        self.state.toggle_explanation();
    }

    pub fn reset_practice(&mut self) {
        self.state.reset_practice();
    }

    // --- Faculty review ---

    pub fn move_question(&mut self, mcq_id: &str, from: Bucket, to: Bucket) -> CmdResult {
        match self.state.move_mcq_to_category(mcq_id, from, to) {
            MoveOutcome::Moved => {
                let moved: Vec<Mcq> = self
                    .state
                    .faculty()
                    .bucket(to)
                    .iter()
                    .filter(|m| m.id == mcq_id)
                    .cloned()
                    .collect();
                CmdResult::default()
                    .with_message(CmdMessage::success(format!(
                        "Moved {} from {} to {}",
                        mcq_id, from, to
                    )))
                    .with_affected_questions(moved)
            }
            MoveOutcome::NotFound => CmdResult::default().with_message(CmdMessage::warning(
                format!("{} is not in {}", mcq_id, from),
            )),
            MoveOutcome::SameBucket => CmdResult::default()
                .with_message(CmdMessage::info(format!("{} is already {}", mcq_id, to))),
        }
    }

    pub fn approve_all(&mut self) -> CmdResult {
        let moved = self.state.approve_all_pending();
        if moved.is_empty() {
            return CmdResult::default()
                .with_message(CmdMessage::info("Nothing pending review"));
        }
        let approved: Vec<Mcq> = self
            .state
            .faculty()
            .approved()
            .iter()
            .filter(|m| moved.contains(&m.id))
            .cloned()
            .collect();
        CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Approved {} question{}",
                moved.len(),
                if moved.len() == 1 { "" } else { "s" }
            )))
            .with_affected_questions(approved)
    }

    // --- Settings ---

    /// Validate and apply a settings form. Nothing is applied if any field
    /// is out of bounds.
    pub fn submit_settings(&mut self, update: SettingsUpdate) -> Result<CmdResult> {
        validate_settings(&update)?;
        if update.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::info("Nothing to update")));
        }
        self.state.update_settings(update);
        let cost = self.state.settings().estimated_monthly_cost();
        Ok(CmdResult::default()
            .with_message(CmdMessage::success("Settings saved"))
            .with_message(CmdMessage::info(format!(
                "Estimated monthly cost: ${:.2}",
                cost
            ))))
    }
}

/// Check an upload's extension and size.
pub fn validate_upload(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !TEXTBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return Err(LicenPrepError::Validation(format!(
            "Unsupported file type: {} (accepted: .{})",
            path.display(),
            TEXTBOOK_EXTENSIONS.join(", .")
        )));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_TEXTBOOK_BYTES {
        return Err(LicenPrepError::Validation(format!(
            "File is too large: {} MB (maximum is 100 MB)",
            size.div_ceil(1024 * 1024)
        )));
    }
    Ok(())
}

pub fn validate_settings(update: &SettingsUpdate) -> Result<()> {
    if let Some(budget) = update.token_budget {
        if !(MIN_TOKEN_BUDGET..=MAX_TOKEN_BUDGET).contains(&budget) {
            return Err(LicenPrepError::Validation(format!(
                "Token budget must be between {} and {}",
                MIN_TOKEN_BUDGET, MAX_TOKEN_BUDGET
            )));
        }
    }
    if let Some(tier) = &update.model_tier {
        if tier.trim().is_empty() {
            return Err(LicenPrepError::Validation(
                "Please select a model tier".to_string(),
            ));
        }
    }
    Ok(())
}
