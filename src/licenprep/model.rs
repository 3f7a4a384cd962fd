//! Domain records held by the application store.
//!
//! These are plain data types. Field names serialize in camelCase so the
//! persisted blob and the generation endpoint share one wire shape
//! (`correctAnswer`, `lastPracticed`, `uploadedAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextbookStatus {
    Processing,
    Processed,
    Failed,
}

impl fmt::Display for TextbookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TextbookStatus::Processing => "processing",
            TextbookStatus::Processed => "processed",
            TextbookStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl FromStr for TextbookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "processing" => Ok(TextbookStatus::Processing),
            "processed" => Ok(TextbookStatus::Processed),
            "failed" => Ok(TextbookStatus::Failed),
            other => Err(format!("Unknown textbook status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Textbook {
    pub id: String,
    pub title: String,
    pub pages: u32,
    pub uploaded_at: DateTime<Utc>,
    pub status: TextbookStatus,
    pub mime_type: String,
    pub chapters: Vec<String>,
}

impl Textbook {
    /// A freshly uploaded textbook, still being processed.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            pages: 0,
            uploaded_at: Utc::now(),
            status: TextbookStatus::Processing,
            mime_type: mime_type.into(),
            chapters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
}

impl Answer {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
    pub id: String,
    pub stem: String,
    pub answers: Vec<Answer>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub last_practiced: Option<DateTime<Utc>>,
}

impl Mcq {
    pub fn answer(&self, id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    pub fn correct_answer_text(&self) -> Option<&str> {
        self.answer(&self.correct_answer).map(|a| a.text.as_str())
    }

    /// Checks the structural invariants: at least two answers, unique answer
    /// ids, and a `correct_answer` that names one of them.
    pub fn validate(&self) -> Result<(), String> {
        if self.answers.len() < 2 {
            return Err(format!(
                "question {} has {} answer(s), need at least 2",
                self.id,
                self.answers.len()
            ));
        }
        for (i, answer) in self.answers.iter().enumerate() {
            if self.answers[..i].iter().any(|prev| prev.id == answer.id) {
                return Err(format!(
                    "question {} repeats answer id '{}'",
                    self.id, answer.id
                ));
            }
        }
        if self.answer(&self.correct_answer).is_none() {
            return Err(format!(
                "question {} names correct answer '{}' which is not an option",
                self.id, self.correct_answer
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemProgress {
    pub system: String,
    /// Percent complete, 0..=100. Persisted values above 100 are clamped on load.
    #[serde(deserialize_with = "deserialize_percent")]
    pub progress: u8,
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    Ok(value.min(100))
}

impl SystemProgress {
    /// Progress is clamped to 100.
    pub fn new(system: impl Into<String>, progress: u8) -> Self {
        Self {
            system: system.into(),
            progress: progress.min(100),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub questions_answered: u32,
    pub correct_answers: u32,
    /// Minutes.
    pub time_spent: u32,
    pub last_active: DateTime<Utc>,
}

impl UserStats {
    /// Percentage of correct answers, `None` before anything was answered.
    /// Capped at 100 when persisted counts are inconsistent.
    pub fn accuracy(&self) -> Option<f64> {
        if self.questions_answered == 0 {
            return None;
        }
        let ratio = f64::from(self.correct_answers) / f64::from(self.questions_answered);
        Some((ratio * 100.0).min(100.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        f.write_str(s)
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

pub const MIN_TOKEN_BUDGET: u32 = 100_000;
pub const MAX_TOKEN_BUDGET: u32 = 1_000_000;

/// Cost per 1K tokens for tiers without a known price.
const FALLBACK_COST_PER_1K: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub model_tier: String,
    pub token_budget: u32,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_tier: "gpt-4".to_string(),
            token_budget: 500_000,
            theme: Theme::System,
        }
    }
}

impl Settings {
    /// Shallow merge: only the fields present in `update` change.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(model_tier) = update.model_tier {
            self.model_tier = model_tier;
        }
        if let Some(token_budget) = update.token_budget {
            self.token_budget = token_budget;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
    }

    /// Estimated monthly spend in dollars if the whole budget is used.
    pub fn estimated_monthly_cost(&self) -> f64 {
        let per_1k = model_cost_per_1k(&self.model_tier).unwrap_or(FALLBACK_COST_PER_1K);
        f64::from(self.token_budget) / 1000.0 * per_1k
    }
}

/// Dollars per 1K tokens for the model tiers offered in settings.
pub fn model_cost_per_1k(model_tier: &str) -> Option<f64> {
    match model_tier {
        "gpt-3.5-turbo" => Some(0.0015),
        "gpt-4" => Some(0.03),
        "claude-3-opus" => Some(0.025),
        "gemini-pro" => Some(0.0035),
        _ => None,
    }
}

/// Partial settings, as submitted by the settings form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub model_tier: Option<String>,
    pub token_budget: Option<u32>,
    pub theme: Option<Theme>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.model_tier.is_none() && self.token_budget.is_none() && self.theme.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mcq() -> Mcq {
        Mcq {
            id: "q1".into(),
            stem: "Which enzyme?".into(),
            answers: vec![
                Answer::new("a", "Hexosaminidase A"),
                Answer::new("b", "Sphingomyelinase"),
            ],
            correct_answer: "a".into(),
            explanation: "GM2 accumulation".into(),
            difficulty: Difficulty::Easy,
            category: "Biochemistry".into(),
            last_practiced: None,
        }
    }

    #[test]
    fn mcq_serializes_camel_case() {
        let json = serde_json::to_value(sample_mcq()).unwrap();
        assert_eq!(json["correctAnswer"], "a");
        assert!(json["lastPracticed"].is_null());
        assert_eq!(json["difficulty"], "easy");
    }

    #[test]
    fn validate_accepts_well_formed_question() {
        assert!(sample_mcq().validate().is_ok());
        assert_eq!(sample_mcq().correct_answer_text(), Some("Hexosaminidase A"));
    }

    #[test]
    fn validate_rejects_dangling_correct_answer() {
        let mut mcq = sample_mcq();
        mcq.correct_answer = "z".into();
        assert!(mcq.validate().is_err());
    }

    #[test]
    fn validate_rejects_single_answer() {
        let mut mcq = sample_mcq();
        mcq.answers.truncate(1);
        assert!(mcq.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_answer_ids() {
        let mut mcq = sample_mcq();
        mcq.answers[1].id = "a".into();
        assert!(mcq.validate().is_err());
    }

    #[test]
    fn accuracy_is_none_without_answers() {
        let stats = UserStats {
            questions_answered: 0,
            correct_answers: 0,
            time_spent: 0,
            last_active: Utc::now(),
        };
        assert_eq!(stats.accuracy(), None);
    }

    #[test]
    fn accuracy_is_a_percentage() {
        let stats = UserStats {
            questions_answered: 200,
            correct_answers: 150,
            time_spent: 10,
            last_active: Utc::now(),
        };
        assert_eq!(stats.accuracy(), Some(75.0));
    }

    #[test]
    fn settings_apply_only_touches_given_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.model_tier, "gpt-4");
        assert_eq!(settings.token_budget, 500_000);
    }

    #[test]
    fn monthly_cost_uses_tier_price() {
        let settings = Settings::default();
        assert!((settings.estimated_monthly_cost() - 15.0).abs() < 1e-9);

        let unknown = Settings {
            model_tier: "mystery".into(),
            ..Settings::default()
        };
        assert!((unknown.estimated_monthly_cost() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(SystemProgress::new("Renal", 140).progress, 100);
    }

    #[test]
    fn persisted_progress_is_clamped_on_load() {
        let progress: SystemProgress =
            serde_json::from_str(r#"{"system":"Renal","progress":250}"#).unwrap();
        assert_eq!(progress.progress, 100);

        let progress: SystemProgress =
            serde_json::from_str(r#"{"system":"Renal","progress":23}"#).unwrap();
        assert_eq!(progress.progress, 23);
    }

    #[test]
    fn accuracy_is_capped_for_inconsistent_counts() {
        let stats = UserStats {
            questions_answered: 1,
            correct_answers: 9,
            time_spent: 0,
            last_active: Utc::now(),
        };
        assert_eq!(stats.accuracy(), Some(100.0));
    }

    #[test]
    fn status_and_theme_parse_case_insensitively() {
        assert_eq!("Processed".parse::<TextbookStatus>(), Ok(TextbookStatus::Processed));
        assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
