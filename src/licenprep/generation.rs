//! # Question Generation Client
//!
//! Generated questions come from an external service:
//!
//! ```text
//! POST {base_url}/generate/
//! {"category": "...", "query": "...", "k": 5, "num_questions": 3}
//!
//! 200 {"questions": [MCQ, ...]}
//! ```
//!
//! From the caller's side a call is one blocking request/response. There is no
//! retry and no partial success: either every returned question is well formed
//! and the whole list comes back, or the call fails with a [`GenerationError`]
//! that says which way it failed. The service also reports some failures as a
//! 200 with an `{"error": "..."}` body; those surface as
//! [`GenerationError::Service`].
//!
//! No timeout is imposed unless the caller configures one on [`HttpGenerator`].

use crate::model::Mcq;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_K: u32 = 5;
pub const DEFAULT_NUM_QUESTIONS: u32 = 3;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("service responded with HTTP {0}")]
    Status(StatusCode),

    #[error("service reported an error: {0}")]
    Service(String),

    #[error("malformed response: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub category: String,
    pub query: String,
    /// How many source passages the service retrieves.
    pub k: u32,
    pub num_questions: u32,
}

impl GenerateRequest {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: String::new(),
            k: DEFAULT_K,
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    pub fn with_num_questions(mut self, num_questions: u32) -> Self {
        self.num_questions = num_questions;
        self
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.category.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "category is required".to_string(),
            ));
        }
        if self.k == 0 {
            return Err(GenerationError::InvalidRequest(
                "k must be a positive integer".to_string(),
            ));
        }
        if self.num_questions == 0 {
            return Err(GenerationError::InvalidRequest(
                "num_questions must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Source of generated questions.
pub trait QuestionGenerator {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<Mcq>, GenerationError>;
}

#[derive(Deserialize)]
struct GenerateResponse {
    questions: Vec<Mcq>,
}

/// Decode a response body into questions, rejecting the whole payload if any
/// question is malformed.
pub fn parse_response(body: &str) -> Result<Vec<Mcq>, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(GenerationError::Service(message.to_string()));
    }

    let response: GenerateResponse = serde_json::from_value(value)
        .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;

    for mcq in &response.questions {
        mcq.validate().map_err(GenerationError::MalformedPayload)?;
    }
    Ok(response.questions)
}

/// HTTP client for the generation service.
pub struct HttpGenerator {
    client: Client,
    base_url: String,
}

impl HttpGenerator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` bounds the whole request; `None` waits indefinitely.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/generate/", self.base_url.trim_end_matches('/'))
    }
}

impl QuestionGenerator for HttpGenerator {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<Mcq>, GenerationError> {
        request.validate()?;

        let endpoint = self.endpoint();
        info!(
            %endpoint,
            category = %request.category,
            k = request.k,
            num_questions = request.num_questions,
            "requesting generated questions"
        );

        let response = self.client.post(&endpoint).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status));
        }

        let body = response.text()?;
        let questions = parse_response(&body)?;
        debug!(count = questions.len(), "generated questions received");
        Ok(questions)
    }
}
