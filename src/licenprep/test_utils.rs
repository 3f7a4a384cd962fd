use crate::generation::{GenerateRequest, GenerationError, QuestionGenerator};
use crate::model::Mcq;
use crate::state::AppState;
use crate::store::fs_backend::FsBackend;
use crate::store::DEFAULT_STORAGE_KEY;
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn backend(&self) -> FsBackend {
        FsBackend::new(self.root.clone())
    }

    /// Load the store from this environment's directory, as a new run would.
    pub fn load_state(&self) -> AppState<FsBackend> {
        AppState::load(self.backend(), DEFAULT_STORAGE_KEY).expect("failed to load state")
    }
}

/// Generator that answers every request with the same canned outcome and
/// remembers what it was asked.
pub struct FixedGenerator {
    outcome: Result<Vec<Mcq>, String>,
    requests: RefCell<Vec<GenerateRequest>>,
}

impl FixedGenerator {
    pub fn returning(questions: Vec<Mcq>) -> Self {
        Self {
            outcome: Ok(questions),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    /// Fail every call as the service's `{"error": ...}` body would.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.borrow().clone()
    }
}

impl QuestionGenerator for FixedGenerator {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<Mcq>, GenerationError> {
        self.requests.borrow_mut().push(request.clone());
        self.outcome.clone().map_err(GenerationError::Service)
    }
}
