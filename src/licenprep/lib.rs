//! # LicenPrep Architecture
//!
//! LicenPrep is a study tool for medical licensing exams: upload textbooks,
//! generate multiple-choice questions from them, practice those questions,
//! and let faculty triage generated questions before they are trusted.
//!
//! The crate is a library with a thin CLI on top. The CLI is one client; the
//! core knows nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, runs the practice loop │
//! │  - The ONLY place that knows about stdout/stdin/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Validates form input                                     │
//! │  - Composes store actions with question generation          │
//! │  - Returns CmdResult values with user-facing messages       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Application Store (state.rs, practice.rs, faculty.rs)      │
//! │  - Single owner of all domain data                          │
//! │  - Fixed set of actions, each persisted after it runs       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StateBackend trait                                       │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Question generation (`generation.rs`) sits beside the store: the API layer
//! calls a [`generation::QuestionGenerator`] and feeds the result into the
//! store.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes and returns plain Rust types, never
//! writes to stdout/stderr and never exits the process. The only I/O below
//! the CLI is the storage backend and the generation client, both behind
//! traits so tests can replace them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`state`]: The application store and its actions
//! - [`practice`]: Practice session state machine
//! - [`faculty`]: Faculty triage board
//! - [`generation`]: Question generation contract and HTTP client
//! - [`store`]: Persistence of the store's projection
//! - [`model`]: Domain records
//! - [`seed`]: Starter content for a fresh install
//! - [`config`]: Configuration and data directory
//! - [`logging`]: `tracing` subscriber setup for the binary
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod faculty;
pub mod generation;
pub mod logging;
pub mod model;
pub mod practice;
pub mod seed;
pub mod state;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
