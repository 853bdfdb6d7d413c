//! Guardian Alert Evaluator
//!
//! Scans a user's recent mood history and decides whether their guardian
//! should be nudged. Runs as a best-effort side effect after mood analysis:
//! its errors are logged by the caller and never surface to the user.

mod evaluator;

pub use evaluator::{AlertDispatcher, GuardianAlert, GuardianConfig, GuardianEvaluator, LoggingDispatcher};

use thiserror::Error;

/// Guardian evaluation errors
#[derive(Debug, Error)]
pub enum GuardianError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}
