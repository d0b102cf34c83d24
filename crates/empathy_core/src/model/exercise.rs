//! Learning exercise progress.
//!
//! Lesson content is static; only the fact that an exercise was completed
//! (and when) is persisted. The written response is not stored.

use super::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub exercise_id: String,
    pub date_completed: Timestamp,
}
