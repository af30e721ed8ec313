use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::{AnswerRecord, ProgressRecord};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProgressUpsertResponse {
    pub progress_id: Uuid,
    pub update_time: DateTime<Utc>,
}

impl From<ProgressRecord> for ProgressUpsertResponse {
    fn from(value: ProgressRecord) -> Self {
        Self {
            progress_id: value.id(),
            update_time: value.update_time(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnswerUpsertResponse {
    pub answer_id: Uuid,
}

impl From<&AnswerRecord> for AnswerUpsertResponse {
    fn from(value: &AnswerRecord) -> Self {
        Self {
            answer_id: value.id(),
        }
    }
}
