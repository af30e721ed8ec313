use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::ExerciseKind;
use crate::model::{DatabaseResult, entity::Exercise};

/// Exercise with its option list decoded.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub module_id: Uuid,
    pub exercise_type: ExerciseKind,
    pub question: String,
    pub answer: String,
    pub explanation: String,
    pub difficulty: i32,
    pub options: Vec<String>,
}

impl TryFrom<Exercise> for ExerciseResponse {
    type Error = serde_json::Error;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id(),
            module_id: value.module_id(),
            exercise_type: value.exercise_type(),
            question: value.question().to_string(),
            answer: value.answer().to_string(),
            explanation: value.explanation().to_string(),
            difficulty: value.difficulty(),
            options: serde_json::from_str(value.options())?,
        })
    }
}

impl ExerciseResponse {
    pub fn from_rows(rows: Vec<Exercise>) -> DatabaseResult<Vec<Self>> {
        Ok(rows
            .into_iter()
            .map(ExerciseResponse::try_from)
            .collect::<Result<_, _>>()?)
    }
}
