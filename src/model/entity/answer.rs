use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Latest answer of a learner to one exercise of one module.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct AnswerRecord {
    id: Uuid,
    path_id: Uuid,
    module_name: String,
    exercise_id: Uuid,
    user_answer: String,
    is_correct: bool,
    submit_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AnswerRecordUpsert {
    pub path_id: Uuid,
    pub module_name: String,
    pub exercise_id: Uuid,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Answer counts of a path (or one of its modules). `accuracy` is a
/// percentage rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnswerStats {
    pub total: i64,
    pub correct: i64,
    pub accuracy: f64,
}

impl AnswerStats {
    pub fn from_counts(total: i64, correct: i64) -> Self {
        let accuracy = if total == 0 {
            0.0
        } else {
            round_to_hundredths(correct as f64 / total as f64 * 100.0)
        };

        Self {
            total,
            correct,
            accuracy,
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ResourceTyped for AnswerRecord {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Answer
    }
}

impl AnswerRecord {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path_id(&self) -> Uuid {
        self.path_id
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn exercise_id(&self) -> Uuid {
        self.exercise_id
    }

    pub fn user_answer(&self) -> &str {
        &self.user_answer
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn submit_time(&self) -> DateTime<Utc> {
        self.submit_time
    }

    /// Inserts the answer or replaces the previous one for the same
    /// (path, module, exercise) key. The row keeps its id on update.
    pub async fn upsert(mm: &ModelManager, data: AnswerRecordUpsert) -> DatabaseResult<Self> {
        let row: Self = sqlx::query_as(
            r#"
            INSERT INTO user_answers (id, path_id, module_name, exercise_id, user_answer, is_correct)
            VALUES ($1,$2,$3,$4,$5,$6)
            ON CONFLICT (path_id, module_name, exercise_id)
            DO UPDATE SET
                user_answer = EXCLUDED.user_answer,
                is_correct = EXCLUDED.is_correct,
                submit_time = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.path_id)
        .bind(&data.module_name)
        .bind(data.exercise_id)
        .bind(&data.user_answer)
        .bind(data.is_correct)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn stats(
        mm: &ModelManager,
        path_id: Uuid,
        module_name: Option<&str>,
    ) -> DatabaseResult<AnswerStats> {
        let (total, correct): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE is_correct) AS correct
            FROM user_answers
            WHERE path_id = $1
            AND ($2::text IS NULL OR module_name = $2)
            "#,
        )
        .bind(path_id)
        .bind(module_name)
        .fetch_one(mm.executor())
        .await?;

        Ok(AnswerStats::from_counts(total, correct))
    }
}
