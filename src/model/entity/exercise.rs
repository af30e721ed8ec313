use crate::generation::ExerciseKind;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// A quiz item. `options` holds a JSON array string, `"[]"` for essays.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Exercise {
    id: Uuid,
    module_id: Uuid,
    #[sqlx(try_from = "String")]
    exercise_type: ExerciseKind,
    question: String,
    answer: String,
    explanation: String,
    difficulty: i32,
    options: String,
}

#[derive(Debug, Clone)]
pub struct ExerciseCreate {
    pub module_id: Uuid,
    pub exercise_type: ExerciseKind,
    pub question: String,
    pub answer: String,
    pub explanation: String,
    pub difficulty: i32,
    pub options: Vec<String>,
}

impl ResourceTyped for Exercise {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Exercise
    }
}

impl Exercise {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn module_id(&self) -> Uuid {
        self.module_id
    }

    pub fn exercise_type(&self) -> ExerciseKind {
        self.exercise_type
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// The raw serialized option list.
    pub fn options(&self) -> &str {
        &self.options
    }

    pub async fn create_many(mm: &ModelManager, items: Vec<ExerciseCreate>) -> DatabaseResult<Vec<Self>> {
        let mut tx = mm.executor().begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for (position, data) in items.into_iter().enumerate() {
            let id = Uuid::new_v4();
            let options = serde_json::to_string(&data.options)?;
            sqlx::query(
                r#"
                INSERT INTO exercises
                    (id, module_id, exercise_type, question, answer, explanation, difficulty, options, position)
                VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
                "#,
            )
            .bind(id)
            .bind(data.module_id)
            .bind(data.exercise_type.as_str())
            .bind(&data.question)
            .bind(&data.answer)
            .bind(&data.explanation)
            .bind(data.difficulty)
            .bind(&options)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;

            created.push(Exercise {
                id,
                module_id: data.module_id,
                exercise_type: data.exercise_type,
                question: data.question,
                answer: data.answer,
                explanation: data.explanation,
                difficulty: data.difficulty,
                options,
            });
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn list_for_module(mm: &ModelManager, module_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let rows: Vec<Self> = sqlx::query_as(
            r#"
            SELECT id, module_id, exercise_type, question, answer, explanation, difficulty, options
            FROM exercises
            WHERE module_id = $1
            ORDER BY position
            "#,
        )
        .bind(module_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
