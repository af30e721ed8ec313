use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct ProgressRecord {
    id: Uuid,
    path_id: Uuid,
    module_name: String,
    status: String,
    accuracy: f64,
    update_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ProgressRecordUpsert {
    pub path_id: Uuid,
    pub module_name: String,
    pub status: String,
    pub accuracy: f64,
}

impl ResourceTyped for ProgressRecord {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Progress
    }
}

impl ProgressRecord {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path_id(&self) -> Uuid {
        self.path_id
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    /// One record per (path, module); resubmitting overwrites status and
    /// accuracy and bumps `update_time`.
    pub async fn upsert(mm: &ModelManager, data: ProgressRecordUpsert) -> DatabaseResult<Self> {
        let row: Self = sqlx::query_as(
            r#"
            INSERT INTO user_progress (id, path_id, module_name, status, accuracy)
            VALUES ($1,$2,$3,$4,$5)
            ON CONFLICT (path_id, module_name)
            DO UPDATE SET
                status = EXCLUDED.status,
                accuracy = EXCLUDED.accuracy,
                update_time = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.path_id)
        .bind(&data.module_name)
        .bind(&data.status)
        .bind(data.accuracy)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn list_for_path(mm: &ModelManager, path_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let rows: Vec<Self> = sqlx::query_as(
            "SELECT * FROM user_progress WHERE path_id = $1 ORDER BY update_time DESC",
        )
        .bind(path_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
