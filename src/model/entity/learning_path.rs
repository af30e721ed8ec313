use crate::generation::{Level, Pace, ResourcePreference};
use crate::impl_paginatable_for;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::prelude::Row;
use uuid::Uuid;

/// One generation request and the raw tree text the model produced for it.
/// Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct LearningPath {
    id: Uuid,
    target: String,
    #[sqlx(try_from = "String")]
    level: Level,
    #[sqlx(try_from = "String")]
    pace: Pace,
    #[sqlx(try_from = "String")]
    resource_type: ResourcePreference,
    path_content: String,
    create_time: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LearningPathCreate {
    pub target: String,
    pub level: Level,
    pub pace: Pace,
    pub resource_type: ResourcePreference,
    pub path_content: String,
}

impl ResourceTyped for LearningPath {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::LearningPath
    }
}

impl LearningPath {
    pub fn new(id: Uuid, data: LearningPathCreate, create_time: DateTime<Utc>) -> Self {
        Self {
            id,
            target: data.target,
            level: data.level,
            pace: data.pace,
            resource_type: data.resource_type,
            path_content: data.path_content,
            create_time,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn resource_type(&self) -> ResourcePreference {
        self.resource_type
    }

    pub fn path_content(&self) -> &str {
        &self.path_content
    }

    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }
}

#[async_trait]
impl CrudRepository<LearningPath, LearningPathCreate, Uuid> for LearningPath {
    async fn create(mm: &ModelManager, data: LearningPathCreate) -> DatabaseResult<Self> {
        let id = Uuid::new_v4();
        let result = sqlx::query(
            "INSERT INTO learning_paths (id, target, level, pace, resource_type, path_content) VALUES ($1,$2,$3,$4,$5,$6) RETURNING create_time",
        )
        .bind(id)
        .bind(&data.target)
        .bind(data.level.as_str())
        .bind(data.pace.as_str())
        .bind(data.resource_type.as_str())
        .bind(&data.path_content)
        .fetch_one(mm.executor())
        .await?;

        let create_time = result.try_get("create_time")?;
        Ok(LearningPath::new(id, data, create_time))
    }

    async fn delete(self, mm: &ModelManager) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM learning_paths WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM learning_paths WHERE id = $1")
            .bind(id)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }

        Ok(Some(result?))
    }

    async fn list(mm: &ModelManager, limit: i64, offset: i64) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM learning_paths ORDER BY create_time DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM learning_paths")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(LearningPath, LearningPathCreate, Uuid);
