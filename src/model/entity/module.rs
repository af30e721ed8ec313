use crate::generation::Tier;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// A skill module parsed from a generated tree. `dependencies` is the free
/// text the model wrote, not a reference to other rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct LearningModule {
    id: Uuid,
    path_id: Uuid,
    name: String,
    #[sqlx(try_from = "String")]
    tier: Tier,
    duration_hours: i32,
    dependencies: String,
    skill_points: String,
    goal: String,
    position: i32,
}

#[derive(Debug, Clone)]
pub struct LearningModuleCreate {
    pub path_id: Uuid,
    pub name: String,
    pub tier: Tier,
    pub duration_hours: i32,
    pub dependencies: String,
    pub skill_points: String,
    pub goal: String,
    pub position: i32,
}

impl ResourceTyped for LearningModule {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Module
    }
}

impl LearningModule {
    pub fn new(id: Uuid, data: LearningModuleCreate) -> Self {
        Self {
            id,
            path_id: data.path_id,
            name: data.name,
            tier: data.tier,
            duration_hours: data.duration_hours,
            dependencies: data.dependencies,
            skill_points: data.skill_points,
            goal: data.goal,
            position: data.position,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path_id(&self) -> Uuid {
        self.path_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn duration_hours(&self) -> i32 {
        self.duration_hours
    }

    pub fn dependencies(&self) -> &str {
        &self.dependencies
    }

    pub fn skill_points(&self) -> &str {
        &self.skill_points
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}

#[async_trait]
impl CrudRepository<LearningModule, LearningModuleCreate, Uuid> for LearningModule {
    async fn create(mm: &ModelManager, data: LearningModuleCreate) -> DatabaseResult<Self> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO learning_modules
                (id, path_id, name, tier, duration_hours, dependencies, skill_points, goal, position)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
            "#,
        )
        .bind(id)
        .bind(data.path_id)
        .bind(&data.name)
        .bind(data.tier.as_str())
        .bind(data.duration_hours)
        .bind(&data.dependencies)
        .bind(&data.skill_points)
        .bind(&data.goal)
        .bind(data.position)
        .execute(mm.executor())
        .await?;

        Ok(LearningModule::new(id, data))
    }

    async fn delete(self, mm: &ModelManager) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM learning_modules WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM learning_modules WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    async fn list(mm: &ModelManager, limit: i64, offset: i64) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM learning_modules ORDER BY path_id, position LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM learning_modules")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

// Utils

impl LearningModule {
    /// Modules of one path in tree order.
    pub async fn list_for_path(mm: &ModelManager, path_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let rows: Vec<Self> = sqlx::query_as(
            "SELECT * FROM learning_modules WHERE path_id = $1 ORDER BY position",
        )
        .bind(path_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }

    /// Looks a module up by name. Without `path_id` the module of the most
    /// recently generated path wins.
    pub async fn find_by_name(
        mm: &ModelManager,
        name: &str,
        path_id: Option<Uuid>,
    ) -> DatabaseResult<Option<Self>> {
        let row: Option<Self> = sqlx::query_as(
            r#"
            SELECT m.*
            FROM learning_modules m
            JOIN learning_paths p ON p.id = m.path_id
            WHERE m.name = $1
            AND ($2::uuid IS NULL OR m.path_id = $2)
            ORDER BY p.create_time DESC
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(path_id)
        .fetch_optional(mm.executor())
        .await?;

        Ok(row)
    }
}
