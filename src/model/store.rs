use async_trait::async_trait;

use crate::model::{
    CrudRepository, DatabaseResult, ModelManager,
    entity::{
        Exercise, ExerciseCreate, LearningModule, LearningModuleCreate, LearningPath,
        LearningPathCreate, LearningResource, LearningResourceCreate,
    },
};

/// Write side used by the generation pipeline.
#[async_trait]
pub trait LearningStore: Send + Sync {
    async fn insert_path(&self, data: LearningPathCreate) -> DatabaseResult<LearningPath>;
    async fn insert_module(&self, data: LearningModuleCreate) -> DatabaseResult<LearningModule>;
    /// Returns the number of stored rows.
    async fn insert_resources(&self, items: Vec<LearningResourceCreate>) -> DatabaseResult<usize>;
    /// Returns the number of stored rows.
    async fn insert_exercises(&self, items: Vec<ExerciseCreate>) -> DatabaseResult<usize>;
}

#[async_trait]
impl LearningStore for ModelManager {
    async fn insert_path(&self, data: LearningPathCreate) -> DatabaseResult<LearningPath> {
        LearningPath::create(self, data).await
    }

    async fn insert_module(&self, data: LearningModuleCreate) -> DatabaseResult<LearningModule> {
        LearningModule::create(self, data).await
    }

    async fn insert_resources(&self, items: Vec<LearningResourceCreate>) -> DatabaseResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        Ok(LearningResource::create_many(self, items).await?.len())
    }

    async fn insert_exercises(&self, items: Vec<ExerciseCreate>) -> DatabaseResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        Ok(Exercise::create_many(self, items).await?.len())
    }
}
