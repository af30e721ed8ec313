use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::{GeneratedModule, GeneratedPath, Tier};
use crate::model::entity::{LearningModule, LearningPath, ProgressRecord};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ModuleSummary {
    pub id: Uuid,
    pub name: String,
    pub tier: Tier,
    pub duration_hours: i32,
    pub dependencies: String,
    pub skill_points: String,
    pub goal: String,
    pub position: i32,
    pub resource_count: usize,
    pub exercise_count: usize,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GeneratePathResponse {
    pub path_id: Uuid,
    pub path_content: String,
    pub create_time: DateTime<Utc>,
    pub modules: Vec<ModuleSummary>,
}

impl From<GeneratedModule> for ModuleSummary {
    fn from(value: GeneratedModule) -> Self {
        let module = value.module;
        Self {
            id: module.id(),
            name: module.name().to_string(),
            tier: module.tier(),
            duration_hours: module.duration_hours(),
            dependencies: module.dependencies().to_string(),
            skill_points: module.skill_points().to_string(),
            goal: module.goal().to_string(),
            position: module.position(),
            resource_count: value.resource_count,
            exercise_count: value.exercise_count,
        }
    }
}

impl From<GeneratedPath> for GeneratePathResponse {
    fn from(value: GeneratedPath) -> Self {
        Self {
            path_id: value.path.id(),
            path_content: value.path.path_content().to_string(),
            create_time: value.path.create_time(),
            modules: value.modules.into_iter().map(ModuleSummary::from).collect(),
        }
    }
}

/// A stored path with its modules in tree order and the learner's progress.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PathDetailResponse {
    pub path: LearningPath,
    pub modules: Vec<LearningModule>,
    pub progress: Vec<ProgressRecord>,
}
