use serde::Deserialize;
use uuid::Uuid;

use crate::config::Llm;
use crate::generation::content::{self, ContentResult, ExerciseDraft, ResourceDraft};
use crate::generation::prompt::{build_quiz_prompt, build_resource_prompt, build_tree_prompt};
use crate::generation::tree::{ParsedModule, parse_tree};
use crate::generation::{
    ContentFailure, GenerationError, GenerationResult, GenerationStage, Level, Pace,
    ResourcePreference,
};
use crate::llm::ModelGateway;
use crate::model::LearningStore;
use crate::model::entity::{
    ExerciseCreate, LearningModule, LearningModuleCreate, LearningPath, LearningPathCreate,
    LearningResourceCreate,
};

/// Sampling temperatures for the two kinds of model calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    pub tree: f32,
    pub content: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            tree: 0.5,
            content: 0.3,
        }
    }
}

impl Temperatures {
    pub fn from_config(config: &Llm) -> Self {
        Self {
            tree: config.tree_temperature(),
            content: config.content_temperature(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct GenerationRequest {
    /// Free-text learning goal, e.g. "become a backend developer".
    pub target: String,
    pub level: Level,
    pub pace: Pace,
    pub resource_type: ResourcePreference,
}

#[derive(Debug)]
pub struct GeneratedModule {
    pub module: LearningModule,
    pub resource_count: usize,
    pub exercise_count: usize,
}

#[derive(Debug)]
pub struct GeneratedPath {
    pub path: LearningPath,
    pub modules: Vec<GeneratedModule>,
}

/// Result of a per-module resource or quiz round trip.
///
/// A degraded sub-flow counts as zero items; it never fails the request.
#[derive(Debug)]
pub enum ContentOutcome<T> {
    Ready(Vec<T>),
    Degraded { cause: ContentFailure },
}

impl<T> ContentOutcome<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Ready(items) => items,
            Self::Degraded { .. } => Vec::new(),
        }
    }
}

impl<T> From<Result<Vec<T>, ContentFailure>> for ContentOutcome<T> {
    fn from(result: Result<Vec<T>, ContentFailure>) -> Self {
        match result {
            Ok(items) => Self::Ready(items),
            Err(cause) => Self::Degraded { cause },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SubFlow {
    Resources,
    Quiz,
}

impl SubFlow {
    fn failed_at(self, cause: &ContentFailure) -> GenerationStage {
        match (self, cause) {
            (Self::Resources, ContentFailure::Gateway(_)) => GenerationStage::PromptingResources,
            (Self::Resources, ContentFailure::Normalize(_)) => GenerationStage::NormalizingResources,
            (Self::Quiz, ContentFailure::Gateway(_)) => GenerationStage::PromptingQuiz,
            (Self::Quiz, ContentFailure::Normalize(_)) => GenerationStage::NormalizingQuiz,
        }
    }

    fn persisting(self) -> GenerationStage {
        match self {
            Self::Resources => GenerationStage::PersistingResources,
            Self::Quiz => GenerationStage::PersistingQuiz,
        }
    }
}

/// Runs one generation request end to end.
///
/// Modules are handled strictly in parse order: a module row must exist
/// before its resources and exercises can reference it. Tree failures and
/// store failures abort the request, per-module content failures do not.
pub struct Orchestrator<'a> {
    gateway: &'a dyn ModelGateway,
    store: &'a dyn LearningStore,
    temperatures: Temperatures,
}

impl<'a> Orchestrator<'a> {
    pub fn new(gateway: &'a dyn ModelGateway, store: &'a dyn LearningStore, temperatures: Temperatures) -> Self {
        Self {
            gateway,
            store,
            temperatures,
        }
    }

    #[tracing::instrument(skip_all, fields(target = %request.target, level = %request.level))]
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedPath> {
        tracing::debug!(stage = %GenerationStage::PromptingTree, "requesting skill tree");
        let prompt = build_tree_prompt(&request.target, request.level, request.pace, request.resource_type);
        let tree_text = self
            .gateway
            .submit_prompt(&prompt, self.temperatures.tree)
            .await
            .map_err(|source| GenerationError::Gateway {
                stage: GenerationStage::PromptingTree,
                source,
            })?;

        tracing::debug!(stage = %GenerationStage::ParsingTree, "parsing {} chars", tree_text.len());
        let parsed = parse_tree(&tree_text);
        if parsed.is_empty() {
            tracing::warn!(stage = %GenerationStage::ParsingTree, "no modules in model answer");
            return Err(GenerationError::Parse);
        }

        let path = self
            .store
            .insert_path(LearningPathCreate {
                target: request.target.clone(),
                level: request.level,
                pace: request.pace,
                resource_type: request.resource_type,
                path_content: tree_text,
            })
            .await
            .map_err(GenerationError::store(GenerationStage::PersistingPath))?;
        tracing::info!(path_id = %path.id(), "stored path with {} modules", parsed.len());

        let mut modules = Vec::with_capacity(parsed.len());
        for (position, parsed) in parsed.into_iter().enumerate() {
            let generated = self.generate_module(path.id(), request, position, parsed).await?;
            modules.push(generated);
        }

        tracing::info!(stage = %GenerationStage::Complete, path_id = %path.id(), "generation finished");
        Ok(GeneratedPath { path, modules })
    }

    #[tracing::instrument(skip_all, fields(module = %parsed.name, position = position))]
    async fn generate_module(
        &self,
        path_id: Uuid,
        request: &GenerationRequest,
        position: usize,
        parsed: ParsedModule,
    ) -> GenerationResult<GeneratedModule> {
        let module = self
            .store
            .insert_module(LearningModuleCreate {
                path_id,
                name: parsed.name,
                tier: parsed.tier,
                duration_hours: parsed.duration_hours,
                dependencies: parsed.dependencies,
                skill_points: parsed.skill_points,
                goal: parsed.goal,
                position: position as i32,
            })
            .await
            .map_err(GenerationError::store(GenerationStage::PersistingModule))?;

        let resources = self.fetch_resources(&module, request).await;
        let resources = settle(resources, SubFlow::Resources, &module);
        let resource_count = self
            .store
            .insert_resources(resources)
            .await
            .map_err(GenerationError::store(SubFlow::Resources.persisting()))?;

        let exercises = self.fetch_exercises(&module, request).await;
        let exercises = settle(exercises, SubFlow::Quiz, &module);
        let exercise_count = self
            .store
            .insert_exercises(exercises)
            .await
            .map_err(GenerationError::store(SubFlow::Quiz.persisting()))?;

        tracing::debug!("module done: {} resources, {} exercises", resource_count, exercise_count);
        Ok(GeneratedModule {
            module,
            resource_count,
            exercise_count,
        })
    }

    async fn fetch_resources(
        &self,
        module: &LearningModule,
        request: &GenerationRequest,
    ) -> ContentOutcome<LearningResourceCreate> {
        let prompt = build_resource_prompt(module.name(), request.level, request.resource_type);
        self.fetch_content(&prompt, content::resource_drafts)
            .await
            .map(|drafts| drafts.into_iter().map(|d| resource_row(module.id(), d)).collect())
            .into()
    }

    async fn fetch_exercises(
        &self,
        module: &LearningModule,
        request: &GenerationRequest,
    ) -> ContentOutcome<ExerciseCreate> {
        let prompt = build_quiz_prompt(module.name(), request.level);
        self.fetch_content(&prompt, content::exercise_drafts)
            .await
            .map(|drafts| drafts.into_iter().map(|d| exercise_row(module.id(), d)).collect())
            .into()
    }

    /// Every draft is normalized before anything is returned, so a failing
    /// response yields no rows at all.
    async fn fetch_content<T>(
        &self,
        prompt: &str,
        normalize: fn(&str) -> ContentResult<Vec<T>>,
    ) -> Result<Vec<T>, ContentFailure> {
        let text = self
            .gateway
            .submit_prompt(prompt, self.temperatures.content)
            .await?;
        Ok(normalize(&text)?)
    }
}

fn settle<T>(outcome: ContentOutcome<T>, flow: SubFlow, module: &LearningModule) -> Vec<T> {
    if let ContentOutcome::Degraded { cause } = &outcome {
        tracing::warn!(
            stage = %flow.failed_at(cause),
            module = module.name(),
            "storing no {:?} for module: {}",
            flow,
            cause
        );
    }
    outcome.into_items()
}

fn resource_row(module_id: Uuid, draft: ResourceDraft) -> LearningResourceCreate {
    LearningResourceCreate {
        module_id,
        title: draft.title,
        url: draft.url,
        source: draft.source,
        resource_type: draft.kind,
        tag: draft.tag,
    }
}

fn exercise_row(module_id: Uuid, draft: ExerciseDraft) -> ExerciseCreate {
    ExerciseCreate {
        module_id,
        exercise_type: draft.kind,
        question: draft.question,
        answer: draft.answer,
        explanation: draft.explanation,
        difficulty: draft.difficulty,
        options: draft.options,
    }
}
