use std::fmt;

use thiserror::Error;

use crate::{generation::ContentError, llm::LlmError, model::DatabaseError};

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Where a generation run currently is; attached to log events and fatal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    PromptingTree,
    ParsingTree,
    PersistingPath,
    PersistingModule,
    PromptingResources,
    NormalizingResources,
    PersistingResources,
    PromptingQuiz,
    NormalizingQuiz,
    PersistingQuiz,
    Complete,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PromptingTree => "prompting-tree",
            Self::ParsingTree => "parsing-tree",
            Self::PersistingPath => "persisting-path",
            Self::PersistingModule => "persisting-module",
            Self::PromptingResources => "prompting-resources",
            Self::NormalizingResources => "normalizing-resources",
            Self::PersistingResources => "persisting-resources",
            Self::PromptingQuiz => "prompting-quiz",
            Self::NormalizingQuiz => "normalizing-quiz",
            Self::PersistingQuiz => "persisting-quiz",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures that abort a whole generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model call failed at {stage}: {source}")]
    Gateway {
        stage: GenerationStage,
        #[source]
        source: LlmError,
    },
    #[error("no modules could be parsed from the skill tree")]
    Parse,
    #[error("store failed at {stage}: {source}")]
    Store {
        stage: GenerationStage,
        #[source]
        source: DatabaseError,
    },
}

impl GenerationError {
    pub fn stage(&self) -> GenerationStage {
        match self {
            Self::Gateway { stage, .. } | Self::Store { stage, .. } => *stage,
            Self::Parse => GenerationStage::ParsingTree,
        }
    }

    pub(crate) fn store(stage: GenerationStage) -> impl FnOnce(DatabaseError) -> Self {
        move |source| Self::Store { stage, source }
    }
}

/// Why a per-module resource or quiz sub-flow produced nothing.
#[derive(Debug, Error)]
pub enum ContentFailure {
    #[error("model call failed: {0}")]
    Gateway(#[from] LlmError),
    #[error("response could not be normalized: {0}")]
    Normalize(#[from] ContentError),
}
