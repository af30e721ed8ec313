//! Skill tree generation pipeline.
//!
//! Parameters go in, a directive prompt goes to the model, the Markdown tree
//! that comes back is parsed into modules, and every module gets its own
//! resource and quiz round trip. See [`Orchestrator`] for the sequencing and
//! failure policy.

mod params;
pub use params::{ExerciseKind, Level, Pace, ResourceKind, ResourcePreference, Tier, UnknownLabel};

pub mod prompt;
pub mod tree;

pub mod content;
pub use content::{ContentError, ContentResult, ExerciseDraft, ResourceDraft};

mod error;
pub use error::{ContentFailure, GenerationError, GenerationResult, GenerationStage};

mod orchestrator;
pub use orchestrator::{
    ContentOutcome, GeneratedModule, GeneratedPath, GenerationRequest, Orchestrator, Temperatures,
};
