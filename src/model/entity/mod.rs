mod learning_path;
pub use learning_path::{LearningPath, LearningPathCreate};

mod module;
pub use module::{LearningModule, LearningModuleCreate};

mod resource;
pub use resource::{LearningResource, LearningResourceCreate};

mod exercise;
pub use exercise::{Exercise, ExerciseCreate};

mod answer;
pub use answer::{AnswerRecord, AnswerRecordUpsert, AnswerStats};

mod user_progress;
pub use user_progress::{ProgressRecord, ProgressRecordUpsert};
