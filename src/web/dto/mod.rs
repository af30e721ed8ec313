mod paths;
pub use paths::{GeneratePathResponse, ModuleSummary, PathDetailResponse};

mod exercises;
pub use exercises::ExerciseResponse;

mod progress;
pub use progress::{AnswerUpsertResponse, ProgressUpsertResponse};
