mod context;
pub use context::{LearnerSession, SessionAnswer, SessionContext, SessionStore};

mod error;
pub use error::{ErrorResponse, WebError, WebResult};

pub mod dto;

pub mod middlewares;

mod state;
pub use state::AppState;

pub mod routes;

pub mod doc;
