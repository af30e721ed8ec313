use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::{
    error::log_error,
    generation::GenerationError,
    llm::LlmError,
    model::{DatabaseError, ResourceType},
};

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("ResourceNotFound: {resource_type:?}")]
    ResourceNotFound { resource_type: ResourceType },

    #[error("ResourceFetchError: {resource_type:?}. Error: {error}")]
    ResourceFetchError {
        resource_type: ResourceType,
        error: DatabaseError,
    },

    #[error("ResourceBadRequest: {resource_type:?}. Reason: {reason}")]
    ResourceBadRequest {
        resource_type: ResourceType,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ServerSessionUnavailable")]
    ServerSessionUnavailable,
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn client_display(&self) -> String {
        String::from("Internal server error.")
    }
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResourceFetchError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ResourceBadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceNotFound { .. } => String::from("Resource error, resource not found."),
            Self::ResourceFetchError { .. } => {
                String::from("Resource error, unable to fetch resource.")
            }
            Self::ResourceBadRequest { reason, .. } => format!("Resource error, bad request: {reason}."),
        }
    }
}

fn generation_status_code(error: &GenerationError) -> StatusCode {
    match error {
        GenerationError::Gateway {
            source: LlmError::Timeout,
            ..
        } => StatusCode::GATEWAY_TIMEOUT,
        GenerationError::Gateway { .. } | GenerationError::Parse => StatusCode::BAD_GATEWAY,
        GenerationError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn generation_client_display(error: &GenerationError) -> String {
    match error {
        GenerationError::Gateway {
            source: LlmError::Timeout,
            ..
        } => String::from("Generation error, the language model did not answer in time."),
        GenerationError::Gateway { .. } => {
            String::from("Generation error, the language model request failed.")
        }
        GenerationError::Parse => {
            String::from("Generation error, no modules could be read from the generated skill tree.")
        }
        GenerationError::Store { .. } => {
            String::from("Generation error, unable to store the generated path.")
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("ResourceError - {0}")]
    ResourceError(#[from] ResourceError),
    #[error("GenerationError - {0}")]
    GenerationError(#[from] GenerationError),
    #[error("ServerError - {0}")]
    ServerError(#[from] ServerError),
}

impl WebError {
    pub fn resource_not_found(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceNotFound {
            resource_type: r#type,
        })
    }

    pub fn resource_fetch_error(r#type: ResourceType, error: DatabaseError) -> Self {
        Self::ResourceError(ResourceError::ResourceFetchError {
            resource_type: r#type,
            error,
        })
    }

    pub fn resource_bad_request<S: Into<String>>(r#type: ResourceType, reason: S) -> Self {
        Self::ResourceError(ResourceError::ResourceBadRequest {
            resource_type: r#type,
            reason: reason.into(),
        })
    }

    pub fn session_unavailable() -> Self {
        Self::ServerError(ServerError::ServerSessionUnavailable)
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            Self::ResourceError(e) => e.status_code(),
            Self::GenerationError(e) => generation_status_code(e),
            Self::ServerError(e) => e.status_code(),
        }
    }

    /// Whether the same request may succeed later, e.g. after a model timeout.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::GenerationError(GenerationError::Gateway { source, .. }) => source.is_retryable(),
            _ => false,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceError(e) => e.client_display(),
            Self::GenerationError(e) => generation_client_display(e),
            Self::ServerError(e) => e.client_display(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message for the client
    pub message: String,
    /// HTTP status code (stringified)
    pub status_code: String,
    /// Set when retrying the same request may succeed
    pub retryable: bool,
    /// Optional debug details (only in debug mode)
    pub details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        log_error(&self);

        let status_code = self.status_code();
        let display = self.client_display();

        let body = ErrorResponse {
            message: display,
            status_code: status_code.as_str().to_string(),
            retryable: self.is_retryable(),
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        };

        (status_code, Json(body)).into_response()
    }
}
