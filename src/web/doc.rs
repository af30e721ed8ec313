use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub struct SessionCookieModifier;

impl Modify for SessionCookieModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "SID",
                    "Learner session id, issued on first request",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::paths::path_generate_handler,
        crate::web::routes::paths::path_page_handler,
        crate::web::routes::paths::path_get_handler,
        crate::web::routes::paths::path_accuracy_handler,
        crate::web::routes::resources::resources_list_handler,
        crate::web::routes::exercises::exercises_list_handler,
        crate::web::routes::progress::progress_upsert_handler,
        crate::web::routes::answers::answer_upsert_handler,
        crate::web::routes::session::session_get_handler,
        crate::web::routes::session::session_delete_handler,
    ),
    modifiers(&SessionCookieModifier),
    tags(
        (name = "paths", description = "Skill tree generation and browsing"),
        (name = "content", description = "Per-module resources and exercises"),
        (name = "progress", description = "Learner answers and module progress"),
        (name = "session", description = "Learner session context"),
    )
)]
pub struct ApiDoc;
