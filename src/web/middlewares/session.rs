use axum::{extract::Request, middleware::Next, response::Response};
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use uuid::Uuid;

use crate::web::SessionContext;

pub static SESSION_COOKIE: &str = "SID";

pub(crate) fn session_cookie(sid: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, sid.to_string());
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie
}

/// Resolves the learner session id from the `SID` cookie, issuing a new id
/// when the cookie is missing or malformed. The session itself is only stored
/// once a handler writes to it.
pub async fn session_context_fn(cookies: Cookies, mut req: Request, next: Next) -> Response {
    let known = cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<Uuid>().ok());

    let sid = match known {
        Some(sid) => sid,
        None => {
            let sid = Uuid::new_v4();
            tracing::debug!("issued learner session id {}", sid);
            cookies.add(session_cookie(sid));
            sid
        }
    };

    req.extensions_mut().insert(SessionContext::new(sid));
    next.run(req).await
}
