mod session;
pub use session::{SESSION_COOKIE, session_context_fn};
