mod auth;

pub use auth::{bearer_or_cookie_token, require_session, wants_html, SESSION_COOKIE};
