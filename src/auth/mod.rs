mod middleware;
mod password;
mod session;

pub use middleware::{AuthError, RequireUser, SessionId};
pub use password::CredentialHasher;
pub use session::{
    SESSION_COOKIE, expired_session_cookie, generate_session_id, parse_session_cookie,
    session_cookie,
};
