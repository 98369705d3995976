// Skycast session library
// Server-side session table, HMAC-signed session tokens, and cookie helpers.

pub mod cookie;
pub mod error;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use cookie::{create_logout_cookie, create_session_cookie, CookieConfig, SESSION_COOKIE_NAME};
pub use error::SessionError;
pub use store::{CurrentUser, Session, SessionStore};
pub use token::TokenSigner;
