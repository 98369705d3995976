//! Request-path middleware for the HTTP layer.

mod session_guard;

pub use session_guard::SessionGuard;
