// Skycast HTTP API
// Handlers, session guard middleware, auth rate limiting, and route wiring.

pub mod handlers;
pub mod limiter;
pub mod middleware;
pub mod routes;

pub use limiter::RateLimiter;
pub use middleware::SessionGuard;
