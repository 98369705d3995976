//! HTTP handlers for Skycast
//!
//! ## Endpoints
//! - GET  /            - Redirect to the dashboard (guard decides from there)
//! - GET  /login       - Login form
//! - GET  /signup      - Signup form
//! - POST /signup      - Register a new user
//! - POST /login       - Authenticate and establish a session
//! - GET  /dashboard   - Protected dashboard page (session required)
//! - GET  /logout      - Destroy the session
//! - GET  /healthcheck - Liveness probe

pub mod models;

mod dashboard;
mod login;
mod logout;
mod pages;
mod signup;

pub use dashboard::dashboard_handler;
pub use login::login_handler;
pub use logout::logout_handler;
pub use pages::{
    healthcheck_handler, index_handler, login_page, script_asset, signup_page, style_asset,
    StaticDir,
};
pub use signup::signup_handler;

use actix_web::{HttpRequest, HttpResponse};
use models::AuthErrorResponse;
use skycast_auth::AuthError;
use std::net::IpAddr;

/// Map authentication errors to HTTP responses.
///
/// Storage and hashing failures are logged with detail server-side; the
/// client only ever sees a generic message. Duplicate errors keep the
/// original's plain-text 409 bodies.
pub(crate) fn map_auth_error_to_response(err: AuthError) -> HttpResponse {
    match err {
        AuthError::Validation(errors) => {
            HttpResponse::BadRequest().json(models::ValidationErrorResponse::new(errors))
        }
        AuthError::DuplicateUsername => {
            HttpResponse::Conflict().body("Username already taken.")
        }
        AuthError::DuplicateEmail => {
            HttpResponse::Conflict().body("Email already registered.")
        }
        AuthError::InvalidCredentials => HttpResponse::Unauthorized()
            .json(AuthErrorResponse::new("unauthorized", "Invalid username or password")),
        AuthError::Storage(detail) => {
            log::error!("Credential store failure: {}", detail);
            HttpResponse::InternalServerError()
                .json(AuthErrorResponse::new("internal_error", "Internal Server Error"))
        }
        AuthError::Hashing(detail) => {
            log::error!("Password hashing failure: {}", detail);
            HttpResponse::InternalServerError()
                .json(AuthErrorResponse::new("internal_error", "Internal Server Error"))
        }
    }
}

/// HTTP 429 body for rate-limited auth attempts.
pub(crate) fn too_many_requests() -> HttpResponse {
    HttpResponse::TooManyRequests().json(AuthErrorResponse::new(
        "rate_limited",
        "Too many authentication attempts. Please retry shortly.",
    ))
}

/// Extract the client IP, handling reverse proxies.
///
/// Localhost values inside proxy headers are rejected so a remote client
/// cannot spoof `X-Forwarded-For: 127.0.0.1` past the rate limiter.
pub(crate) fn extract_client_ip(req: &HttpRequest) -> IpAddr {
    if let Some(forwarded) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            // "client, proxy1, proxy2" - the first entry is the client
            if let Some(first_ip) = forwarded_str.split(',').next() {
                let trimmed = first_ip.trim();
                if !is_localhost_header_value(trimmed) {
                    if let Ok(ip) = trimmed.parse::<IpAddr>() {
                        return ip;
                    }
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(real_ip_str) = real_ip.to_str() {
            let trimmed = real_ip_str.trim();
            if !is_localhost_header_value(trimmed) {
                if let Ok(ip) = trimmed.parse::<IpAddr>() {
                    return ip;
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| IpAddr::from([127, 0, 0, 1]))
}

#[inline]
fn is_localhost_header_value(ip: &str) -> bool {
    ip == "::1" || ip.starts_with("127.") || ip.eq_ignore_ascii_case("localhost")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_header_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_localhost_spoof_rejected() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "127.0.0.1"))
            .insert_header(("X-Real-IP", "::1"))
            .to_http_request();
        // Falls through to the (absent) peer address default
        assert_eq!(extract_client_ip(&req), IpAddr::from([127, 0, 0, 1]));
    }
}
