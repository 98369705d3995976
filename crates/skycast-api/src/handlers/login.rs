//! Login handler

use crate::handlers::models::LoginRequest;
use crate::handlers::pages::{serve_static, StaticDir};
use crate::handlers::{extract_client_ip, map_auth_error_to_response, too_many_requests};
use crate::limiter::RateLimiter;
use actix_web::{web, HttpRequest, HttpResponse};
use skycast_auth::{verify_dummy_password, verify_password, AuthError, CredentialStore};
use skycast_configs::{AuthSettings, SessionSettings};
use skycast_session::{create_session_cookie, CookieConfig, SessionStore};
use std::sync::Arc;

/// POST /login
///
/// A failed attempt renders the invalid-credentials page with a 200, never
/// a 401, and uses the same status and body whether the username is unknown
/// or the password is wrong. The unknown-username path still pays one bcrypt
/// verification so the two cases are indistinguishable by timing.
pub async fn login_handler(
    req: HttpRequest,
    form: web::Form<LoginRequest>,
    store: web::Data<Arc<dyn CredentialStore>>,
    sessions: web::Data<Arc<SessionStore>>,
    auth_settings: web::Data<AuthSettings>,
    session_settings: web::Data<SessionSettings>,
    static_dir: web::Data<StaticDir>,
    limiter: web::Data<Arc<RateLimiter>>,
) -> HttpResponse {
    let ip = extract_client_ip(&req);
    if !limiter.check_auth_rate(ip) {
        log::warn!("Login rate limit exceeded for {}", ip);
        return too_many_requests();
    }

    let form = form.into_inner();
    let username = form.username.trim();

    let user = match store.find_by_username(username).await {
        Ok(user) => user,
        Err(e) => return map_auth_error_to_response(e),
    };

    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password_hash).await,
        None => verify_dummy_password(&form.password, auth_settings.bcrypt_cost).await,
    };

    match verified {
        Ok(true) => {
            let account = match &user {
                Some(user) => user,
                // unreachable: dummy verification never reports success
                None => return map_auth_error_to_response(AuthError::InvalidCredentials),
            };
            let token = sessions.create(&account.username);
            let cookie_config = CookieConfig {
                secure: session_settings.cookie_secure,
                ..Default::default()
            };
            let cookie =
                create_session_cookie(&token, session_settings.ttl_hours, &cookie_config);

            log::info!("User logged in: {}", account.username);
            HttpResponse::Found()
                .insert_header(("Location", "/dashboard"))
                .cookie(cookie)
                .finish()
        }
        Ok(false) => {
            log::debug!("Failed login attempt from {}", ip);
            serve_static(&req, &static_dir, "invalid.html").await
        }
        Err(e) => map_auth_error_to_response(e),
    }
}
