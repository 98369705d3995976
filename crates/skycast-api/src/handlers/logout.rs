//! Logout handler

use actix_web::{web, HttpRequest, HttpResponse};
use skycast_configs::SessionSettings;
use skycast_session::{create_logout_cookie, CookieConfig, SessionStore, SESSION_COOKIE_NAME};
use std::sync::Arc;

/// GET /logout
///
/// Destroys the server-side session (a no-op for unknown or already-cleared
/// tokens) and expires the cookie. Only a teardown failure yields a 500; a
/// visitor without a session is redirected like everyone else.
pub async fn logout_handler(
    req: HttpRequest,
    sessions: web::Data<Arc<SessionStore>>,
    session_settings: web::Data<SessionSettings>,
) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE_NAME) {
        if let Err(e) = sessions.destroy(cookie.value()) {
            log::error!("Session teardown failed: {}", e);
            return HttpResponse::InternalServerError().body("Error logging out.");
        }
    }

    let cookie_config = CookieConfig {
        secure: session_settings.cookie_secure,
        ..Default::default()
    };
    HttpResponse::Found()
        .insert_header(("Location", "/login"))
        .cookie(create_logout_cookie(&cookie_config))
        .finish()
}
