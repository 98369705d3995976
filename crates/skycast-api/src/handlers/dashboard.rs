//! Dashboard handler
//!
//! Reached only through the session guard, which attaches `CurrentUser`
//! to the request extensions.

use crate::handlers::pages::{serve_static, StaticDir};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use skycast_session::CurrentUser;

/// GET /dashboard
pub async fn dashboard_handler(req: HttpRequest, static_dir: web::Data<StaticDir>) -> HttpResponse {
    if let Some(user) = req.extensions().get::<CurrentUser>() {
        log::debug!("Dashboard served for {}", user.username);
    }
    serve_static(&req, &static_dir, "index.html").await
}
