//! Route table for the HTTP server.

use crate::handlers::{
    dashboard_handler, healthcheck_handler, index_handler, login_handler, login_page,
    logout_handler, script_asset, signup_handler, signup_page, style_asset, StaticDir,
};
use crate::middleware::SessionGuard;
use actix_web::web;
use skycast_session::SessionStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Register every route and the shared state the handlers extract.
///
/// The credential store, settings, and rate limiter are registered by the
/// server bootstrap; this function owns the session store and static
/// directory because the dashboard guard needs them at wiring time.
pub fn configure(cfg: &mut web::ServiceConfig, sessions: Arc<SessionStore>, static_dir: PathBuf) {
    cfg.app_data(web::Data::new(sessions.clone()))
        .app_data(web::Data::new(StaticDir(static_dir)))
        .route("/", web::get().to(index_handler))
        .route("/login", web::get().to(login_page))
        .route("/login", web::post().to(login_handler))
        .route("/signup", web::get().to(signup_page))
        .route("/signup", web::post().to(signup_handler))
        .route("/logout", web::get().to(logout_handler))
        .route("/style.css", web::get().to(style_asset))
        .route("/script.js", web::get().to(script_asset))
        .route("/healthcheck", web::get().to(healthcheck_handler))
        .service(
            web::resource("/dashboard")
                .wrap(SessionGuard::new(sessions))
                .route(web::get().to(dashboard_handler)),
        );
}
