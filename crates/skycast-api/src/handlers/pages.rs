//! Static page handlers: forms, assets, root redirect, healthcheck.

use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::path::PathBuf;

/// Directory the front-end pages and assets are served from.
#[derive(Debug, Clone)]
pub struct StaticDir(pub PathBuf);

impl StaticDir {
    fn join(&self, file: &str) -> PathBuf {
        self.0.join(file)
    }
}

/// Serve one file from the static directory, or 404 if it is missing.
pub(crate) async fn serve_static(
    req: &HttpRequest,
    static_dir: &StaticDir,
    file: &str,
) -> HttpResponse {
    match NamedFile::open_async(static_dir.join(file)).await {
        Ok(named) => named.into_response(req),
        Err(e) => {
            log::error!("Failed to serve static file {}: {}", file, e);
            HttpResponse::NotFound().body("Not Found")
        }
    }
}

/// GET / - the root always points at the dashboard; the session guard
/// bounces unauthenticated visitors to /login from there.
pub async fn index_handler() -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", "/dashboard"))
        .finish()
}

/// GET /login
pub async fn login_page(req: HttpRequest, static_dir: web::Data<StaticDir>) -> HttpResponse {
    serve_static(&req, &static_dir, "login.html").await
}

/// GET /signup
pub async fn signup_page(req: HttpRequest, static_dir: web::Data<StaticDir>) -> HttpResponse {
    serve_static(&req, &static_dir, "signup.html").await
}

/// GET /style.css
pub async fn style_asset(req: HttpRequest, static_dir: web::Data<StaticDir>) -> HttpResponse {
    serve_static(&req, &static_dir, "style.css").await
}

/// GET /script.js
pub async fn script_asset(req: HttpRequest, static_dir: web::Data<StaticDir>) -> HttpResponse {
    serve_static(&req, &static_dir, "script.js").await
}

/// GET /healthcheck
pub async fn healthcheck_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
