//! Server-wide middleware configuration helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for logging and the catch-all error rewrite.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{self, ErrorHandlerResponse, ErrorHandlers};

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::default()
}

/// Rewrite unhandled 500s to a fixed plain-text body.
///
/// Only responses produced from an actual error (extractor failures,
/// handler `Err` returns) are rewritten; a 500 a handler built itself
/// keeps its body.
pub fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, render_500)
}

fn render_500<B: 'static>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if res.response().error().is_none() {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    if let Some(err) = res.response().error() {
        log::error!("Unhandled error on {}: {}", res.request().path(), err);
    }

    let res = res.map_body(|_, _| BoxBody::new("Something broke!"));
    Ok(ErrorHandlerResponse::Response(res.map_into_right_body()))
}
