//! Session guard middleware.
//!
//! Wraps protected routes. A request carrying a valid, unexpired session
//! cookie passes through with `CurrentUser` attached to its extensions;
//! anything else is redirected to the login page before the handler runs.

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use skycast_session::{CurrentUser, SessionStore, SESSION_COOKIE_NAME};
use std::future::{ready, Ready};
use std::sync::Arc;

/// Session guard middleware factory.
#[derive(Clone)]
pub struct SessionGuard {
    sessions: Arc<SessionStore>,
}

impl SessionGuard {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service,
            sessions: self.sessions.clone(),
        }))
    }
}

/// The per-request service produced by `SessionGuard`.
pub struct SessionGuardMiddleware<S> {
    service: S,
    sessions: Arc<SessionStore>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = req
            .cookie(SESSION_COOKIE_NAME)
            .and_then(|cookie| self.sessions.authenticate(cookie.value()));

        match session {
            Some(session) => {
                req.extensions_mut().insert(CurrentUser {
                    username: session.username,
                });

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            None => {
                log::debug!("Unauthenticated request to {}, redirecting", req.path());
                let response = HttpResponse::Found()
                    .insert_header(("Location", "/login"))
                    .finish();

                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}
