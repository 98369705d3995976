//! Signup handler

use crate::handlers::models::SignupRequest;
use crate::handlers::{extract_client_ip, map_auth_error_to_response, too_many_requests};
use crate::limiter::RateLimiter;
use actix_web::{web, HttpRequest, HttpResponse};
use skycast_auth::{
    hash_password, validate_signup, CredentialStore, SignupInput, User, ValidationPolicy,
};
use skycast_configs::AuthSettings;
use std::sync::Arc;

/// POST /signup
///
/// Validates the submitted fields, checks username and email uniqueness,
/// hashes the password off the async runtime and appends the record. The
/// store's `append` re-checks uniqueness under its write lock, so a race
/// between two signups still yields exactly one 409.
pub async fn signup_handler(
    req: HttpRequest,
    form: web::Form<SignupRequest>,
    store: web::Data<Arc<dyn CredentialStore>>,
    auth_settings: web::Data<AuthSettings>,
    limiter: web::Data<Arc<RateLimiter>>,
) -> HttpResponse {
    let ip = extract_client_ip(&req);
    if !limiter.check_auth_rate(ip) {
        log::warn!("Signup rate limit exceeded for {}", ip);
        return too_many_requests();
    }

    let form = form.into_inner();
    let policy = ValidationPolicy {
        min_username_length: auth_settings.min_username_length,
        min_password_length: auth_settings.min_password_length,
        max_password_length: auth_settings.max_password_length,
    };

    let input = SignupInput {
        username: form.username,
        email: form.email,
        password: form.password,
    };
    let validated = match validate_signup(&input, &policy) {
        Ok(validated) => validated,
        Err(errors) => {
            log::debug!("Signup validation failed: {} field error(s)", errors.len());
            return map_auth_error_to_response(skycast_auth::AuthError::Validation(errors));
        }
    };

    // Cheap duplicate pre-check so a taken username fails before the
    // bcrypt work. The append below remains the authoritative check.
    match store.load().await {
        Ok(users) => {
            if users.iter().any(|u| u.username == validated.username) {
                return map_auth_error_to_response(skycast_auth::AuthError::DuplicateUsername);
            }
            if users.iter().any(|u| u.email == validated.email) {
                return map_auth_error_to_response(skycast_auth::AuthError::DuplicateEmail);
            }
        }
        Err(e) => return map_auth_error_to_response(e),
    }

    let password_hash =
        match hash_password(&validated.password, Some(auth_settings.bcrypt_cost)).await {
            Ok(hash) => hash,
            Err(e) => return map_auth_error_to_response(e),
        };

    let user = User::new(validated.username.clone(), validated.email, password_hash);
    if let Err(e) = store.append(user).await {
        return map_auth_error_to_response(e);
    }

    log::info!("New user registered: {}", validated.username);
    HttpResponse::Found()
        .insert_header(("Location", "/login"))
        .finish()
}
