//! Request and response models for the auth endpoints

mod error_response;
mod login_request;
mod signup_request;

pub use error_response::{AuthErrorResponse, ValidationErrorResponse};
pub use login_request::LoginRequest;
pub use signup_request::SignupRequest;
