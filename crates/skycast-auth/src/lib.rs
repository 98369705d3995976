// Skycast authentication library
// Provides the user record model, the file-backed credential store,
// bcrypt password hashing, and signup input validation.

pub mod error;
pub mod password;
pub mod store;
pub mod user;
pub mod validation;

// Re-export commonly used types
pub use error::{AuthError, AuthResult};
pub use password::{hash_password, verify_dummy_password, verify_password, warm_dummy_hash};
pub use store::{CredentialStore, FileCredentialStore};
pub use user::User;
pub use validation::{
    escape_html, validate_signup, FieldError, SignupInput, ValidatedSignup, ValidationPolicy,
};
