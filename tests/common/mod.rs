//! Shared fixtures for HTTP integration tests.

use skycast_api::RateLimiter;
use skycast_auth::{CredentialStore, FileCredentialStore};
use skycast_configs::{AuthSettings, RateLimitSettings, SessionSettings};
use skycast_session::SessionStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Everything a test app needs: isolated credential file, session store,
/// and settings with a fast bcrypt cost.
pub struct TestContext {
    // Held for its Drop; the temp dir outlives the store using it
    pub dir: TempDir,
    pub store: Arc<dyn CredentialStore>,
    pub sessions: Arc<SessionStore>,
    pub auth_settings: AuthSettings,
    pub session_settings: SessionSettings,
    pub limiter: Arc<RateLimiter>,
}

impl TestContext {
    pub fn new() -> Self {
        // Effectively unlimited so auth tests never trip the limiter
        Self::with_rate_limit(10_000)
    }

    pub fn with_rate_limit(max_auth_attempts_per_min: u32) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(dir.path().join("users.json")));
        let sessions = Arc::new(SessionStore::new("integration-test-secret", 24));

        let auth_settings = AuthSettings {
            bcrypt_cost: 4,
            ..Default::default()
        };
        let session_settings = SessionSettings {
            secret: Some("integration-test-secret".to_string()),
            ..Default::default()
        };
        let limiter = Arc::new(RateLimiter::with_config(&RateLimitSettings {
            enabled: true,
            max_auth_attempts_per_min,
        }));

        Self {
            dir,
            store,
            sessions,
            auth_settings,
            session_settings,
            limiter,
        }
    }

    pub fn users_file(&self) -> PathBuf {
        self.dir.path().join("users.json")
    }
}

/// The real front-end pages, served straight from the repo.
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Build an in-process test app with the full route table and state wiring.
#[macro_export]
macro_rules! build_app {
    ($ctx:expr) => {{
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.store.clone()))
                .app_data(actix_web::web::Data::new($ctx.limiter.clone()))
                .app_data(actix_web::web::Data::new($ctx.auth_settings.clone()))
                .app_data(actix_web::web::Data::new($ctx.session_settings.clone()))
                .configure({
                    let sessions = $ctx.sessions.clone();
                    let static_dir = $crate::common::static_dir();
                    move |cfg| skycast_api::routes::configure(cfg, sessions, static_dir)
                }),
        )
        .await
    }};
}
