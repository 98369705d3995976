//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting that would otherwise live in
//! `main.rs`: building the shared application state, wiring the HTTP
//! server, and coordinating graceful shutdown.

use crate::middleware;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::{debug, info, warn};
use skycast_api::{routes, RateLimiter};
use skycast_auth::{CredentialStore, FileCredentialStore};
use skycast_configs::ServerConfig;
use skycast_session::SessionStore;
use std::sync::Arc;

/// Aggregated application components shared across the HTTP server and
/// shutdown handling.
pub struct ApplicationComponents {
    pub credential_store: Arc<dyn CredentialStore>,
    pub sessions: Arc<SessionStore>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// Build the credential store, session store, and rate limiter.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let users_file = config.storage.users_file();
    if let Some(dir) = users_file.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let credential_store: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(&users_file));
    info!("Credential store at {}", users_file.display());

    // Validated during config finalize; absent here means a wiring bug
    let secret = config
        .session
        .secret
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Session secret is not configured"))?;
    let sessions = Arc::new(SessionStore::new(secret, config.session.ttl_hours));
    debug!("Session store initialized (ttl={}h)", config.session.ttl_hours);

    // Precompute the unknown-user dummy hash so no login request pays the
    // one-time hashing cost and shows up in response timing
    skycast_auth::warm_dummy_hash(config.auth.bcrypt_cost).await?;
    debug!("Dummy credential hash precomputed (cost={})", config.auth.bcrypt_cost);

    let rate_limiter = Arc::new(RateLimiter::with_config(&config.rate_limit));
    if config.rate_limit.enabled {
        debug!(
            "Rate limiter initialized ({} auth attempts/min per IP)",
            config.rate_limit.max_auth_attempts_per_min
        );
    } else {
        warn!("Auth rate limiting is DISABLED");
    }

    let static_dir = config.storage.static_dir();
    if !static_dir.is_dir() {
        warn!(
            "Static directory {} does not exist; pages will 404",
            static_dir.display()
        );
    }

    Ok(ApplicationComponents {
        credential_store,
        sessions,
        rate_limiter,
    })
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };
    info!("Server config: workers={}", workers);

    let credential_store = components.credential_store.clone();
    let sessions = components.sessions.clone();
    let rate_limiter = components.rate_limiter.clone();

    let auth_settings = config.auth.clone();
    let session_settings = config.session.clone();
    let static_dir = config.storage.static_dir();

    let server = HttpServer::new(move || {
        let sessions = sessions.clone();
        let static_dir = static_dir.clone();
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::error_handlers())
            .app_data(web::Data::new(credential_store.clone()))
            .app_data(web::Data::new(rate_limiter.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .app_data(web::Data::new(session_settings.clone()))
            .configure(move |cfg| routes::configure(cfg, sessions, static_dir))
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            if let Err(e) = result {
                log::error!("Server task failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            drop(components);
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
