use std::net::SocketAddr;
use std::sync::Arc;

use surrealdb::engine::any;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mokki_server::auth::SessionService;
use mokki_server::config::ServerConfig;
use mokki_server::email::EmailService;
use mokki_server::routes::create_router;
use mokki_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::init()?;

    let db = any::connect(&config.database_url).await.map_err(|e| {
        format!("Failed to connect to SurrealDB at '{}': {}", config.database_url, e)
    })?;
    db.use_ns(&config.database_namespace)
        .use_db(&config.database_name)
        .await
        .map_err(|e| format!("Failed to select namespace/database: {}", e))?;

    let jwt_secret = std::env::var("MOKKI_JWT_SECRET")
        .map(|s| s.into_bytes())
        .unwrap_or_else(|_| {
            warn!("MOKKI_JWT_SECRET not set, generating random secret (not suitable for production)");
            use rand::RngCore;
            let mut secret = vec![0u8; 64];
            rand::rng().fill_bytes(&mut secret);
            secret
        });

    let session_service = Arc::new(SessionService::new(
        &jwt_secret,
        config.session_ttl_secs,
        db.clone(),
    ));

    let email_service = if config.email_config.enabled {
        Some(Arc::new(EmailService::new(
            &config.email_config,
            config.base_url.clone(),
        )?))
    } else {
        info!("email disabled; action links will be logged instead of sent");
        None
    };

    let state = AppState::new(db, config, session_service, email_service);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to address {}: {}", addr, e))?;
    info!("mokki house server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
