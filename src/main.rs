use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luckydraw::{auth::AuthConfig, config::ServerConfig, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luckydraw=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lucky Draw...");

    let config = ServerConfig::from_env();
    let auth_config = Arc::new(AuthConfig::from_env());

    tracing::info!(
        "Draw defaults: {:?} on {:?} theme, {}s at {}, refill when {:?}",
        config.animation_type,
        config.theme,
        config.draw_settings.spin_duration_secs,
        config.draw_settings.speed_label(),
        config.refill
    );

    let state = AppState::with_config(&config);
    let app = luckydraw::app(state, auth_config);

    tracing::info!("Listening on http://{}", config.bind_addr);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
