use swatch_server::config::Config;
use swatch_server::server::{build_router, create_app_state};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Config: max_colors={}, resize_area={}, file_root={:?}",
        config.max_colors,
        config.resize_area,
        config.file_root
    );

    let state = match create_app_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
