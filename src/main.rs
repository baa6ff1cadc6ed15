use rust_checkers::api::healthcheck;
use rust_checkers::api::router::create_router;
use rust_checkers::api::state::AppState;
use rust_checkers::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --health-check flag for Docker HEALTHCHECK (works in scratch image).
    if std::env::args().any(|a| a == "--health-check") {
        match healthcheck::check(AppConfig::from_env().port).await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Health check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    // Initialize tracing (structured logging).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_checkers=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr();
    let max_games = config.max_games;
    let state = AppState::new(config);

    let app = create_router(state);

    tracing::info!(
        "rust-checkers v{} starting on {bind_addr} (max {} games)",
        env!("CARGO_PKG_VERSION"),
        max_games
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
