use std::net::SocketAddr;

use dotenvy::dotenv;
use praieira_api::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) so DATABASE_URL from file is visible
    let _ = dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let db = praieira_api::db::connect().await?;

    // Run our server
    let app = create_app(AppState::from_env(db));
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
