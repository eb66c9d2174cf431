use std::net::SocketAddr;
use dotenvy::dotenv;

use donor_registry::config;
use donor_registry::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();

    // Fail early with a readable message instead of a connect error
    if std::env::var("DATABASE_URL").is_err() {
        return Err(Box::<dyn std::error::Error + Send + Sync>::from(
            "Error: DATABASE_URL is not set. Copy `.env.example` to `.env` and update credentials, or set DATABASE_URL in your environment. See README.md for details.",
        ));
    }

    tracing_subscriber::fmt::init();

    // Connect to MySQL and apply pending migrations before serving anything
    let db_pool = config::database::establish_connection().await?;

    // Router with CORS configured from env
    let app = create_app(db_pool.clone());

    let port: u16 = std::env::var("APP_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .expect("APP_PORT must be a valid u16 number");
    let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("APP_HOST:APP_PORT must form a valid socket address");

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let server = axum::serve(listener, app.into_make_service());

    let shutdown_signal = async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
    };

    tokio::select! {
        res = server => {
            res.map_err(|e| {
                Box::<dyn std::error::Error + Send + Sync>::from(std::io::Error::other(
                    format!("Failed to serve application: {}", e),
                ))
            })?;
        }
        _ = shutdown_signal => {
            tracing::info!("Shutdown requested; exiting");
        }
    };

    Ok(())
}
