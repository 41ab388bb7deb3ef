use recipe_app::config::AppConfig;
use recipe_app::AppContext;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().expect("Environment misconfigured!");

    let ctx = AppContext::connect(&config)
        .await
        .expect("Failed to initialize database");
    if let Err(e) = ctx.bootstrap.run(&config.bootstrap).await {
        tracing::error!("Bootstrap failed: {}", e);
        std::process::exit(1);
    }

    let app = recipe_api::router(ctx, &config.cors_origin);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
