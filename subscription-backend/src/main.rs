// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use migration::{Migrator, MigratorTrait};
use subscription_backend::api::handlers::subscription_handler::subscription_router;
use subscription_backend::api::AppState;
use subscription_backend::config::Config;
use subscription_backend::db::create_db_pool;
use subscription_backend::middleware::request_logger::request_logger;
use subscription_backend::service::subscription_service::SubscriptionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subscription_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Subscription Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().expect("Failed to load configuration");

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    // 未適用のマイグレーションを起動時に実行
    Migrator::up(&db_pool, None)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied.");

    // サービスとルーターの設定
    let subscription_service = Arc::new(SubscriptionService::new(db_pool.clone()));
    let app_state = AppState::new(subscription_service);
    let app_router = subscription_router(app_state)
        .layer(axum::middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http());

    // サーバーの起動
    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited properly");

    Ok(())
}

/// SIGINT (Ctrl+C) または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down server...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down server...");
        }
    }
}
