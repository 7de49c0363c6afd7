use std::sync::Arc;
use user_import_api::{
    config::Config,
    infrastructure::{
        database::pool::create_pool, reports::xlsx_error_report::XlsxErrorReportStore,
        repositories::sqlx_user_repository::SqlxUserRepository,
    },
    presentation::http::{routes::create_router, state::AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,user_import_api=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let db = create_pool(&config.database, config.database_max_connections).await?;
    if config.run_migrations {
        let mut migrator = sqlx::migrate!("./migrations");
        migrator.set_ignore_missing(config.ignore_missing_migrations);
        migrator.run(&db).await?;
    }

    let state = AppState {
        config: config.clone(),
        user_repo: Arc::new(SqlxUserRepository::new(db)),
        error_reports: Arc::new(XlsxErrorReportStore::new(config.error_file_path.clone())),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("User import service listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

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
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
