mod model;
mod server;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    jobs::{JobContext, JobQueue},
    router, scheduler, startup,
    state::AppState,
    storage::Storage,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    startup::seed_admin(&db, &config).await?;

    let storage = Storage::new(&config.storage_path);
    storage.prepare().await?;

    let ctx = JobContext {
        db: db.clone(),
        storage: storage.clone(),
        app_url: config.app_url.clone(),
    };
    let jobs = JobQueue::start(ctx.clone(), config.jobs.clone());

    // Re-queue pending jobs lost across restarts
    let sweep_queue = jobs.clone();
    let stale_after = config.jobs.stale_after;
    tokio::spawn(async move {
        if let Err(e) = scheduler::job_sweep::start_scheduler(ctx, sweep_queue, stale_after).await
        {
            tracing::error!("Stale job sweep scheduler error: {}", e);
        }
    });

    let state = AppState::new(db, storage, jobs, config.app_url.clone());
    let app = router::router(&state)
        .with_state(state)
        .layer(session)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
