use std::sync::Arc;

use attendance_payroll::api::{AppState, create_router};
use attendance_payroll::clock::SystemClock;
use attendance_payroll::config::{ConfigLoader, Settings};
use attendance_payroll::store::MemoryStore;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance_payroll=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let reference = ConfigLoader::load(&settings.reference_data_dir)?;
    tracing::info!(
        company = %reference.company().name,
        dir = %settings.reference_data_dir.display(),
        "Reference data loaded"
    );

    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        reference,
        Arc::new(SystemClock),
    );
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = settings.addr();
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
