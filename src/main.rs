use instrument_desk::api::build_router;
use instrument_desk::config::AppConfig;
use instrument_desk::domain::service::InstrumentService;
use instrument_desk::storage::memory::InMemoryStorage;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        default_page_size = config.default_page_size,
        criteria_mode = ?config.criteria_mode,
        "configuration loaded"
    );

    let storage = InMemoryStorage::new();
    let service = InstrumentService::with_config(storage, &config);
    let app = build_router(service).layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr.as_str())
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
