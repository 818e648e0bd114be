pub mod handlers;
pub mod params;
pub mod responses;

use axum::routing::get;
use axum::Router;

use crate::domain::service::InstrumentService;
use crate::storage::InstrumentStore;

pub fn build_router<S: InstrumentStore + Clone>(service: InstrumentService<S>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/v1/collections/{kind}/{direction}",
            get(handlers::list_instruments::<S>).post(handlers::create_instrument::<S>),
        )
        .route(
            "/api/v1/instruments/{id}",
            get(handlers::get_instrument::<S>).patch(handlers::update_instrument::<S>),
        )
        .route("/api/v1/dashboard", get(handlers::dashboard::<S>))
        .with_state(service)
}
