//! HTTP surface: router, shared state and handlers.

mod error;
mod handlers;

pub use error::{ApiError, OFFLINE_MESSAGE};

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, UriSettings};
use crate::dggs::RHealpixDggs;
use crate::models::PageLimits;
use crate::projection::Projector;
use crate::store::PlaceStore;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn PlaceStore>,
    pub uris: UriSettings,
    pub limits: PageLimits,
    pub projector: Projector,
}

impl AppState {
    pub fn new(store: Arc<dyn PlaceStore>, config: &Config) -> Self {
        Self {
            store,
            uris: config.uris.clone(),
            limits: config.register.limits(),
            projector: Projector::new(RHealpixDggs::default(), config.dggs.resolution),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/index.ttl", get(handlers::dataset))
        .route("/place/", get(handlers::place_register))
        .route("/placename/", get(handlers::place_name_register))
        .route("/gazetteer/", get(handlers::gazetteer_register))
        .route("/place/{id}", get(handlers::place))
        .route("/placename/{id}", get(handlers::place_name))
        .route("/gazetteer/{id}", get(handlers::gazetteer))
        .route("/map", get(handlers::map))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
