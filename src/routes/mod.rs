use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::PlayerStore;

pub mod players;

/// Shared handle passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlayerStore>,
}

impl AppState {
    pub fn new(store: impl PlayerStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn build_router(state: AppState, dev_mode: bool) -> Router {
    let mut app = Router::new()
        .route("/players", get(players::get_players))
        .route("/player", post(players::create_player))
        .route("/player/{id}", delete(players::delete_player));

    if dev_mode {
        tracing::info!("Development mode: permissive CORS enabled");
        app = app.layer(dev_cors());
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

// CORS configuration for local frontend development
fn dev_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::PATCH,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
}
