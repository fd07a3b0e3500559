//! Backend router and middleware setup.

use crate::web::config::BackendConfig;
use crate::web::handlers::{self, BackendState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the backend application with all routes and middleware.
pub fn create_app(config: &BackendConfig) -> Router {
    let state = BackendState::new(config.initial_command.clone(), config.log_path.clone());

    let mut app = Router::new()
        .route("/command", get(handlers::get_command))
        .route("/update-command", post(handlers::update_command))
        .route("/data", post(handlers::receive_data))
        .route("/logs", get(handlers::get_logs))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
