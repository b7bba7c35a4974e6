pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use state::AppState;

pub use config::Settings;
pub use error::{AppError, InsightError};
pub use models::{is_failure_text, validate_inputs};
pub use services::{format_results, Analyzer, ClinicFinder, InsightGenerator, SearchResult};

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/clinics", get(handlers::clinics::find_clinics))
        .route("/analyze", post(handlers::clinics::analyze));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod test_utils {
    use crate::config::Settings;
    use crate::state::AppState;

    pub const TEST_API_KEY: &str = "gsk_test_key";

    pub fn create_test_settings(search_base_url: &str, completion_url: &str) -> Settings {
        Settings::for_endpoints(search_base_url, completion_url, TEST_API_KEY)
    }

    pub fn create_test_state(search_base_url: &str, completion_url: &str) -> AppState {
        AppState::new(create_test_settings(search_base_url, completion_url))
            .expect("Failed to create test state")
    }
}
