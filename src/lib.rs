pub mod business_logic;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::levels::get_levels,
        handlers::chart::get_chart
    ),
    components(schemas(
        models::health::HealthResponse,
        models::levels::LevelsResponse,
        models::chart::ChartResponse,
        models::chart::LevelLine,
        models::chart::VolumeBar,
        models::chart::VolumeDirection,
        models::candle::Candle,
        errors::ErrorResponse
    ))
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/levels", get(handlers::levels::get_levels))
        .route("/chart", get(handlers::chart::get_chart))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
