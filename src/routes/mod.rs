pub mod health;
pub mod platform;
pub mod sensors;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        sensors::list_sensors,
        sensors::get_sensor,
        sensors::create_sensor,
        sensors::update_sensor,
        sensors::delete_sensor,
        platform::get_platform_data,
    ),
    components(
        schemas(
            crate::domain::SensorView,
            crate::domain::SensorInput,
            sensors::CreatedResponse,
            sensors::MessageResponse,
            crate::platform::PlatformReading,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sensors", description = "Sensor catalogue"),
        (name = "platform", description = "Read-only proxy to the telemetry platform"),
    ),
    info(
        title = "Sensor Registry API",
        description = "Sensor catalogue API with a read-only proxy to the telemetry platform",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/sensors",
            get(sensors::list_sensors).post(sensors::create_sensor),
        )
        .route(
            "/sensors/{sensor_id}",
            get(sensors::get_sensor)
                .put(sensors::update_sensor)
                .delete(sensors::delete_sensor),
        )
        .route("/platform/data", get(platform::get_platform_data))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
