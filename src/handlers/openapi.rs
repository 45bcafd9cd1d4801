//! OpenAPI specification generation and app factory.

use crate::{
    config::{CorsHeadersConfig, MetricsConfig, UpstreamConfig},
    error::StartupError,
    handlers::{get_metrics, health, version, vitamin_d},
    middleware::{CorsHeaders, MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, VitaminDService},
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI specification served at `/api/spec/v2`
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Vitamin D API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Estimates the daily window for vitamin D synthesis from sunlight.\n\n\
                ## How it works\n\
                1. The midday forecast for the location is fetched from api.met.no\n\
                2. Its weather symbol is mapped to a sky condition (cloudless, scattered, broken, overcast)\n\
                3. Location, date, sky condition and altitude are submitted to the FastRT vitamin D calculator\n\
                4. The calculator's UTC decimal hours are shifted by the server's UTC offset and formatted as `HH:MM`\n\
                \n\
                **Query parameters:** `lat`, `lng`, `dateMs` (Unix epoch milliseconds), all required.\n\
                \n\
                **Errors:** every failure returns `400 Bad Request` with a plaintext message.\n\
                \n\
                **Formatting:** requests without an `Origin` header receive pretty-printed JSON."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Shared state handed to every worker's app
#[derive(Clone)]
pub struct AppState {
    pub service: web::Data<VitaminDService>,
    pub metrics: web::Data<AppMetrics>,
    pub metrics_config: web::Data<MetricsConfig>,
    pub cors: CorsHeadersConfig,
}

impl AppState {
    /// Build the state from environment configuration
    pub fn from_env() -> Result<Self, StartupError> {
        let metrics = AppMetrics::new()?;
        let service =
            VitaminDService::from_config(&UpstreamConfig::from_env(), Some(metrics.upstream.clone()))?;

        Ok(Self {
            service: web::Data::new(service),
            metrics: web::Data::new(metrics),
            metrics_config: web::Data::new(MetricsConfig::from_env()),
            cors: CorsHeadersConfig::from_env(),
        })
    }

    /// Build the state around an existing service, with default configuration
    pub fn with_service(service: VitaminDService) -> Result<Self, StartupError> {
        Ok(Self {
            service: web::Data::new(service),
            metrics: web::Data::new(AppMetrics::new()?),
            metrics_config: web::Data::new(MetricsConfig::default()),
            cors: CorsHeadersConfig::default(),
        })
    }
}

/// Creates the application from shared state
///
/// Mounts the vitamin D endpoint at `/` and `/api/vitamin-d`, the health,
/// version and metrics endpoints, and the OpenAPI document, behind the CORS,
/// request ID and metrics middleware.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(CorsHeaders::new(state.cors))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(state.service)
        .app_data(state.metrics)
        .app_data(state.metrics_config)
        .service(web::resource("/").route(web::get().to(vitamin_d)))
        .service(web::resource("/api/vitamin-d").route(web::get().to(vitamin_d)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}

/// Creates the application configured from the environment
///
/// Used by tests that exercise the full middleware stack. The server binary
/// builds the state once and shares it across workers instead.
pub fn create_base_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = AppState::from_env().expect("Failed to create application state");
    create_app(state)
}
