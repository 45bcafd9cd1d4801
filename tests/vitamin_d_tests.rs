//! Vitamin D endpoint tests against stub providers.

use actix_web::{App, http::StatusCode, test};
use async_trait::async_trait;
use paperclip::actix::{OpenApiExt, web};
use std::sync::{Arc, Mutex};
use vitamind_api::{
    AppState, Coordinate, DoseEstimateRequest, DoseEstimateResult, DoseEstimator,
    ForecastProvider, ForecastSample, SkyCondition, UtcOffsetSource, VitaminDError,
    VitaminDService, create_app, create_openapi_spec, vitamin_d,
};

struct StubForecast {
    result: fn() -> Result<ForecastSample, VitaminDError>,
    calls: Mutex<Vec<Coordinate>>,
}

#[async_trait]
impl ForecastProvider for StubForecast {
    async fn midday_forecast(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ForecastSample, VitaminDError> {
        self.calls.lock().unwrap().push(*coordinate);
        (self.result)()
    }
}

struct StubDose {
    requests: Mutex<Vec<DoseEstimateRequest>>,
}

#[async_trait]
impl DoseEstimator for StubDose {
    async fn estimate(
        &self,
        request: &DoseEstimateRequest,
    ) -> Result<DoseEstimateResult, VitaminDError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(DoseEstimateResult {
            start_hour_decimal: 8.2,
            stop_hour_decimal: 16.4,
            duration_minutes: 120.0,
        })
    }
}

fn clear_sky() -> Result<ForecastSample, VitaminDError> {
    Ok(ForecastSample {
        altitude_meters: 50.0,
        symbol_code: "clearsky_day".to_string(),
    })
}

fn no_midday() -> Result<ForecastSample, VitaminDError> {
    Err(VitaminDError::NotFound(
        "No midday forecast entry was found for the requested location.".to_string(),
    ))
}

fn stubs(
    result: fn() -> Result<ForecastSample, VitaminDError>,
    offset_hours: i32,
) -> (Arc<StubForecast>, Arc<StubDose>, VitaminDService) {
    let forecast = Arc::new(StubForecast {
        result,
        calls: Mutex::new(Vec::new()),
    });
    let dose = Arc::new(StubDose {
        requests: Mutex::new(Vec::new()),
    });
    let service = VitaminDService::new(
        forecast.clone(),
        dose.clone(),
        UtcOffsetSource::Fixed(offset_hours),
    );
    (forecast, dose, service)
}

const QUERY: &str = "/api/vitamin-d?lat=59.9&lng=10.7&dateMs=1700000000000";

#[actix_web::test]
async fn test_successful_estimate() {
    let (forecast, dose, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get()
        .uri(QUERY)
        .insert_header(("Origin", "https://example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");

    let body = test::read_body(resp).await;
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        r#"{"startHour":"08:12","stopHour":"16:24","duration":120}"#
    );

    let calls = forecast.calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        &[Coordinate {
            longitude: 10.7,
            latitude: 59.9
        }]
    );

    let requests = dose.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].sky_condition, SkyCondition::Cloudless);
    assert_eq!(requests[0].altitude_km, 0.05);
    assert_eq!(requests[0].month, 304);
    assert_eq!(requests[0].mday, 14);
}

#[actix_web::test]
async fn test_root_route_serves_the_estimate() {
    let (_, _, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get()
        .uri("/?lat=59.9&lng=10.7&dateMs=1700000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_offset_shifts_clock_times() {
    let (_, _, service) = stubs(clear_sky, 2);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get()
        .uri(QUERY)
        .insert_header(("Origin", "https://example.com"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["startHour"], "10:12");
    assert_eq!(json["stopHour"], "18:24");
    assert_eq!(json["duration"], 120);
}

#[actix_web::test]
async fn test_pretty_printing_depends_on_origin_header() {
    let (_, _, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let same_origin = test::TestRequest::get().uri(QUERY).to_request();
    let pretty = test::call_and_read_body(&app, same_origin).await;

    let cross_origin = test::TestRequest::get()
        .uri(QUERY)
        .insert_header(("Origin", "https://example.com"))
        .to_request();
    let compact = test::call_and_read_body(&app, cross_origin).await;

    assert_ne!(pretty, compact, "Bodies should differ in whitespace");
    assert!(std::str::from_utf8(&pretty).unwrap().contains("\n    \"startHour\""));

    let pretty_json: serde_json::Value = serde_json::from_slice(&pretty).unwrap();
    let compact_json: serde_json::Value = serde_json::from_slice(&compact).unwrap();
    assert_eq!(pretty_json, compact_json);
}

#[actix_web::test]
async fn test_missing_parameters_are_named() {
    let (forecast, _, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let cases = [
        ("/api/vitamin-d?lng=10.7&dateMs=1", "latitude"),
        ("/api/vitamin-d?lat=59.9&dateMs=1", "longitude"),
        ("/api/vitamin-d?lat=59.9&lng=10.7", "dateMs"),
        ("/api/vitamin-d?lat=59.9&lng=east&dateMs=1", "longitude"),
    ];

    for (uri, field) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = test::read_body(resp).await;
        let message = std::str::from_utf8(&body).unwrap();
        assert!(message.contains(field), "{uri}: {message}");
    }

    assert!(
        forecast.calls.lock().unwrap().is_empty(),
        "Invalid queries must not reach the forecast provider"
    );
}

#[actix_web::test]
async fn test_out_of_range_latitude_is_rejected() {
    let (_, _, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get()
        .uri("/api/vitamin-d?lat=100&lng=0&dateMs=1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_missing_midday_forecast_returns_plaintext_400() {
    let (_, dose, service) = stubs(no_midday, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get().uri(QUERY).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(
        resp.headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");

    let body = test::read_body(resp).await;
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        "No midday forecast entry was found for the requested location."
    );
    assert!(dose.requests.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_repeated_parameters_use_first_value() {
    let (forecast, _, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get()
        .uri("/api/vitamin-d?lat=59.9&lat=2&lng=10.7&lng=3&dateMs=1700000000000&dateMs=0")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        forecast.calls.lock().unwrap().as_slice(),
        &[Coordinate {
            longitude: 10.7,
            latitude: 59.9
        }]
    );
}

#[actix_web::test]
async fn test_repeated_invalid_parameter_is_named_and_counted() {
    let (_, _, service) = stubs(clear_sky, 0);
    let app = test::init_service(create_app(AppState::with_service(service).unwrap())).await;

    let req = test::TestRequest::get()
        .uri("/api/vitamin-d?lat=north&lat=2&lng=10.7&dateMs=1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("latitude"));

    let metrics_req = test::TestRequest::get().uri("/api/metrics").to_request();
    let metrics = test::call_and_read_body(&app, metrics_req).await;
    assert!(
        std::str::from_utf8(&metrics)
            .unwrap()
            .contains("vitamin_d_estimates_total{outcome=\"invalid_argument\"} 1")
    );
}

#[actix_web::test]
async fn test_missing_service_is_internal_error() {
    let app = test::init_service(
        App::new()
            .wrap_api_with_spec(create_openapi_spec())
            .service(web::resource("/api/vitamin-d").route(web::get().to(vitamin_d)))
            .build(),
    )
    .await;

    let req = test::TestRequest::get().uri(QUERY).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
