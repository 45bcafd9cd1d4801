//! Vitamin D synthesis window endpoint handler.

use crate::{
    error::VitaminDError,
    middleware::RequestId,
    models::{VitaminDQuery, VitaminDResponse},
    services::{AppMetrics, validation::validate_query, vitamin_d::VitaminDService},
    utils::is_same_origin_caller,
};
use actix_web::{
    Error, HttpRequest, HttpResponse, ResponseError, Result, http::header::ContentType,
    web,
};
use paperclip::actix::api_v2_operation;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Vitamin D endpoint
///
/// Estimates when the sun is strong enough for vitamin D synthesis at a
/// location on a given day, and how long the exposure needs to be.
/// Callers without an `Origin` header get the JSON pretty-printed.
#[api_v2_operation(
    summary = "Vitamin D Synthesis Window",
    description = "Returns the local start and stop time of the vitamin D synthesis window and the exposure duration in minutes for ?lat=<latitude>&lng=<longitude>&dateMs=<unix epoch milliseconds>. Validation and upstream failures return 400 with a plaintext message.",
    tags("Vitamin D")
)]
pub async fn vitamin_d(req: HttpRequest) -> Result<HttpResponse, Error> {
    let request_id = RequestId::of(&req);
    let pretty = is_same_origin_caller(&req);
    let query = VitaminDQuery::from_query_string(req.query_string());

    let Some(service) = req.app_data::<web::Data<VitaminDService>>() else {
        return Err(actix_web::error::ErrorInternalServerError(
            "Vitamin D service not available",
        ));
    };

    let result = estimate(service, &query).await;

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_estimate(result.as_ref().map_or_else(|e| e.kind(), |_| "ok"));
    }

    match result {
        Ok(payload) => {
            let body = render_payload(&payload, pretty)
                .map_err(actix_web::error::ErrorInternalServerError)?;
            Ok(HttpResponse::Ok()
                .insert_header(ContentType::json())
                .body(body))
        }
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                kind = err.kind(),
                error = %err,
                "Vitamin D estimate failed"
            );
            Ok(err.error_response())
        }
    }
}

async fn estimate(
    service: &VitaminDService,
    query: &VitaminDQuery,
) -> Result<VitaminDResponse, VitaminDError> {
    let validated = validate_query(query)?;
    service.estimate(&validated).await
}

/// Serialize the payload, pretty-printed with a 4-space indent when asked
pub fn render_payload(
    payload: &VitaminDResponse,
    pretty: bool,
) -> Result<Vec<u8>, serde_json::Error> {
    if !pretty {
        return serde_json::to_vec(payload);
    }

    let mut body = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"    "));
    payload.serialize(&mut serializer)?;
    Ok(body)
}
