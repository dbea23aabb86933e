use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::ApiGatewayV2httpResponse;
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use serde::Serialize;

use crate::PreferencesError;

/// JSON response for the API Gateway proxy integration.
pub fn json_response<T: Serialize>(status_code: i64, body: &T) -> ApiGatewayV2httpResponse {
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("application/json"));

    ApiGatewayV2httpResponse {
        status_code,
        headers,
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

pub fn error_response(status_code: i64, message: &str) -> ApiGatewayV2httpResponse {
    json_response(status_code, &serde_json::json!({ "error": message }))
}

/// Map a service failure to the gateway response. Upstream and deployment
/// faults get the generic user-facing message; caller faults echo the reason.
pub fn failure_response(err: &PreferencesError) -> ApiGatewayV2httpResponse {
    match err {
        PreferencesError::InvalidRequest(reason) => error_response(400, reason),
        PreferencesError::DirectoryUnavailable(_) => error_response(502, "Something went wrong"),
        PreferencesError::ConfigurationError(_) => error_response(500, "Something went wrong"),
    }
}
