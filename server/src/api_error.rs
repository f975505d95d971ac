use axum::extract::{rejection::JsonRejection, FromRequest};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use billdesk_core::error::BillError;
use serde_json::json;

/// Error half of every handler result, rendered as `{"error": {code, message}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: message.into(),
        }
    }
}

/// `Json` extractor whose rejections use the same error envelope as handlers.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::warn!("Request body rejected: {}", rejection.body_text());
        Self {
            status: rejection.status(),
            code: "invalid_body",
            message: rejection.body_text(),
        }
    }
}

impl From<BillError> for ApiError {
    fn from(err: BillError) -> Self {
        let (status, code) = match &err {
            BillError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            BillError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_failed"),
            e if e.is_store_unavailable() => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
            BillError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        if status.is_server_error() {
            log::error!("Request failed: {err}");
        } else {
            log::warn!("Request rejected: {err}");
        }
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": { "code": self.code, "message": self.message }
        }));
        let mut resp = (self.status, body).into_response();
        if self.status == StatusCode::SERVICE_UNAVAILABLE {
            resp.headers_mut()
                .insert("retry-after", HeaderValue::from_static("3"));
        }
        resp
    }
}
