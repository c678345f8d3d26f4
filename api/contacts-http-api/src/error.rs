use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        error: &'static str,
        details: String,
    },
    NotFound,
    Internal(&'static str),
}

impl ApiError {
    pub fn bad_request(error: &'static str, details: impl ToString) -> Self {
        ApiError::BadRequest {
            error,
            details: details.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest { error, details } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": error, "details": details }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": "Contact not found" }),
            ),
            ApiError::Internal(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": error }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
