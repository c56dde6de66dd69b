//! HTTP error translation.
//!
//! Every failure leaves the service as a JSON object with an `error` field,
//! never as a framework default page. Upstream details are logged here and
//! kept out of response bodies.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, async_trait};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::history::HistoryError;
use crate::review::ReviewError;

/// Remediation hint for the most common malformed body: a code snippet
/// pasted into a JSON string with real line breaks.
pub const INVALID_JSON_HINT: &str =
    "Please remove physical line breaks (Enters) from your JSON string and use \\n instead.";

/// Errors returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// `code` was absent or blank.
    MissingCode,
    /// The body was not syntactically valid JSON.
    InvalidJson,
    /// The body was JSON but not the expected shape.
    InvalidBody(String),
    /// The body could not be read (e.g. over the size limit).
    BodyRejected { status: StatusCode, message: String },
    NotFound(&'static str),
    ReviewFailed,
    HistoryFailed,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCode | ApiError::InvalidJson | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::BodyRejected { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ReviewFailed | ApiError::HistoryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        let (error, message) = match self {
            ApiError::MissingCode => ("Code is required".to_string(), None),
            ApiError::InvalidJson => (
                "Invalid JSON format".to_string(),
                Some(INVALID_JSON_HINT.to_string()),
            ),
            ApiError::InvalidBody(detail) => ("Invalid request body".to_string(), Some(detail)),
            ApiError::BodyRejected { message, .. } => {
                ("Request body rejected".to_string(), Some(message))
            }
            ApiError::NotFound(what) => (format!("{what} not found"), None),
            ApiError::ReviewFailed => ("Failed to process review".to_string(), None),
            ApiError::HistoryFailed => ("Failed to update history".to_string(), None),
        };
        ErrorBody { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "rejected request body: {}", rejection.body_text());
        match rejection {
            JsonRejection::JsonSyntaxError(_) => ApiError::InvalidJson,
            JsonRejection::JsonDataError(e) => ApiError::InvalidBody(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => ApiError::InvalidBody(e.body_text()),
            other => ApiError::BodyRejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::MissingCode => ApiError::MissingCode,
            ReviewError::Provider(e) => {
                tracing::error!(error = %e, "review generation failed");
                ApiError::ReviewFailed
            }
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        tracing::error!(error = %err, "history update failed");
        ApiError::HistoryFailed
    }
}

/// JSON body extractor whose rejections are [`ApiError`]s.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
