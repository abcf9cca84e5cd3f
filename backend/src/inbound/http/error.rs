//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.
//!
//! Only two statuses are emitted: `401` for [`ErrorCode::Unauthorized`] and
//! `422` for everything else. Storage and internal failures are redacted to a
//! generic message and logged server-side.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

pub use crate::domain::ApiResult;

const INTERNAL_MESSAGE: &str = "internal server error";
const UNAVAILABLE_MESSAGE: &str = "service temporarily unavailable";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    #[schema(example = "invalid_request")]
    pub code: ErrorCode,
    /// Human-readable summary.
    #[schema(example = "validation failed")]
    pub error: String,
    /// Individual failure reasons; always present on `422` responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(example = json!(["instructions must be at least 50 characters"]))]
    pub errors: Vec<String>,
    /// Correlation id matching the `trace-id` header.
    #[serde(
        rename = "traceId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trace_id: Option<String>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn redacted_message(error: &Error) -> Option<&'static str> {
    match error.code() {
        ErrorCode::InternalError => Some(INTERNAL_MESSAGE),
        ErrorCode::ServiceUnavailable => Some(UNAVAILABLE_MESSAGE),
        _ => None,
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let message = redacted_message(error).unwrap_or_else(|| error.message());
        let errors = match (error.code(), redacted_message(error)) {
            (ErrorCode::Unauthorized, _) => Vec::new(),
            (_, Some(generic)) => vec![generic.to_owned()],
            _ if error.reasons().is_empty() => vec![error.message().to_owned()],
            _ => error.reasons().to_vec(),
        };
        Self {
            code: error.code(),
            error: message.to_owned(),
            errors,
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if redacted_message(self).is_some() {
            error!(
                code = ?self.code(),
                trace_id = self.trace_id(),
                error = %self,
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorResponse::from(self))
    }
}

/// Turn JSON extractor failures into `invalid_request` errors.
///
/// Register through `web::JsonConfig::default().error_handler(..)`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("malformed request body")
        .with_reasons(vec![err.to_string()])
        .into()
}
