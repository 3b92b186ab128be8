use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::{field_violations, FieldViolation, KernelError};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
struct FieldError {
    field: &'static str,
    message: String,
}

impl From<FieldViolation> for FieldError {
    fn from(value: FieldViolation) -> Self {
        Self {
            field: value.field,
            message: value.message,
        }
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Conflict => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        // infrastructure details stay in the log
        let error = match self.0.current_context() {
            KernelError::Internal | KernelError::Timeout => {
                "Service temporarily unavailable, try again".to_string()
            }
            context => self
                .0
                .frames()
                .find_map(|frame| frame.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| context.to_string()),
        };
        let body = ErrorBody {
            error,
            fields: field_violations(&self.0)
                .into_iter()
                .map(FieldError::from)
                .collect(),
        };
        (status, Json(body)).into_response()
    }
}
