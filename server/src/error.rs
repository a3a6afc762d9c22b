use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

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
struct ErrorMessage {
    message: String,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Validation | KernelError::MalformedBody => StatusCode::BAD_REQUEST,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match context {
            KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                String::from("Internal server error")
            }
            context => {
                tracing::debug!("{:?}", self.0);
                context.to_string()
            }
        };
        (status, Json(ErrorMessage { message })).into_response()
    }
}
