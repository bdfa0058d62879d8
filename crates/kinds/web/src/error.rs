use appwire_injector::InjectError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use tracing::error;

/// Failures surfaced while serving a request.
#[appwire_derive::wire_error]
pub enum WebError {
    /// The handler runs on a router that was not built with [`crate::WebApp::into_router`].
    #[error("Request scope missing{}: {message}", format_context(.context))]
    MissingScope { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Dependency resolution failed{}: {source}", format_context(.context))]
    Inject { source: InjectError, context: Option<Cow<'static, str>> },
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
