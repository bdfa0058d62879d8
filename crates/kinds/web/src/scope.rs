use crate::error::WebError;
use appwire_domain::scope::ScopeKind;
use appwire_injector::{InjectError, Injector, Resolver, ScopeContext, scope_of_kind};
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::any::Any;
use std::sync::Arc;
use tracing::{Instrument, debug_span};

/// The injector and scope context of the current request.
///
/// Stored in the request extensions by the middleware; also usable as an extractor.
#[derive(Debug, Clone)]
pub struct RequestScope {
    injector: Injector,
    scope: Arc<ScopeContext>,
}

impl RequestScope {
    /// Resolves `T` within this request.
    ///
    /// # Errors
    /// Whatever the binding of `T` fails with.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, InjectError> {
        self.injector.resolve_in(&self.scope)
    }

    #[must_use]
    pub fn scope(&self) -> &ScopeContext {
        &self.scope
    }

    #[must_use]
    pub const fn injector(&self) -> &Injector {
        &self.injector
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestScope {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| WebError::MissingScope {
            message: parts.uri.path().to_owned().into(),
            context: None,
        })
    }
}

/// Opens a fresh request scope around the inner service.
pub(crate) async fn request_scope(
    State(injector): State<Injector>,
    mut request: Request,
    next: Next,
) -> Response {
    let scope = Arc::new(ScopeContext::new(ScopeKind::Request));
    let span = debug_span!(
        "request",
        scope = %scope.id(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    request.extensions_mut().insert(RequestScope { injector, scope });
    next.run(request).instrument(span).await
}

/// The request scope of the current resolution, for [`DependencyBuilder::context`].
///
/// [`DependencyBuilder::context`]: appwire_injector::DependencyBuilder::context
///
/// # Errors
/// [`InjectError::NoScopeContext`] outside a request, [`InjectError::ScopeMismatch`]
/// inside another kind of scope.
pub fn request_context<'r>(resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
    scope_of_kind(resolver, &ScopeKind::Request)
}
