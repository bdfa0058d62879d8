use crate::error::WebError;
use crate::scope::RequestScope;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Extracts a dependency resolved in the current request scope.
///
/// Scoped providers resolve to the same `Arc` for every `Inject` of one request.
/// Failures reject the request with `500 Internal Server Error`.
///
/// ```rust,ignore
/// async fn whoami(Inject(user): Inject<CurrentUser>) -> String {
///     user.name.clone()
/// }
/// ```
#[derive(Debug)]
pub struct Inject<T>(pub Arc<T>);

impl<T> Deref for Inject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T, S> FromRequestParts<S> for Inject<T>
where
    T: Any + Send + Sync,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let scope = RequestScope::from_request_parts(parts, state).await?;
        Ok(Self(scope.resolve::<T>()?))
    }
}
