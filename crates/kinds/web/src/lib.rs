//! # Web
//!
//! The web application kind: [`WebApp`] wraps an `axum` [`Router`](axum::Router) plus the
//! configuration pushed by the factory, and [`WebApp::into_router`] installs a middleware
//! that opens one [`ScopeContext`](appwire_injector::ScopeContext) per request.
//!
//! Handlers pull dependencies with the [`Inject`] extractor; builders map scoped
//! providers onto the current request with [`request_context`].

mod app;
mod error;
mod extract;
mod scope;

pub use crate::app::WebApp;
pub use crate::error::{WebError, WebErrorExt};
pub use crate::extract::Inject;
pub use crate::scope::{RequestScope, request_context};
