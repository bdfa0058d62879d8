use crate::scope::request_scope;
use appwire_injector::{BoxError, Injector};
use appwire_kernel::config::ConfigMap;
use appwire_kernel::factory::Shell;
use axum::Router;
use axum::routing::MethodRouter;
use serde_json::Value;
use std::mem;
use tracing::debug;

/// A web application under construction.
///
/// Loaders add routes; [`WebApp::into_router`] finishes it into a servable router.
#[derive(Debug)]
pub struct WebApp {
    name: String,
    config: ConfigMap,
    router: Router,
}

impl Shell for WebApp {
    fn construct(import_name: &str) -> Self {
        Self { name: import_name.to_owned(), config: ConfigMap::new(), router: Router::new() }
    }

    fn configure(&mut self, config: ConfigMap) -> Result<(), BoxError> {
        debug!(app = %self.name, keys = config.len(), "Web app configured");
        self.config.extend(config);
        Ok(())
    }
}

impl WebApp {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration pushed by the factory, keyed by lookup key.
    #[must_use]
    pub const fn config(&self) -> &ConfigMap {
        &self.config
    }

    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        self.map_router(|router| router.route(path, method_router))
    }

    pub fn merge(&mut self, other: Router) -> &mut Self {
        self.map_router(|router| router.merge(other))
    }

    pub fn nest(&mut self, path: &str, other: Router) -> &mut Self {
        self.map_router(|router| router.nest(path, other))
    }

    /// Finishes the app: every request gets its own scope context resolved through `injector`.
    #[must_use]
    pub fn into_router(self, injector: Injector) -> Router {
        self.router.layer(axum::middleware::from_fn_with_state(injector, request_scope))
    }

    fn map_router(&mut self, f: impl FnOnce(Router) -> Router) -> &mut Self {
        let router = mem::take(&mut self.router);
        self.router = f(router);
        self
    }
}
