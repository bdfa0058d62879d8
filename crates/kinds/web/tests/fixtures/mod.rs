#![allow(dead_code)]

use appwire_injector::{Binder, Binders, BoxError, DependencyBuilder, InjectError, Resolver, ScopeContext};
use appwire_kernel::Settings;
use appwire_kernel::factory::{AppFactory, Loaders};
use appwire_web::{Inject, RequestScope, WebApp, request_context};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Settings)]
pub struct SiteConfig {
    #[setting(default = "hello")]
    pub greeting: String,
}

impl SiteConfig {
    pub fn shared(greeting: &str) -> Arc<Self> {
        Arc::new(Self { greeting: greeting.to_owned() })
    }
}

/// A value issued once per request.
#[derive(Debug)]
pub struct RequestToken {
    pub serial: usize,
    pub scope_id: String,
}

/// Bound nowhere; resolving it must fail.
#[derive(Debug)]
pub struct Unbound;

#[derive(Debug)]
pub struct SiteDeps {
    config: Arc<SiteConfig>,
    issued: AtomicUsize,
}

impl DependencyBuilder for SiteDeps {
    type Config = SiteConfig;

    fn new(config: Arc<SiteConfig>) -> Self {
        Self { config, issued: AtomicUsize::new(0) }
    }

    fn config(&self) -> &Arc<SiteConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        binders.add("bind_token", bind_token);
    }

    fn context<'r>(&self, resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
        request_context(resolver)
    }
}

fn bind_token(builder: &Arc<SiteDeps>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind_scoped(builder, "token", |deps, resolver| {
        Ok(RequestToken {
            serial: deps.issued.fetch_add(1, Ordering::SeqCst),
            scope_id: resolver.scope().map(|scope| scope.id().to_owned()).unwrap_or_default(),
        })
    });
    Ok(())
}

#[derive(Debug)]
pub struct SiteFactory;

impl AppFactory for SiteFactory {
    type App = WebApp;
    type Config = SiteConfig;
    type Builder = SiteDeps;

    fn loaders(loaders: &mut Loaders<Self>) {
        loaders.add("load_routes", load_routes).add("load_api", load_api);
    }
}

fn load_routes(_: &SiteFactory, app: &mut WebApp) -> Result<(), BoxError> {
    app.route("/greeting", get(greeting)).route("/token", get(token)).route("/unbound", get(unbound));
    Ok(())
}

fn load_api(_: &SiteFactory, app: &mut WebApp) -> Result<(), BoxError> {
    app.nest("/api", Router::new().route("/scope", get(scope_id)));
    Ok(())
}

async fn greeting(Inject(config): Inject<SiteConfig>) -> String {
    config.greeting.clone()
}

async fn token(Inject(first): Inject<RequestToken>, Inject(second): Inject<RequestToken>) -> String {
    format!("{}:{}:{}", first.serial, second.serial, Arc::ptr_eq(&first, &second))
}

async fn unbound(_: Inject<Unbound>) -> &'static str {
    "unreachable"
}

async fn scope_id(scope: RequestScope, Inject(token): Inject<RequestToken>) -> String {
    format!("{}={}", scope.scope().id(), token.scope_id)
}
