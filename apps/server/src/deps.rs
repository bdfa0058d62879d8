use crate::config::ServerConfig;
use appwire::prelude::*;
use appwire::web::request_context;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Application-wide greeting service.
#[derive(Debug)]
pub struct Greeter {
    greeting: String,
}

impl Greeter {
    #[must_use]
    pub fn greet(&self, name: &str) -> String {
        format!("{}, {name}!", self.greeting)
    }
}

/// Created once per request.
#[derive(Debug)]
pub struct Visit {
    pub id: String,
    pub number: usize,
}

#[derive(Debug)]
pub struct ServerDeps {
    config: Arc<ServerConfig>,
    visits: AtomicUsize,
}

impl DependencyBuilder for ServerDeps {
    type Config = ServerConfig;

    fn new(config: Arc<ServerConfig>) -> Self {
        Self { config, visits: AtomicUsize::new(0) }
    }

    fn config(&self) -> &Arc<ServerConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        binders.add("bind_greeter", bind_greeter).add("bind_visit", bind_visit);
    }

    fn context<'r>(&self, resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
        request_context(resolver)
    }
}

fn bind_greeter(deps: &Arc<ServerDeps>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind(Greeter { greeting: deps.config.greeting.clone() });
    Ok(())
}

fn bind_visit(deps: &Arc<ServerDeps>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind_scoped(deps, "visit", |deps, resolver| {
        let id = resolver.scope().map(|scope| scope.id().to_owned()).unwrap_or_default();
        Ok(Visit { id, number: deps.visits.fetch_add(1, Ordering::Relaxed) + 1 })
    });
    Ok(())
}
