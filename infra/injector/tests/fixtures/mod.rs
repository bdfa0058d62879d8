#![allow(dead_code)]

use appwire_domain::scope::ScopeKind;
use appwire_injector::{
    Binder, Binders, DependencyBuilder, InjectError, Resolver, ScopeContext, scope_of_kind,
};
use std::sync::Arc;

#[derive(Debug)]
pub struct TestConfig {
    pub dsn: String,
}

impl TestConfig {
    pub fn shared(dsn: &str) -> Arc<Self> {
        Arc::new(Self { dsn: dsn.to_owned() })
    }
}

#[derive(Debug)]
pub struct Pool {
    pub dsn: String,
    pub read_only: bool,
}

#[derive(Debug)]
pub struct Session {
    pub scope_id: String,
    pub pool: Arc<Pool>,
}

#[derive(Debug)]
pub struct AuditTrail(pub Vec<&'static str>);

pub fn pool_binders<B: DependencyBuilder<Config = TestConfig>>(binders: &mut Binders<B>) {
    binders.add("bind_pool", bind_pool::<B>);
}

fn bind_pool<B: DependencyBuilder<Config = TestConfig>>(
    builder: &Arc<B>,
    binder: &mut Binder,
) -> Result<(), InjectError> {
    binder.bind(Pool { dsn: builder.config().dsn.clone(), read_only: false });
    Ok(())
}

fn bind_read_only_pool<B: DependencyBuilder<Config = TestConfig>>(
    builder: &Arc<B>,
    binder: &mut Binder,
) -> Result<(), InjectError> {
    binder.bind(Pool { dsn: builder.config().dsn.clone(), read_only: true });
    Ok(())
}

fn bind_session<B: DependencyBuilder<Config = TestConfig>>(
    builder: &Arc<B>,
    binder: &mut Binder,
) -> Result<(), InjectError> {
    binder.bind_scoped(builder, "session", |_, resolver| {
        let scope_id = resolver.scope().map(|scope| scope.id().to_owned()).unwrap_or_default();
        Ok(Session { scope_id, pool: resolver.resolve::<Pool>()? })
    });
    Ok(())
}

/// Request-scoped builder.
#[derive(Debug)]
pub struct WebDeps {
    config: Arc<TestConfig>,
}

impl DependencyBuilder for WebDeps {
    type Config = TestConfig;

    fn new(config: Arc<TestConfig>) -> Self {
        Self { config }
    }

    fn config(&self) -> &Arc<TestConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        pool_binders(binders);
        binders.add("bind_session", bind_session::<Self>);
    }

    fn context<'r>(&self, resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
        scope_of_kind(resolver, &ScopeKind::Request)
    }
}

/// Extends the pool binders and overrides `bind_pool`.
#[derive(Debug)]
pub struct ReportingDeps {
    config: Arc<TestConfig>,
}

impl DependencyBuilder for ReportingDeps {
    type Config = TestConfig;

    fn new(config: Arc<TestConfig>) -> Self {
        Self { config }
    }

    fn config(&self) -> &Arc<TestConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        pool_binders(binders);
        binders.add("bind_audit", |_, binder| {
            binder.bind(AuditTrail(vec!["reporting"]));
            Ok(())
        });
        binders.add("bind_pool", bind_read_only_pool::<Self>);
    }
}

/// Declares a scoped binding without defining a scope context.
#[derive(Debug)]
pub struct UnscopedDeps {
    config: Arc<TestConfig>,
}

impl DependencyBuilder for UnscopedDeps {
    type Config = TestConfig;

    fn new(config: Arc<TestConfig>) -> Self {
        Self { config }
    }

    fn config(&self) -> &Arc<TestConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        pool_binders(binders);
        binders.add("bind_session", bind_session::<Self>);
    }
}

/// Its second binder always fails.
#[derive(Debug)]
pub struct BrokenDeps {
    config: Arc<TestConfig>,
}

impl DependencyBuilder for BrokenDeps {
    type Config = TestConfig;

    fn new(config: Arc<TestConfig>) -> Self {
        Self { config }
    }

    fn config(&self) -> &Arc<TestConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        binders.add("bind_offline", |_, _| Err(InjectError::provider("database offline")));
        pool_binders(binders);
    }
}
