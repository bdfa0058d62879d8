//! # Appwire Worker
//!
//! A demo task application assembled by [`WorkerFactory`]. Configuration comes from an
//! optional file overlaid by `WORKER_*` environment variables.

pub mod cli;
mod tasks;

use appwire::prelude::*;
use appwire::tasks::{TaskApp, task_context};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prefix of the environment variables read by the worker (`WORKER_GREETING`, ...).
pub const ENV_PREFIX: &str = "WORKER";

#[derive(Debug, Clone, PartialEq, Eq, appwire::Settings)]
#[setting(crate = "appwire::kernel")]
pub struct WorkerConfig {
    #[setting(default = "Hello")]
    pub greeting: String,

    /// Items per batch of the `batch` task.
    #[setting(default = "10")]
    pub batch_size: usize,
}

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

/// Created once per task invocation.
#[derive(Debug)]
pub struct Job {
    pub id: String,
    pub number: usize,
}

#[derive(Debug)]
pub struct WorkerDeps {
    config: Arc<WorkerConfig>,
    jobs: AtomicUsize,
}

impl DependencyBuilder for WorkerDeps {
    type Config = WorkerConfig;

    fn new(config: Arc<WorkerConfig>) -> Self {
        Self { config, jobs: AtomicUsize::new(0) }
    }

    fn config(&self) -> &Arc<WorkerConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        binders.add("bind_greeter", bind_greeter).add("bind_job", bind_job);
    }

    fn context<'r>(&self, resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
        task_context(resolver)
    }
}

fn bind_greeter(deps: &Arc<WorkerDeps>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind(Greeter { greeting: deps.config.greeting.clone() });
    Ok(())
}

fn bind_job(deps: &Arc<WorkerDeps>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind_scoped(deps, "job", |deps, resolver| {
        let id = resolver.scope().map(|scope| scope.id().to_owned()).unwrap_or_default();
        Ok(Job { id, number: deps.jobs.fetch_add(1, Ordering::Relaxed) + 1 })
    });
    Ok(())
}

/// Builds the demo task application.
#[derive(Debug, Clone, Default)]
pub struct WorkerFactory {
    config_file: Option<PathBuf>,
}

impl WorkerFactory {
    #[must_use]
    pub const fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }
}

impl AppFactory for WorkerFactory {
    type App = TaskApp;
    type Config = WorkerConfig;
    type Builder = WorkerDeps;

    fn loaders(loaders: &mut Loaders<Self>) {
        loaders.add("load_tasks", tasks::load_tasks);
    }

    fn load_config(&self) -> Result<WorkerConfig, ConfigError> {
        let mut builder = LayeredSource::builder();
        if let Some(path) = &self.config_file {
            builder = builder.file(path);
        }
        let source = builder.env_prefix(ENV_PREFIX).build()?;
        load_from_source(&source)
    }
}
