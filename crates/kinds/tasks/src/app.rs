use crate::context::TaskContext;
use crate::error::TaskError;
use appwire_domain::scope::ScopeKind;
use appwire_injector::{BoxError, Injector, ScopeContext};
use appwire_kernel::config::ConfigMap;
use appwire_kernel::factory::Shell;
use fxhash::FxHashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info_span, warn};

/// A registered task handler.
pub type TaskHandler = Arc<dyn Fn(&TaskContext<'_>, Value) -> Result<Value, BoxError> + Send + Sync>;

/// A task application: named handlers plus the configuration pushed by the factory.
pub struct TaskApp {
    name: String,
    config: ConfigMap,
    tasks: FxHashMap<String, TaskHandler>,
}

impl fmt::Debug for TaskApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskApp")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("tasks", &self.task_names())
            .finish()
    }
}

impl Shell for TaskApp {
    fn construct(import_name: &str) -> Self {
        Self { name: import_name.to_owned(), config: ConfigMap::new(), tasks: FxHashMap::default() }
    }

    fn configure(&mut self, config: ConfigMap) -> Result<(), BoxError> {
        debug!(app = %self.name, keys = config.len(), "Task app configured");
        self.config.extend(config);
        Ok(())
    }
}

impl TaskApp {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn config(&self) -> &ConfigMap {
        &self.config
    }

    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Registers `handler` under `name`, replacing any previous handler of that name.
    pub fn task<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&TaskContext<'_>, Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.tasks.insert(name.clone(), Arc::new(handler)).is_some() {
            warn!(app = %self.name, task = %name, "Task handler replaced");
        }
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered task names, sorted.
    #[must_use]
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs one invocation of `name` in a fresh task scope.
    ///
    /// # Errors
    /// [`TaskError::UnknownTask`] when nothing is registered under `name`,
    /// [`TaskError::Inject`] when the handler fails to resolve a dependency and
    /// [`TaskError::Failed`] for any other handler error.
    pub fn run(&self, injector: &Injector, name: &str, payload: Value) -> Result<Value, TaskError> {
        let handler = self.tasks.get(name).ok_or_else(|| TaskError::UnknownTask {
            message: name.to_owned().into(),
            context: Some(self.name.clone().into()),
        })?;

        let scope = ScopeContext::new(ScopeKind::Task);
        let _span = info_span!("task", app = %self.name, task = name, scope = %scope.id()).entered();

        let context = TaskContext::new(name, injector, &scope);
        let output = handler(&context, payload).map_err(|source| TaskError::from_handler(name, source))?;
        debug!(scoped = scope.len(), "Task finished");
        Ok(output)
    }
}
