use appwire_domain::scope::ScopeKind;
use appwire_injector::{InjectError, Injector, Resolver, ScopeContext, scope_of_kind};
use std::any::Any;
use std::sync::Arc;

/// What a task handler sees of the invocation it runs in.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext<'a> {
    name: &'a str,
    injector: &'a Injector,
    scope: &'a ScopeContext,
}

impl<'a> TaskContext<'a> {
    pub(crate) const fn new(name: &'a str, injector: &'a Injector, scope: &'a ScopeContext) -> Self {
        Self { name, injector, scope }
    }

    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Resolves `T` within this invocation.
    ///
    /// # Errors
    /// Whatever the binding of `T` fails with.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, InjectError> {
        self.injector.resolve_in(self.scope)
    }

    #[must_use]
    pub const fn scope(&self) -> &'a ScopeContext {
        self.scope
    }
}

/// The task scope of the current resolution, for builders of task apps.
///
/// # Errors
/// [`InjectError::NoScopeContext`] outside a task, [`InjectError::ScopeMismatch`]
/// inside another kind of scope.
pub fn task_context<'r>(resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
    scope_of_kind(resolver, &ScopeKind::Task)
}
