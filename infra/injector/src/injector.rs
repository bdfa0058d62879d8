use crate::builder::{DependencyBuilder, scoped};
use crate::error::InjectError;
use crate::scope::ScopeContext;
use crate::Instance;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type ProviderFn = dyn Fn(&Resolver<'_>) -> Result<Instance, InjectError> + Send + Sync;

#[derive(Clone)]
enum Binding {
    Instance(Instance),
    Provider(Arc<ProviderFn>),
}

#[derive(Clone)]
struct Entry {
    type_name: &'static str,
    binding: Binding,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.binding {
            Binding::Instance(_) => "instance",
            Binding::Provider(_) => "provider",
        };
        f.debug_struct("Entry").field("type_name", &self.type_name).field("kind", &kind).finish()
    }
}

type Bindings = FxHashMap<TypeId, Entry>;

/// A thread-safe dependency injector.
///
/// Bindings are indexed by the [`TypeId`] of the bound type. Cloning the injector
/// clones the handle, not the table.
#[derive(Debug, Clone, Default)]
pub struct Injector {
    bindings: Arc<RwLock<Bindings>>,
}

impl Injector {
    /// Creates a new, empty injector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every binding with the ones registered by `register`.
    ///
    /// The new table is assembled off to the side and swapped in only when `register`
    /// succeeds, so a failing registration leaves the previous bindings untouched.
    ///
    /// # Errors
    /// Returns the first error raised by `register`.
    pub fn configure<F>(&self, register: F) -> Result<(), InjectError>
    where
        F: FnOnce(&mut Binder) -> Result<(), InjectError>,
    {
        let mut binder = Binder::default();
        register(&mut binder)?;

        let count = binder.bindings.len();
        *self.bindings.write() = binder.bindings;
        debug!(bindings = count, "Injector configured");
        Ok(())
    }

    /// Removes every binding.
    pub fn clear(&self) {
        self.bindings.write().clear();
        debug!("Injector cleared");
    }

    #[must_use]
    pub fn is_bound<T: Any + Send + Sync>(&self) -> bool {
        self.bindings.read().contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }

    /// Resolves `T` outside of any scope.
    ///
    /// Scoped providers fail with [`InjectError::NoScopeContext`] here.
    ///
    /// # Errors
    /// Returns [`InjectError::Unbound`] when nothing is bound for `T`, or the provider error.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, InjectError> {
        self.resolve_with(None)
    }

    /// Resolves `T` inside `scope`.
    ///
    /// # Errors
    /// Returns [`InjectError::Unbound`] when nothing is bound for `T`, or the provider error.
    pub fn resolve_in<T: Any + Send + Sync>(&self, scope: &ScopeContext) -> Result<Arc<T>, InjectError> {
        self.resolve_with(Some(scope))
    }

    fn resolve_with<T: Any + Send + Sync>(
        &self,
        scope: Option<&ScopeContext>,
    ) -> Result<Arc<T>, InjectError> {
        // Cloned out of the lock: providers resolve their own dependencies.
        let binding = self
            .bindings
            .read()
            .get(&TypeId::of::<T>())
            .map(|entry| entry.binding.clone())
            .ok_or_else(|| InjectError::Unbound { message: type_name::<T>().into(), context: None })?;

        let instance = match binding {
            Binding::Instance(instance) => instance,
            Binding::Provider(provider) => {
                trace!(ty = type_name::<T>(), scope = scope.map(ScopeContext::id), "Running provider");
                provider(&Resolver { injector: self, scope })?
            },
        };

        instance.downcast::<T>().map_err(|_| InjectError::TypeMismatch {
            message: type_name::<T>().into(),
            context: Some("Provider returned an unexpected type".into()),
        })
    }
}

/// Read-only view handed to providers while they run.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    injector: &'a Injector,
    scope: Option<&'a ScopeContext>,
}

impl<'a> Resolver<'a> {
    /// Resolves another dependency inside the same scope.
    ///
    /// # Errors
    /// See [`Injector::resolve`].
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, InjectError> {
        self.injector.resolve_with(self.scope)
    }

    /// The scope the current resolution runs in, if any.
    #[must_use]
    pub const fn scope(&self) -> Option<&'a ScopeContext> {
        self.scope
    }

    #[must_use]
    pub const fn injector(&self) -> &'a Injector {
        self.injector
    }
}

/// Registration surface used while configuring an [`Injector`].
///
/// Binding the same type twice keeps the last binding.
#[derive(Debug, Default)]
pub struct Binder {
    bindings: Bindings,
}

impl Binder {
    /// Binds a ready-made value; every resolution returns the same `Arc`.
    pub fn bind<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.bind_arc(Arc::new(value))
    }

    /// Binds a shared value without re-wrapping it.
    pub fn bind_arc<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> &mut Self {
        self.insert::<T>(Binding::Instance(value))
    }

    /// Binds a provider that runs on every resolution of `T`.
    pub fn bind_to_provider<T, F>(&mut self, provider: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, InjectError> + Send + Sync + 'static,
    {
        let provider: Arc<ProviderFn> =
            Arc::new(move |resolver: &Resolver<'_>| provider(resolver).map(|value| value as Instance));
        self.insert::<T>(Binding::Provider(provider))
    }

    /// Binds a provider memoized per scope context under `key`.
    ///
    /// The builder's [`DependencyBuilder::context`] picks the context for each resolution.
    pub fn bind_scoped<B, T, F>(&mut self, builder: &Arc<B>, key: &'static str, provider: F) -> &mut Self
    where
        B: DependencyBuilder,
        T: Any + Send + Sync,
        F: Fn(&B, &Resolver<'_>) -> Result<T, InjectError> + Send + Sync + 'static,
    {
        self.bind_to_provider(scoped(builder, key, provider))
    }

    #[must_use]
    pub fn is_bound<T: Any + Send + Sync>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn insert<T: Any>(&mut self, binding: Binding) -> &mut Self {
        let entry = Entry { type_name: type_name::<T>(), binding };
        if self.bindings.insert(TypeId::of::<T>(), entry).is_some() {
            warn!(ty = type_name::<T>(), "Binding replaced");
        } else {
            trace!(ty = type_name::<T>(), "Binding added");
        }
        self
    }
}
