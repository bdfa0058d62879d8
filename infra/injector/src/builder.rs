use crate::error::InjectError;
use crate::injector::{Binder, Resolver};
use crate::registry::{self, Declarations, Declared};
use crate::scope::ScopeContext;
use appwire_domain::scope::ScopeKind;
use std::any::{Any, type_name};
use std::sync::Arc;
use tracing::debug;

/// A binder callback: receives the builder and registers bindings.
pub type BinderFn<B> = fn(&Arc<B>, &mut Binder) -> Result<(), InjectError>;

/// One named binder.
pub type BinderEntry<B> = Declared<BinderFn<B>>;

/// Ordered binder declarations of one builder type.
pub type Binders<B> = Declarations<BinderFn<B>>;

/// Declares how an application's dependencies are bound.
///
/// Binders are declared once per type in [`DependencyBuilder::binders`]. The list always
/// starts with `bind_config`, which binds [`DependencyBuilder::Config`]. To extend another
/// builder, call its declaration function first and then add or override names.
pub trait DependencyBuilder: Sized + Send + Sync + 'static {
    type Config: Any + Send + Sync;

    fn new(config: Arc<Self::Config>) -> Self;

    fn config(&self) -> &Arc<Self::Config>;

    /// Declares this builder's binders, in order.
    fn binders(_binders: &mut Binders<Self>) {}

    /// Maps a resolution to the scope context that caches scoped values.
    ///
    /// # Errors
    /// The default has no notion of scope and returns [`InjectError::NoScopeContext`].
    fn context<'r>(&self, _resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
        Err(InjectError::NoScopeContext {
            message: type_name::<Self>().into(),
            context: Some("Builder does not define a scope context".into()),
        })
    }

    /// Runs every declared binder, in order, against `binder`.
    ///
    /// # Errors
    /// Stops at and returns the first binder error.
    fn register(self: Arc<Self>, binder: &mut Binder) -> Result<(), InjectError> {
        for entry in binder_list::<Self>().iter() {
            debug!(builder = type_name::<Self>(), binder = entry.name, "Running binder");
            (entry.callback)(&self, binder)?;
        }
        Ok(())
    }
}

/// The memoized binder list of `B`, with `bind_config` first.
#[must_use]
pub fn binder_list<B: DependencyBuilder>() -> Arc<Vec<BinderEntry<B>>> {
    registry::cached(|| {
        let mut binders = Binders::default();
        binders.add("bind_config", bind_config::<B>);
        B::binders(&mut binders);
        binders.into_entries()
    })
}

fn bind_config<B: DependencyBuilder>(builder: &Arc<B>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind_arc(Arc::clone(builder.config()));
    Ok(())
}

/// Wraps `provider` so its value is created once per scope context and cached under `key`.
pub fn scoped<B, T, F>(
    builder: &Arc<B>,
    key: &'static str,
    provider: F,
) -> impl Fn(&Resolver<'_>) -> Result<Arc<T>, InjectError> + Send + Sync + use<B, T, F>
where
    B: DependencyBuilder,
    T: Any + Send + Sync,
    F: Fn(&B, &Resolver<'_>) -> Result<T, InjectError> + Send + Sync + 'static,
{
    let builder = Arc::clone(builder);
    move |resolver: &Resolver<'_>| {
        let context = builder.context(resolver)?;
        context.get_or_try_insert_with(key, || provider(builder.as_ref(), resolver))
    }
}

/// Returns the current scope if it has the expected kind.
///
/// # Errors
/// [`InjectError::NoScopeContext`] outside any scope, [`InjectError::ScopeMismatch`]
/// inside a scope of another kind.
pub fn scope_of_kind<'r>(resolver: &Resolver<'r>, kind: &ScopeKind) -> Result<&'r ScopeContext, InjectError> {
    let scope = resolver.scope().ok_or_else(|| InjectError::NoScopeContext {
        message: format!("resolution outside of a {kind} scope").into(),
        context: None,
    })?;
    if scope.kind() != kind {
        return Err(InjectError::ScopeMismatch {
            message: format!("expected {kind}, found {}", scope.kind()).into(),
            context: None,
        });
    }
    Ok(scope)
}
