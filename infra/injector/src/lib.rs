//! # Injector
//!
//! A small, explicit dependency injector plus the builder contract used to fill it.
//!
//! ## Overview
//!
//! * [`Injector`]: a cheaply cloneable handle over a `TypeId`-keyed binding table.
//!   It is owned by the caller; [`Injector::configure`] replaces the whole table at once.
//! * [`Binder`]: the registration surface handed to builders (`bind`, `bind_to_provider`,
//!   `bind_scoped`).
//! * [`ScopeContext`]: a per-request / per-task slot store, created and dropped by whoever
//!   owns the execution unit.
//! * [`DependencyBuilder`]: declares binders, stores the active configuration and maps a
//!   resolution to its scope context.
//!
//! # Example
//!
//! ```rust
//! use appwire_injector::{Binders, DependencyBuilder, InjectError, Injector, ScopeContext};
//! use appwire_injector::{Resolver, scope_of_kind};
//! use appwire_domain::scope::ScopeKind;
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Settings;
//! #[derive(Debug)]
//! struct RequestId(String);
//!
//! #[derive(Debug)]
//! struct Deps(Arc<Settings>);
//!
//! impl DependencyBuilder for Deps {
//!     type Config = Settings;
//!
//!     fn new(config: Arc<Settings>) -> Self { Self(config) }
//!     fn config(&self) -> &Arc<Settings> { &self.0 }
//!
//!     fn binders(binders: &mut Binders<Self>) {
//!         binders.add("bind_request_id", |deps, binder| {
//!             binder.bind_scoped(deps, "request_id", |_, resolver| {
//!                 let scope = resolver.scope().map(|s| s.id().to_owned()).unwrap_or_default();
//!                 Ok(RequestId(scope))
//!             });
//!             Ok(())
//!         });
//!     }
//!
//!     fn context<'r>(&self, resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
//!         scope_of_kind(resolver, &ScopeKind::Request)
//!     }
//! }
//!
//! # fn main() -> Result<(), InjectError> {
//! let injector = Injector::new();
//! let deps = Arc::new(Deps::new(Arc::new(Settings)));
//! injector.configure(|binder| deps.register(binder))?;
//!
//! let scope = ScopeContext::new(ScopeKind::Request);
//! let first = injector.resolve_in::<RequestId>(&scope)?;
//! let second = injector.resolve_in::<RequestId>(&scope)?;
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod injector;
pub mod registry;
mod scope;

pub use crate::builder::{
    BinderEntry, BinderFn, Binders, DependencyBuilder, binder_list, scope_of_kind, scoped,
};
pub use crate::error::{InjectError, InjectErrorExt};
pub use crate::injector::{Binder, Injector, Resolver};
pub use crate::scope::ScopeContext;

/// Type-erased value stored in the injector or a scope context.
pub type Instance = std::sync::Arc<dyn std::any::Any + Send + Sync>;

/// Boxed error carried by provider, loader and task failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
