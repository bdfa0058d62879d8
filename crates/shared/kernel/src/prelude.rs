//! Everything needed to declare a schema, a shell and a factory.
//! Context traits (`*ErrorExt`) are not part of it; import them from their modules.

pub use crate::Settings;
pub use crate::config::{
    ConfigError, ConfigMap, ConfigSchema, EnvSource, LayeredSource, Source,
    describe, load_from_env, load_from_source,
};
pub use crate::factory::{AppFactory, FactoryError, Loaders, Shell, loader_list};
pub use appwire_injector::{
    Binder, Binders, BoxError, DependencyBuilder, InjectError, Injector, Resolver,
    ScopeContext, scope_of_kind,
};
