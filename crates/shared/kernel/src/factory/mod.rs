//! Application construction.
//!
//! [`AppFactory::create`] runs the same pipeline for every kind of application:
//!
//! 1. resolve the configuration (explicit, or [`AppFactory::load_config`]);
//! 2. construct the [`Shell`] from its import name;
//! 3. push the configuration into the shell;
//! 4. run every declared loader, in order;
//! 5. unless no injector is given, replace the injector's bindings with the ones of
//!    [`AppFactory::Builder`].
//!
//! Construction is fail-fast. A partially built shell is dropped, never returned.

mod error;

pub use error::{FactoryError, FactoryErrorExt};

use crate::config::{ConfigError, ConfigMap, ConfigSchema, load_from_env};
use appwire_injector::registry::{self, Declarations, Declared};
use appwire_injector::{BoxError, DependencyBuilder, Injector};
use std::any::type_name;
use std::sync::Arc;
use tracing::{debug, info};

/// An application kind the factory can build.
pub trait Shell: Sized + Send + 'static {
    /// Creates an empty, unconfigured instance.
    fn construct(import_name: &str) -> Self;

    /// Stores the configuration in the shell's native configuration surface.
    ///
    /// # Errors
    /// Kind-specific; reported as [`FactoryError::Configure`].
    fn configure(&mut self, config: ConfigMap) -> Result<(), BoxError>;
}

/// A loader callback: receives the factory and mutates the shell under construction.
pub type LoaderFn<F> = fn(&F, &mut <F as AppFactory>::App) -> Result<(), BoxError>;

/// One named loader.
pub type LoaderEntry<F> = Declared<LoaderFn<F>>;

/// Ordered loader declarations of one factory type.
pub type Loaders<F> = Declarations<LoaderFn<F>>;

/// Builds configured, dependency-wired applications of one kind.
///
/// # Example
/// ```rust
/// use appwire_kernel::prelude::*;
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// #[derive(Debug, Settings)]
/// struct Greeting {
///     #[setting(default = "hello")]
///     word: String,
/// }
///
/// #[derive(Debug, Default)]
/// struct Banner {
///     name: String,
///     lines: Vec<String>,
/// }
///
/// impl Shell for Banner {
///     fn construct(import_name: &str) -> Self {
///         Self { name: import_name.to_owned(), ..Self::default() }
///     }
///
///     fn configure(&mut self, config: ConfigMap) -> Result<(), BoxError> {
///         self.lines.extend(config.values().map(ToString::to_string));
///         Ok(())
///     }
/// }
///
/// #[derive(Debug)]
/// struct Deps(Arc<Greeting>);
///
/// impl DependencyBuilder for Deps {
///     type Config = Greeting;
///     fn new(config: Arc<Greeting>) -> Self { Self(config) }
///     fn config(&self) -> &Arc<Greeting> { &self.0 }
/// }
///
/// struct BannerFactory;
///
/// impl AppFactory for BannerFactory {
///     type App = Banner;
///     type Config = Greeting;
///     type Builder = Deps;
///
///     fn loaders(loaders: &mut Loaders<Self>) {
///         loaders.add("add_footer", |_, banner| {
///             banner.lines.push("--".to_owned());
///             Ok(())
///         });
///     }
///
///     fn load_config(&self) -> Result<Greeting, ConfigError> {
///         load_from_source(&HashMap::<String, String>::new())
///     }
/// }
///
/// # fn main() -> Result<(), FactoryError> {
/// let injector = Injector::new();
/// let banner = BannerFactory.create("banner", None, Some(&injector))?;
/// assert_eq!(banner.lines, ["\"hello\"", "--"]);
/// assert_eq!(injector.resolve::<Greeting>()?.word, "hello");
/// # Ok(())
/// # }
/// ```
pub trait AppFactory: Sized + Send + Sync + 'static {
    type App: Shell;
    type Config: ConfigSchema;
    type Builder: DependencyBuilder<Config = Self::Config>;

    /// Declares this factory's loaders, in order.
    fn loaders(_loaders: &mut Loaders<Self>) {}

    /// Resolves the configuration when none is passed to [`AppFactory::create`].
    ///
    /// # Errors
    /// The default reads the process environment; see
    /// [`load_from_source`](crate::config::load_from_source).
    fn load_config(&self) -> Result<Self::Config, ConfigError> {
        load_from_env()
    }

    fn create_app(&self, import_name: &str) -> Self::App {
        Self::App::construct(import_name)
    }

    /// Pushes every configuration field into the shell.
    ///
    /// # Errors
    /// [`FactoryError::Config`] when the configuration cannot be serialized,
    /// [`FactoryError::Configure`] when the shell rejects it.
    fn configure_app(&self, app: &mut Self::App, config: &Self::Config) -> Result<(), FactoryError> {
        let map = config.to_map()?;
        app.configure(map).map_err(|source| FactoryError::Configure { source, context: None })
    }

    /// Builds one application.
    ///
    /// `config` bypasses [`AppFactory::load_config`] entirely. Passing `None` as
    /// `injector` skips dependency registration; otherwise the injector's previous
    /// bindings are replaced.
    ///
    /// # Errors
    /// The first failure of any step, see [`FactoryError`].
    fn create(
        &self,
        import_name: &str,
        config: Option<Arc<Self::Config>>,
        injector: Option<&Injector>,
    ) -> Result<Self::App, FactoryError> {
        let factory = type_name::<Self>();
        let config = match config {
            Some(config) => config,
            None => Arc::new(self.load_config()?),
        };

        let mut app = self.create_app(import_name);
        self.configure_app(&mut app, &config)?;

        for loader in loader_list::<Self>().iter() {
            debug!(factory, loader = loader.name, "Running loader");
            (loader.callback)(self, &mut app).map_err(|source| FactoryError::Loader {
                loader: loader.name,
                source,
                context: None,
            })?;
        }

        if let Some(injector) = injector {
            let builder = Arc::new(Self::Builder::new(config));
            injector.configure(|binder| builder.register(binder))?;
        } else {
            debug!(factory, "Dependency registration skipped");
        }

        info!(factory, app = import_name, "Application created");
        Ok(app)
    }
}

/// The memoized loader list of `F`, in declaration order.
#[must_use]
pub fn loader_list<F: AppFactory>() -> Arc<Vec<LoaderEntry<F>>> {
    registry::cached(|| {
        let mut loaders = Loaders::default();
        F::loaders(&mut loaders);
        loaders.into_entries()
    })
}
