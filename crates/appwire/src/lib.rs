//! Facade crate for appwire.
//! Re-exports the kernel, the injector and every enabled application kind.
//! Keep this crate thin: it composes other crates, it does not implement behavior.
//!
//! ## Usage
//! - Add `appwire` with the kinds you build (`web`, `tasks`) and `logger` if wanted.
//! - `use appwire::prelude::*;` brings schemas, factories and the injector into scope.

pub use appwire_domain as domain;
pub use appwire_injector as injector;
pub use appwire_kernel as kernel;
pub use appwire_kernel::{Settings, config, factory};

#[cfg(feature = "logger")]
pub use appwire_logger as logger;
#[cfg(feature = "tasks")]
pub use appwire_tasks as tasks;
#[cfg(feature = "web")]
pub use appwire_web as web;

pub mod prelude {
    pub use appwire_domain::scope::ScopeKind;
    pub use appwire_kernel::prelude::*;

    #[cfg(feature = "logger")]
    pub use appwire_logger::{LogSettings, Logger};
    #[cfg(feature = "tasks")]
    pub use appwire_tasks::{TaskApp, TaskContext, TaskError, task_context};
    #[cfg(feature = "web")]
    pub use appwire_web::{Inject, RequestScope, WebApp, WebError, request_context};
}

/// Application kinds compiled into this build.
pub mod kinds {
    /// Enabled kinds, by Cargo feature.
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "web")]
        "web",
        #[cfg(feature = "tasks")]
        "tasks",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
