//! # Kernel
//!
//! Application bootstrap: typed configuration schemas materialized from environment-like
//! sources, and the [`factory::AppFactory`] that turns a schema, a shell and a list of
//! loaders into a configured, dependency-wired application.

pub mod config;
pub mod factory;
pub mod prelude;

pub use appwire_domain as domain;
pub use appwire_injector as injector;

pub use appwire_derive::Settings;
