//! # Tasks
//!
//! The task application kind: [`TaskApp`] keeps a table of named handlers and runs
//! each invocation inside its own [`ScopeContext`](appwire_injector::ScopeContext)
//! of kind [`ScopeKind::Task`](appwire_domain::scope::ScopeKind::Task).
//!
//! Handlers take JSON and return JSON; dependencies come from the [`TaskContext`].

mod app;
mod context;
mod error;

pub use crate::app::{TaskApp, TaskHandler};
pub use crate::context::{TaskContext, task_context};
pub use crate::error::{TaskError, TaskErrorExt};
