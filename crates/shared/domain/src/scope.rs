use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// The kind of logical execution unit a scope context belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// One inbound web request.
    Request,
    /// One task invocation.
    Task,
    /// Anything else a custom application kind defines.
    Custom(Cow<'static, str>),
}

impl ScopeKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Request => "request",
            Self::Task => "task",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
