use crate::BoxError;
use std::borrow::Cow;

/// Errors raised while registering or resolving dependencies.
#[appwire_derive::wire_error]
pub enum InjectError {
    /// Nothing is bound for the requested type.
    #[error("No binding{}: {message}", format_context(.context))]
    Unbound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A stored value could not be downcast to the requested type.
    /// This usually means two providers share one scope key.
    #[error("Binding type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The builder does not supply a scope context, or the resolution happened outside one.
    #[error("No scope context configured{}: {message}", format_context(.context))]
    NoScopeContext { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The resolution runs inside a scope of a different kind.
    #[error("Scope mismatch{}: {message}", format_context(.context))]
    ScopeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A provider or binder failed with its own error.
    #[error("Provider failed{}: {source}", format_context(.context))]
    Provider { source: BoxError, context: Option<Cow<'static, str>> },
}

impl InjectError {
    /// Wraps any provider-side failure.
    pub fn provider(err: impl Into<BoxError>) -> Self {
        Self::Provider { source: err.into(), context: None }
    }
}
