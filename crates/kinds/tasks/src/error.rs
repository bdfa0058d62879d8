use appwire_injector::{BoxError, InjectError};
use std::borrow::Cow;

#[appwire_derive::wire_error]
pub enum TaskError {
    #[error("Unknown task{}: {message}", format_context(.context))]
    UnknownTask { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The handler returned an error of its own.
    #[error("Task `{task}` failed{}: {source}", format_context(.context))]
    Failed { task: String, source: BoxError, context: Option<Cow<'static, str>> },

    /// The handler failed to resolve one of its dependencies.
    #[error("Dependency resolution failed{}: {source}", format_context(.context))]
    Inject { source: InjectError, context: Option<Cow<'static, str>> },
}

impl TaskError {
    /// Classifies a handler failure, unwrapping injection errors.
    pub(crate) fn from_handler(task: &str, source: BoxError) -> Self {
        match source.downcast::<InjectError>() {
            Ok(source) => Self::Inject { source: *source, context: Some(task.to_owned().into()) },
            Err(source) => Self::Failed { task: task.to_owned(), source, context: None },
        }
    }
}
