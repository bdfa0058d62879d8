use appwire_derive::wire_error;
use std::borrow::Cow;

#[wire_error]
pub enum ReloadError {
    #[error("Watch error{}: {source}", format_context(.context))]
    Watch {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn reload() -> Result<(), ReloadError> {
    Err(std::io::Error::other("gone")).context("Watching config directory")
}

fn main() {
    let err = reload().unwrap_err();
    assert_eq!(err.to_string(), "Watch error (Watching config directory): gone");

    let internal: ReloadError = "boom".into();
    assert!(matches!(internal, ReloadError::Internal { context: None, .. }));
}
