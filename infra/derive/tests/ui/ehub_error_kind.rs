use ehub_derive::ehub_error;
use std::borrow::Cow;

#[ehub_error]
pub enum LookupError {
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Transport failure{}: {message}", format_context(.context))]
    Transport { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = LookupError::Transport { message: "timeout".into(), context: None };
    assert_eq!(err.kind(), "Transport");

    let err: Result<(), LookupError> =
        Err(LookupError::NotFound { message: "artfair".into(), context: None });
    let err = err.context("Resolving host").unwrap_err();
    assert_eq!(err.kind(), "NotFound");
    assert_eq!(err.to_string(), "Not found (Resolving host): artfair");
}
