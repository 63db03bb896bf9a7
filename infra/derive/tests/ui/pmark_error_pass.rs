use pmark_derive::pmark_error;
use std::borrow::Cow;

#[pmark_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected `{name}`{}", format_context(.context))]
    Rejected { name: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: DemoError = "boom".into();
    assert_eq!(err.kind(), "Internal");

    let err = DemoError::from(std::io::Error::other("disk"));
    assert_eq!(err.kind(), "Io");
    assert_eq!(err.to_string(), "IO error: disk");
}
