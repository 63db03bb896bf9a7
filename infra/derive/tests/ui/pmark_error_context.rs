use pmark_derive::pmark_error;
use std::borrow::Cow;

#[pmark_error]
pub enum LookupError {
    #[error("Missing `{name}`{}", format_context(.context))]
    Missing { name: String, context: Option<Cow<'static, str>> },

    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
}

fn lookup(name: &str) -> Result<u32, LookupError> {
    Err(LookupError::Missing { name: name.to_owned(), context: None })
}

fn parse(raw: &str) -> Result<u32, LookupError> {
    raw.parse::<u32>().context("parsing a counter")
}

fn main() {
    let err = lookup("width").context("resolving layout").unwrap_err();
    assert_eq!(err.to_string(), "Missing `width` (resolving layout)");

    let err = parse("nope").unwrap_err();
    assert!(matches!(err, LookupError::Parse { context: Some(_), .. }));
    assert_eq!(err.kind(), "Parse");
}
