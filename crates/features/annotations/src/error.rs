use pmark_schema::SchemaError;
use pmark_signals::SignalError;
use std::borrow::Cow;

/// Errors raised by the annotation catalog.
#[pmark_derive::pmark_error]
pub enum AnnotationError {
    #[error("Schema error{}: {source}", format_context(.context))]
    Schema { source: SchemaError, context: Option<Cow<'static, str>> },

    #[error("Signal error{}: {source}", format_context(.context))]
    Signal { source: SignalError, context: Option<Cow<'static, str>> },

    #[error("Internal annotation error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl AnnotationError {
    /// The schema error underneath, if any.
    #[must_use]
    pub const fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema { source, .. } => Some(source),
            _ => None,
        }
    }
}
