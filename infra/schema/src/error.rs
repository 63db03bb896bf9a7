use crate::value::Value;
use pmark_signals::SignalError;
use std::borrow::Cow;

/// Errors raised while declaring models or working with their instances.
#[pmark_derive::pmark_error]
pub enum SchemaError {
    /// A name is declared twice on the same model, counting inherited and included names.
    #[error("Duplicate attribute `{name}` on `{model}`")]
    DuplicateAttribute { model: String, name: String },

    /// A declared or overriding default is not valid for the attribute's kind.
    #[error("Invalid default for `{model}.{name}`: {value} is not a valid {expected}")]
    InvalidDefault { model: String, name: String, value: Value, expected: String },

    #[error("Unknown attribute `{name}` on `{model}`")]
    UnknownAttribute { model: String, name: String },

    #[error("Missing required attribute `{name}` on `{model}`")]
    MissingRequiredAttribute { model: String, name: String },

    /// A supplied value failed validation. Nothing was stored.
    #[error("Invalid value for `{model}.{name}`: {value} is not a valid {expected}")]
    Validation { model: String, name: String, value: Value, expected: String },

    /// The model has been instantiated or extended and can no longer be redefined.
    #[error("Model `{model}` is already in use and cannot be reopened")]
    SchemaReopened { model: String },

    #[error("Unknown property group `{name}`")]
    UnknownGroup { name: String },

    #[error("Property group `{name}` is already defined")]
    DuplicateGroup { name: String },

    #[error("Unknown model `{name}`")]
    UnknownModel { name: String },

    /// An instance outlived the model it was built from.
    #[error("Model `{model}` has been dropped")]
    ModelDropped { model: String },

    /// A raw input could not be turned into a property value.
    #[error("Unsupported value{}: {message}", format_context(.context))]
    UnsupportedValue { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Signal hub error{}: {source}", format_context(.context))]
    Signal { source: SignalError, context: Option<Cow<'static, str>> },

    #[error("Internal schema error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
