#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Plotmark crates.
//!
//! ## Usage
//! Add the crate as a regular dependency next to `thiserror`:
//! ```toml
//! [dependencies]
//! pmark-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already derived.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and
///   to `Result<T, Source>` for every variant that wraps a `source`.
/// * **Conversions**: `From<Source>` for source-carrying variants, plus `From<&'static str>`
///   and `From<String>` when an `Internal { message, context }` variant exists.
/// * **Introspection**: an inherent `kind()` returning the variant name, handy for structured
///   log fields.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A variant with a `source` (by name, `#[source]` or `#[from]`) must also declare
///    `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use pmark_derive::pmark_error;
/// use std::borrow::Cow;
///
/// #[pmark_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Vec<u8>, StoreError> {
///     std::fs::read("store.bin").context("Reading the store")
/// }
/// ```
#[proc_macro_attribute]
pub fn pmark_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
