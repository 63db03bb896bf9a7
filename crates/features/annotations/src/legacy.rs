//! Deprecated convenience constructors kept for source compatibility.

use crate::error::AnnotationError;
use crate::glyphs::{GlyphRenderer, build_glyph_renderer};
use crate::models::HTML_TEXT;
use pmark_domain::deprecation::{Deprecated, Version};
use pmark_schema::{Schema, Value};
use std::borrow::Cow;
use tracing::warn;

/// Deprecation notice emitted by [`html_label_set`].
pub const HTML_LABEL_SET_DEPRECATION: Deprecated = Deprecated {
    since: Version::new(3, 7, 0),
    old: Cow::Borrowed("annotations.HTMLLabelSet"),
    replacement: Cow::Borrowed("glyphs.HTMLText or figure.html_text()"),
};

/// Keyword rewrites applied before delegating to the glyph path.
const TRANSFORMS: &[(&str, fn(Value) -> Value)] = &[("y_offset", Value::negated)];

/// Renders many HTML labels through an [`HTML_TEXT`] glyph renderer.
///
/// Emits one [`Deprecated`] signal on the schema's hub, then flips the sign of
/// `y_offset` (labels measure it downwards, glyphs upwards) and builds the renderer.
///
/// # Errors
/// Any construction error of the glyph or renderer; unknown keywords are rejected.
pub fn html_label_set<K>(
    schema: &Schema,
    kwargs: impl IntoIterator<Item = (K, Value)>,
) -> Result<GlyphRenderer, AnnotationError>
where
    K: Into<String>,
{
    let notice = HTML_LABEL_SET_DEPRECATION;
    warn!(since = %notice.since, old = %notice.old, replacement = %notice.replacement, "{notice}");
    schema.hub().emit(notice)?;

    let kwargs = kwargs.into_iter().map(|(key, value)| {
        let key: String = key.into();
        let value = match TRANSFORMS.iter().find(|(name, _)| *name == key) {
            Some((_, transform)) => transform(value),
            None => value,
        };
        (key, value)
    });
    build_glyph_renderer(schema, HTML_TEXT, kwargs)
}
