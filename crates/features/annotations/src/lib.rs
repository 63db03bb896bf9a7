//! Annotation feature slice.
//!
//! Installs the scalar fill / hatch / line / text property groups and the HTML
//! annotation models (`HTMLLabel`, `HTMLTitle`) into a [`Schema`], together with the
//! `HTMLText` glyph and its `GlyphRenderer`. [`Catalog`] wraps the installed schema.
//!
//! ```rust
//! use pmark_annotations::{Catalog, models};
//! use pmark_schema::{Schema, Value};
//!
//! # fn main() -> Result<(), pmark_annotations::AnnotationError> {
//! let catalog = Catalog::install(Schema::default())?;
//! let label = catalog.construct(models::HTML_LABEL, [("x", Value::Int(1)), ("y", Value::Int(2))])?;
//! assert_eq!(label.get("background_fill_color")?, &Value::Null);
//! # Ok(())
//! # }
//! ```

mod error;
mod glyphs;
mod legacy;
pub mod mixins;
pub mod models;

pub use error::{AnnotationError, AnnotationErrorExt};
pub use glyphs::{GlyphRenderer, GlyphRendererSnapshot, build_glyph_renderer};
pub use legacy::{HTML_LABEL_SET_DEPRECATION, html_label_set};

use pmark_schema::{Instance, Schema, Value};
use tracing::info;

/// A schema with every annotation group and model installed.
#[derive(Debug, Clone)]
pub struct Catalog {
    schema: Schema,
}

impl Catalog {
    /// Defines the property groups, then registers every model, parents first.
    pub fn install(schema: Schema) -> Result<Self, AnnotationError> {
        for group in mixins::groups()? {
            schema.define_group(group).context("Installing property groups")?;
        }
        for declaration in models::declarations() {
            let name = declaration.name().to_owned();
            schema.register(declaration).context(format!("Registering {name}"))?;
        }
        info!(models = schema.models().len(), "Annotation catalog installed");
        Ok(Self { schema })
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Constructs an instance of a catalog model.
    pub fn construct<K, V>(
        &self,
        model: &str,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Instance, AnnotationError>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        Ok(self.schema.construct(model, values)?)
    }

    /// See [`build_glyph_renderer`].
    pub fn build_glyph_renderer<K: Into<String>>(
        &self,
        glyph: &str,
        kwargs: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<GlyphRenderer, AnnotationError> {
        build_glyph_renderer(&self.schema, glyph, kwargs)
    }

    /// Legacy label-set constructor; prefer [`Catalog::build_glyph_renderer`] with
    /// [`models::HTML_TEXT`]. See [`html_label_set`].
    pub fn html_label_set<K: Into<String>>(
        &self,
        kwargs: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<GlyphRenderer, AnnotationError> {
        html_label_set(&self.schema, kwargs)
    }
}
