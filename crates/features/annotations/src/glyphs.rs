use crate::error::{AnnotationError, AnnotationErrorExt};
use crate::models::GLYPH_RENDERER;
use pmark_schema::{Instance, Schema, SchemaError, Snapshot, Value};
use serde::Serialize;
use tracing::debug;

/// A glyph instance paired with the renderer instance that draws it.
#[derive(Debug)]
pub struct GlyphRenderer {
    renderer: Instance,
    glyph: Instance,
}

/// Serializable view of a [`GlyphRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphRendererSnapshot {
    pub renderer: Snapshot,
    pub glyph: Snapshot,
}

impl GlyphRenderer {
    #[must_use]
    pub const fn renderer(&self) -> &Instance {
        &self.renderer
    }

    pub const fn renderer_mut(&mut self) -> &mut Instance {
        &mut self.renderer
    }

    #[must_use]
    pub const fn glyph(&self) -> &Instance {
        &self.glyph
    }

    pub const fn glyph_mut(&mut self) -> &mut Instance {
        &mut self.glyph
    }

    pub fn snapshot(&self) -> Result<GlyphRendererSnapshot, SchemaError> {
        Ok(GlyphRendererSnapshot {
            renderer: self.renderer.snapshot()?,
            glyph: self.glyph.snapshot()?,
        })
    }
}

/// Builds a glyph of model `glyph` together with its renderer.
///
/// Keywords naming a property of the renderer model go to the renderer; every other
/// keyword goes to the glyph, which rejects names it does not declare.
pub fn build_glyph_renderer<K>(
    schema: &Schema,
    glyph: &str,
    kwargs: impl IntoIterator<Item = (K, Value)>,
) -> Result<GlyphRenderer, AnnotationError>
where
    K: Into<String>,
{
    let renderer_model = schema.model(GLYPH_RENDERER)?;
    let glyph_model = schema.model(glyph)?;

    let (renderer_kwargs, glyph_kwargs): (Vec<_>, Vec<_>) = kwargs
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .partition(|(key, _)| renderer_model.descriptor(key).is_some());

    debug!(
        glyph,
        renderer_keys = renderer_kwargs.len(),
        glyph_keys = glyph_kwargs.len(),
        "Building glyph renderer"
    );

    let glyph = glyph_model.construct(glyph_kwargs).context("Constructing glyph")?;
    let renderer = renderer_model.construct(renderer_kwargs).context("Constructing renderer")?;
    Ok(GlyphRenderer { renderer, glyph })
}
