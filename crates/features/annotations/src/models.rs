//! Renderer, annotation and glyph model declarations.

use crate::mixins;
use pmark_domain::enums::{
    AngleUnits, CoordinateUnits, FontStyle, RenderLevel, TextAlign, VerticalAlign,
};
use pmark_schema::{Declare, EnumDomain, ModelBuilder, PropertyKind, Value};

pub const RENDERER: &str = "Renderer";
pub const ANNOTATION: &str = "Annotation";
pub const HTML_ANNOTATION: &str = "HTMLAnnotation";
pub const HTML_TEXT_ANNOTATION: &str = "HTMLTextAnnotation";
pub const HTML_LABEL: &str = "HTMLLabel";
pub const HTML_TITLE: &str = "HTMLTitle";
pub const HTML_TEXT: &str = "HTMLText";
pub const GLYPH_RENDERER: &str = "GlyphRenderer";

/// Every declaration, parents first.
#[must_use]
pub fn declarations() -> Vec<ModelBuilder> {
    vec![
        renderer(),
        annotation(),
        html_annotation(),
        html_text_annotation(),
        html_label(),
        html_title(),
        glyph_renderer(),
        html_text(),
    ]
}

#[must_use]
pub fn renderer() -> ModelBuilder {
    ModelBuilder::new(RENDERER)
        .help("Base of everything drawn inside a plot frame.")
        .scalar(
            "name",
            PropertyKind::nullable(PropertyKind::String),
            Value::Null,
            "An arbitrary, user-supplied name for this model.",
        )
        .scalar("visible", PropertyKind::Bool, true, "Is the renderer visible.")
        .enumeration(
            "level",
            EnumDomain::of::<RenderLevel>(),
            "image",
            "Specifies the level in which to paint this renderer.",
        )
        .scalar(
            "x_range_name",
            PropertyKind::String,
            "default",
            "The name of a named range to use for mapping x-coordinates.",
        )
        .scalar(
            "y_range_name",
            PropertyKind::String,
            "default",
            "The name of a named range to use for mapping y-coordinates.",
        )
}

#[must_use]
pub fn annotation() -> ModelBuilder {
    ModelBuilder::new(ANNOTATION)
        .extends(RENDERER)
        .help("Base for all annotation models.")
        .override_default("level", "annotation")
}

#[must_use]
pub fn html_annotation() -> ModelBuilder {
    ModelBuilder::new(HTML_ANNOTATION)
        .extends(ANNOTATION)
        .help("Base for annotations rendered as HTML elements.")
}

#[must_use]
pub fn html_text_annotation() -> ModelBuilder {
    text_box(
        ModelBuilder::new(HTML_TEXT_ANNOTATION)
            .extends(HTML_ANNOTATION)
            .help("Base for HTML annotations drawing text inside an optional box."),
    )
}

#[must_use]
pub fn html_label() -> ModelBuilder {
    let builder = ModelBuilder::new(HTML_LABEL)
        .extends(HTML_TEXT_ANNOTATION)
        .help("A single HTML label at given x and y coordinates.")
        .required(
            "x",
            PropertyKind::CoordinateLike,
            "The x-coordinate in screen coordinates to locate the text anchors.",
        )
        .enumeration(
            "x_units",
            EnumDomain::of::<CoordinateUnits>(),
            "data",
            "The unit type for the x attribute.",
        )
        .required(
            "y",
            PropertyKind::CoordinateLike,
            "The y-coordinate in screen coordinates to locate the text anchors.",
        )
        .enumeration(
            "y_units",
            EnumDomain::of::<CoordinateUnits>(),
            "data",
            "The unit type for the y attribute.",
        )
        .scalar("text", PropertyKind::String, "", "The text value to render.");
    offsets(rotation(builder)).include(mixins::TEXT, "", "The {prop} values for the text.")
}

#[must_use]
pub fn html_title() -> ModelBuilder {
    ModelBuilder::new(HTML_TITLE)
        .extends(HTML_TEXT_ANNOTATION)
        .help("A single title box.")
        .scalar("text", PropertyKind::String, "", "The text value to render.")
        .enumeration(
            "vertical_align",
            EnumDomain::of::<VerticalAlign>(),
            "bottom",
            "Alignment of the text across the direction of the text.",
        )
        .enumeration(
            "align",
            EnumDomain::of::<TextAlign>(),
            "left",
            "Alignment of the text along the direction of the text.",
        )
        .scalar(
            "text_line_height",
            PropertyKind::float(),
            1.0,
            "Additional space allocated for the title, as a fraction of the font size.",
        )
        .scalar(
            "offset",
            PropertyKind::float(),
            0.0,
            "Offset of the text in pixels, along the side the title is placed on.",
        )
        .scalar("standoff", PropertyKind::float(), 10.0, "")
        .scalar(
            "text_font",
            PropertyKind::String,
            "helvetica",
            "Name of a font to use for rendering text.",
        )
        .scalar("text_font_size", PropertyKind::String, "13px", "Font size as a CSS value.")
        .enumeration(
            "text_font_style",
            EnumDomain::of::<FontStyle>(),
            "bold",
            "A style to use for rendering text.",
        )
        .scalar("text_color", PropertyKind::Color, "#444444", "A color to use to fill text with.")
        .scalar(
            "text_outline_color",
            PropertyKind::nullable(PropertyKind::Color),
            Value::Null,
            "A color to use to outline text with.",
        )
        .scalar(
            "text_alpha",
            PropertyKind::alpha(),
            1.0,
            "An alpha value to use to fill text with.",
        )
}

#[must_use]
pub fn glyph_renderer() -> ModelBuilder {
    ModelBuilder::new(GLYPH_RENDERER)
        .extends(RENDERER)
        .help("Pairs a glyph with its rendering options.")
        .override_default("level", "glyph")
}

/// The vectorizable HTML text glyph. Coordinates default to the `x` and `y` fields.
#[must_use]
pub fn html_text() -> ModelBuilder {
    let builder = ModelBuilder::new(HTML_TEXT)
        .help("Text rendered as HTML at many positions.")
        .scalar(
            "x",
            PropertyKind::CoordinateLike,
            "x",
            "The x-coordinates to locate the text anchors.",
        )
        .scalar(
            "y",
            PropertyKind::CoordinateLike,
            "y",
            "The y-coordinates to locate the text anchors.",
        )
        .scalar("text", PropertyKind::String, "text", "The text values to render.");
    let builder = offsets(rotation(builder));
    text_box(builder.include(mixins::TEXT, "", "The {prop} values for the text."))
}

/// Padding, rounded corners, background fill and hatch, and a border around text.
fn text_box(builder: ModelBuilder) -> ModelBuilder {
    builder
        .scalar(
            "padding",
            PropertyKind::Padding,
            0,
            "Extra space between the text and its bounding box.",
        )
        .scalar(
            "border_radius",
            PropertyKind::BorderRadius,
            0,
            "Rounded corners of the bounding box.",
        )
        .include(mixins::FILL, "background", "The {prop} values for the text bounding box.")
        .include(mixins::HATCH, "background", "The {prop} values for the text bounding box.")
        .include(mixins::LINE, "border", "The {prop} values for the text bounding box.")
        .override_default("background_fill_color", Value::Null)
        .override_default("background_hatch_color", Value::Null)
        .override_default("border_line_color", Value::Null)
}

fn rotation(builder: ModelBuilder) -> ModelBuilder {
    builder
        .scalar(
            "angle",
            PropertyKind::angle("angle_units"),
            0.0,
            "The angle to rotate the text, as measured from the horizontal.",
        )
        .enumeration("angle_units", EnumDomain::of::<AngleUnits>(), "rad", "Units of the angle.")
}

fn offsets(builder: ModelBuilder) -> ModelBuilder {
    builder
        .scalar(
            "x_offset",
            PropertyKind::float(),
            0.0,
            "Offset value to apply to the x-coordinate.",
        )
        .scalar(
            "y_offset",
            PropertyKind::float(),
            0.0,
            "Offset value to apply to the y-coordinate.",
        )
}
