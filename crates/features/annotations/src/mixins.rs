//! Scalar visual property groups shared by annotations and glyphs.

use pmark_domain::enums::{FontStyle, HatchPattern, LineCap, LineJoin, TextAlign, TextBaseline};
use pmark_schema::{Declare, EnumDomain, PropertyGroup, PropertyKind, SchemaError, Value};
use strum::IntoEnumIterator;

pub const FILL: &str = "scalar_fill";
pub const HATCH: &str = "scalar_hatch";
pub const LINE: &str = "scalar_line";
pub const TEXT: &str = "scalar_text";

/// All groups, in install order.
pub fn groups() -> Result<Vec<PropertyGroup>, SchemaError> {
    Ok(vec![fill()?, hatch()?, line()?, text()?])
}

pub fn fill() -> Result<PropertyGroup, SchemaError> {
    PropertyGroup::builder(FILL)
        .help("Fill color and alpha.")
        .scalar(
            "fill_color",
            PropertyKind::nullable(PropertyKind::Color),
            "gray",
            "A color to use to fill paths with.",
        )
        .scalar(
            "fill_alpha",
            PropertyKind::alpha(),
            1.0,
            "An alpha value to use to fill paths with.",
        )
        .build()
}

pub fn hatch() -> Result<PropertyGroup, SchemaError> {
    PropertyGroup::builder(HATCH)
        .help("Hatch pattern, color and weight.")
        .scalar(
            "hatch_color",
            PropertyKind::nullable(PropertyKind::Color),
            "black",
            "A color to use to hatch paths with.",
        )
        .scalar(
            "hatch_alpha",
            PropertyKind::alpha(),
            1.0,
            "An alpha value to use to hatch paths with.",
        )
        .scalar("hatch_scale", PropertyKind::size(), 12.0, "A rough measure of the hatch spacing.")
        .scalar(
            "hatch_pattern",
            PropertyKind::nullable(PropertyKind::Enum(hatch_patterns())),
            Value::Null,
            "A hatch pattern name or its single character abbreviation.",
        )
        .scalar("hatch_weight", PropertyKind::size(), 1.0, "A width for the hatch pattern lines.")
        .build()
}

pub fn line() -> Result<PropertyGroup, SchemaError> {
    PropertyGroup::builder(LINE)
        .help("Stroke color, width, joins, caps and dashes.")
        .scalar(
            "line_color",
            PropertyKind::nullable(PropertyKind::Color),
            "black",
            "A color to use to stroke paths with.",
        )
        .scalar(
            "line_alpha",
            PropertyKind::alpha(),
            1.0,
            "An alpha value to use to stroke paths with.",
        )
        .scalar("line_width", PropertyKind::size(), 1.0, "Stroke width in units of pixels.")
        .enumeration(
            "line_join",
            EnumDomain::of::<LineJoin>(),
            "bevel",
            "How path segments should be joined together.",
        )
        .enumeration(
            "line_cap",
            EnumDomain::of::<LineCap>(),
            "butt",
            "How path segments should be terminated.",
        )
        .scalar(
            "line_dash",
            PropertyKind::DashPattern,
            Value::List(Vec::new()),
            "How should the line be dashed.",
        )
        .scalar(
            "line_dash_offset",
            PropertyKind::int(),
            0,
            "The distance into the line_dash to start.",
        )
        .build()
}

pub fn text() -> Result<PropertyGroup, SchemaError> {
    PropertyGroup::builder(TEXT)
        .help("Font, color and alignment of text.")
        .scalar(
            "text_color",
            PropertyKind::nullable(PropertyKind::Color),
            "#444444",
            "A color to use to fill text with.",
        )
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
        .scalar(
            "text_font",
            PropertyKind::String,
            "helvetica",
            "Name of a font to use for rendering text.",
        )
        .scalar("text_font_size", PropertyKind::FontSize, "16px", "Font size as a CSS length.")
        .enumeration(
            "text_font_style",
            EnumDomain::of::<FontStyle>(),
            "normal",
            "A style to use for rendering text.",
        )
        .enumeration(
            "text_align",
            EnumDomain::of::<TextAlign>(),
            "left",
            "Horizontal anchor point to use when rendering text.",
        )
        .enumeration(
            "text_baseline",
            EnumDomain::of::<TextBaseline>(),
            "bottom",
            "Vertical anchor point to use when rendering text.",
        )
        .scalar(
            "text_line_height",
            PropertyKind::float(),
            1.2,
            "Line height of multi-line text, relative to the font size.",
        )
        .build()
}

/// Hatch pattern names followed by their abbreviations.
fn hatch_patterns() -> EnumDomain {
    let names = HatchPattern::iter().map(|p| p.as_ref().to_owned());
    let abbreviations = HatchPattern::iter().map(|p| p.abbreviation().to_owned());
    EnumDomain::new("HatchPattern", names.chain(abbreviations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_build_without_collisions() {
        let groups = groups().unwrap();
        let names: Vec<_> = groups.iter().map(PropertyGroup::name).collect();
        assert_eq!(names, [FILL, HATCH, LINE, TEXT]);
        assert_eq!(groups[3].members().len(), 9);
    }

    #[test]
    fn hatch_patterns_accept_names_and_abbreviations() {
        let domain = hatch_patterns();
        assert!(domain.contains("criss_cross"));
        assert!(domain.contains("*"));
        assert_eq!(domain.values().len(), 34);
    }
}
