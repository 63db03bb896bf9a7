//! Named enumerations used by annotation properties.
//!
//! Every enumeration implements [`Enumeration`], which gives the schema engine its
//! ordered list of allowed values and a stable name for error messages.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::str::FromStr;
use strum::VariantNames;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, VariantNames};

/// A closed set of string values with a stable name.
pub trait Enumeration: VariantNames + FromStr + AsRef<str> + Copy + 'static {
    /// Name used when describing the expected kind (e.g., `"TextAlign"`).
    const NAME: &'static str;

    /// Allowed values, in declaration order.
    #[must_use]
    fn values() -> &'static [&'static str] {
        Self::VARIANTS
    }
}

macro_rules! enumeration {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            Display, EnumString, AsRefStr, VariantNames, EnumIter,
            Serialize, Deserialize,
        )]
        #[strum(serialize_all = "snake_case")]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Enumeration for $name {
            const NAME: &'static str = stringify!($name);
        }
    };
}

enumeration! {
    /// Coordinate space of a position property.
    CoordinateUnits { Canvas, Screen, Data }
}

enumeration! {
    /// Units used to interpret a raw angle value.
    AngleUnits { Deg, Rad, Grad, Turn }
}

enumeration! {
    /// Alignment along the direction of the text.
    TextAlign { Left, Right, Center }
}

enumeration! {
    /// Alignment across the direction of the text.
    VerticalAlign { Top, Middle, Bottom }
}

enumeration! {
    /// Font style keywords.
    FontStyle {
        Normal,
        Italic,
        Bold,
        #[strum(serialize = "bold italic")]
        #[serde(rename = "bold italic")]
        BoldItalic,
    }
}

enumeration! {
    /// Baseline used when positioning text.
    TextBaseline { Top, Middle, Bottom, Alphabetic, Hanging, Ideographic }
}

enumeration! {
    /// Shape used where two line segments meet.
    LineJoin { Miter, Round, Bevel }
}

enumeration! {
    /// Shape used at the end of an open line.
    LineCap { Butt, Round, Square }
}

enumeration! {
    /// Named dash patterns.
    DashPattern { Solid, Dashed, Dotted, Dotdash, Dashdot }
}

enumeration! {
    /// Built-in hatch patterns.
    HatchPattern {
        Blank,
        Dot,
        Ring,
        HorizontalLine,
        VerticalLine,
        Cross,
        HorizontalDash,
        VerticalDash,
        Spiral,
        RightDiagonalLine,
        LeftDiagonalLine,
        DiagonalCross,
        RightDiagonalDash,
        LeftDiagonalDash,
        HorizontalWave,
        VerticalWave,
        CrissCross,
    }
}

enumeration! {
    /// Render pass a renderer is drawn in.
    RenderLevel { Image, Underlay, Glyph, Guide, Annotation, Overlay }
}

impl AngleUnits {
    /// Converts a raw value expressed in these units to radians.
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Rad => value,
            Self::Deg => value.to_radians(),
            Self::Grad => value * PI / 200.0,
            Self::Turn => value * TAU,
        }
    }
}

impl DashPattern {
    /// On/off segment lengths in screen units. An empty slice is a solid line.
    #[must_use]
    pub const fn segments(self) -> &'static [u32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[6],
            Self::Dotted => &[2, 4],
            Self::Dotdash => &[2, 4, 6, 4],
            Self::Dashdot => &[6, 4, 2, 4],
        }
    }
}

impl HatchPattern {
    /// Single-character abbreviation accepted by renderers.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Blank => " ",
            Self::Dot => ".",
            Self::Ring => "o",
            Self::HorizontalLine => "-",
            Self::VerticalLine => "|",
            Self::Cross => "+",
            Self::HorizontalDash => "\"",
            Self::VerticalDash => ":",
            Self::Spiral => "@",
            Self::RightDiagonalLine => "/",
            Self::LeftDiagonalLine => "\\",
            Self::DiagonalCross => "x",
            Self::RightDiagonalDash => ",",
            Self::LeftDiagonalDash => "`",
            Self::HorizontalWave => "v",
            Self::VerticalWave => ">",
            Self::CrissCross => "*",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn values_follow_declaration_order() {
        assert_eq!(TextAlign::values(), &["left", "right", "center"]);
        assert_eq!(CoordinateUnits::values(), &["canvas", "screen", "data"]);
        assert_eq!(FontStyle::values(), &["normal", "italic", "bold", "bold italic"]);
    }

    #[test]
    fn parse_and_display_agree() {
        for style in FontStyle::iter() {
            assert_eq!(style.to_string().parse::<FontStyle>().ok(), Some(style));
        }
        assert_eq!(HatchPattern::from_str("criss_cross").ok(), Some(HatchPattern::CrissCross));
        assert!(TextAlign::from_str("up").is_err());
    }

    #[test]
    fn angle_units_convert_to_radians() {
        assert!((AngleUnits::Deg.to_radians(180.0) - PI).abs() < 1e-12);
        assert!((AngleUnits::Grad.to_radians(200.0) - PI).abs() < 1e-12);
        assert!((AngleUnits::Turn.to_radians(0.5) - PI).abs() < 1e-12);
        assert!((AngleUnits::Rad.to_radians(1.25) - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn hatch_abbreviations_are_unique() {
        let mut seen: Vec<&str> = HatchPattern::iter().map(HatchPattern::abbreviation).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), HatchPattern::VARIANTS.len());
    }
}
