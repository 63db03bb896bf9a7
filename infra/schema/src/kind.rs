//! Property kinds and their validators.

use crate::color::Color;
use crate::value::Value;
use pmark_domain::enums::{DashPattern, Enumeration};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

const FONT_SIZE_UNITS: &[&str] = &["rem", "px", "pt", "em", "ex", "ch", "vw", "vh", "%"];

/// The closed set of strings an enumerated property accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDomain {
    name: Cow<'static, str>,
    values: Arc<[Cow<'static, str>]>,
}

impl EnumDomain {
    /// An ad-hoc domain. Duplicate values keep their first position.
    pub fn new<I, S>(name: impl Into<Cow<'static, str>>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let mut unique: Vec<Cow<'static, str>> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self { name: name.into(), values: unique.into() }
    }

    /// The domain of a named enumeration.
    #[must_use]
    pub fn of<E: Enumeration>() -> Self {
        Self {
            name: Cow::Borrowed(E::NAME),
            values: E::values().iter().map(|v| Cow::Borrowed(*v)).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Cow<'static, str>] {
        &self.values
    }

    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        self.values.iter().any(|v| v == candidate)
    }
}

/// The type of a property: what it accepts and how accepted values are canonicalised.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Any value, including `null`.
    Any,
    Bool,
    Int { min: Option<i64>, max: Option<i64> },
    Float { min: Option<f64>, max: Option<f64> },
    String,
    /// A CSS length such as `13px` or `1.5em`.
    FontSize,
    Enum(EnumDomain),
    Color,
    /// A raw number interpreted through the enumerated companion property `units`.
    Angle { units: Cow<'static, str> },
    /// A number, a factor string, or a nested factor of two or three strings.
    CoordinateLike,
    /// A non-negative number, or two or four of them.
    Padding,
    /// A non-negative number, or four of them.
    BorderRadius,
    /// A named dash pattern, a space separated string of lengths, or a list of lengths.
    DashPattern,
    Nullable(Box<PropertyKind>),
}

impl PropertyKind {
    #[must_use]
    pub const fn int() -> Self {
        Self::Int { min: None, max: None }
    }

    #[must_use]
    pub const fn float() -> Self {
        Self::Float { min: None, max: None }
    }

    /// Floats in `[0, 1]`.
    #[must_use]
    pub const fn alpha() -> Self {
        Self::Float { min: Some(0.0), max: Some(1.0) }
    }

    /// Floats `>= 0` used for sizes in screen units.
    #[must_use]
    pub const fn size() -> Self {
        Self::non_negative()
    }

    #[must_use]
    pub const fn non_negative() -> Self {
        Self::Float { min: Some(0.0), max: None }
    }

    #[must_use]
    pub fn enumeration<E: Enumeration>() -> Self {
        Self::Enum(EnumDomain::of::<E>())
    }

    #[must_use]
    pub fn angle(units: impl Into<Cow<'static, str>>) -> Self {
        Self::Angle { units: units.into() }
    }

    #[must_use]
    pub fn nullable(inner: Self) -> Self {
        match inner {
            nullable @ (Self::Nullable(_) | Self::Any) => nullable,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Whether `null` is a valid value.
    #[must_use]
    pub const fn accepts_null(&self) -> bool {
        matches!(self, Self::Nullable(_) | Self::Any)
    }

    /// The enum domain behind this kind, looking through `Nullable`.
    #[must_use]
    pub fn domain(&self) -> Option<&EnumDomain> {
        match self {
            Self::Enum(domain) => Some(domain),
            Self::Nullable(inner) => inner.domain(),
            _ => None,
        }
    }

    /// Name of the companion units property of an angle, looking through `Nullable`.
    #[must_use]
    pub fn angle_units(&self) -> Option<&str> {
        match self {
            Self::Angle { units } => Some(units.as_ref()),
            Self::Nullable(inner) => inner.angle_units(),
            _ => None,
        }
    }

    /// Validates `value` and returns its canonical form, or `None` when it is rejected.
    #[must_use]
    pub fn canonicalize(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::Any, v) => Some(v.clone()),
            (Self::Nullable(_), Value::Null) => Some(Value::Null),
            (Self::Nullable(inner), v) => inner.canonicalize(v),
            (_, Value::Null) => None,
            (Self::Bool, Value::Bool(_)) => Some(value.clone()),
            (Self::Int { min, max }, v) => {
                let int = integral(v)?;
                let in_range = min.is_none_or(|m| int >= m) && max.is_none_or(|m| int <= m);
                in_range.then_some(Value::Int(int))
            },
            (Self::Float { min, max }, v) => {
                let float = v.as_f64().filter(|f| f.is_finite())?;
                let in_range = min.is_none_or(|m| float >= m) && max.is_none_or(|m| float <= m);
                in_range.then_some(Value::Float(float))
            },
            (Self::String, Value::String(_)) => Some(value.clone()),
            (Self::FontSize, Value::String(s)) => is_font_size(s).then(|| value.clone()),
            (Self::Enum(domain), Value::String(s)) => domain.contains(s).then(|| value.clone()),
            (Self::Color, v) => Color::from_value(v).map(Value::Color),
            (Self::Angle { .. }, v) => v.as_f64().filter(|f| f.is_finite()).map(Value::Float),
            (Self::CoordinateLike, v) => coordinate(v),
            (Self::Padding, v) => non_negative_numbers(v, &[2, 4]),
            (Self::BorderRadius, v) => non_negative_numbers(v, &[4]),
            (Self::DashPattern, v) => dash_pattern(v),
            _ => None,
        }
    }

    /// Human-readable description used in error messages and schema listings.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Bool => f.write_str("Bool"),
            Self::Int { min, max } => write_range(f, "Int", *min, *max),
            Self::Float { min, max } => write_range(f, "Float", *min, *max),
            Self::String => f.write_str("String"),
            Self::FontSize => f.write_str("FontSize"),
            Self::Enum(domain) => write!(f, "Enum({}: {})", domain.name, domain.values.join("|")),
            Self::Color => f.write_str("Color"),
            Self::Angle { units } => write!(f, "Angle(units: {units})"),
            Self::CoordinateLike => f.write_str("CoordinateLike"),
            Self::Padding => f.write_str("Padding"),
            Self::BorderRadius => f.write_str("BorderRadius"),
            Self::DashPattern => f.write_str("DashPattern"),
            Self::Nullable(inner) => write!(f, "Nullable({inner})"),
        }
    }
}

impl Serialize for PropertyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

fn write_range<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    min: Option<T>,
    max: Option<T>,
) -> fmt::Result {
    match (min, max) {
        (None, None) => f.write_str(name),
        (Some(lo), Some(hi)) => write!(f, "{name}[{lo}, {hi}]"),
        (Some(lo), None) => write!(f, "{name}(>= {lo})"),
        (None, Some(hi)) => write!(f, "{name}(<= {hi})"),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Int(v) => Some(*v),
        Value::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Some(*v as i64),
        _ => None,
    }
}

fn is_font_size(text: &str) -> bool {
    FONT_SIZE_UNITS.iter().any(|unit| {
        text.strip_suffix(unit).is_some_and(|number| {
            !number.is_empty() && number.parse::<f64>().is_ok_and(f64::is_finite)
        })
    })
}

fn coordinate(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) | Value::Float(_) => value.as_f64().filter(|f| f.is_finite()).map(Value::Float),
        Value::String(_) => Some(value.clone()),
        Value::List(items)
            if (2..=3).contains(&items.len()) && items.iter().all(|i| i.as_str().is_some()) =>
        {
            Some(value.clone())
        },
        _ => None,
    }
}

fn non_negative_numbers(value: &Value, list_lengths: &[usize]) -> Option<Value> {
    let non_negative = |v: &Value| v.as_f64().is_some_and(|f| f.is_finite() && f >= 0.0);
    match value {
        Value::Int(_) | Value::Float(_) => non_negative(value).then(|| value.clone()),
        Value::List(items) if list_lengths.contains(&items.len()) => {
            items.iter().all(non_negative).then(|| value.clone())
        },
        _ => None,
    }
}

fn dash_pattern(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) if s.parse::<DashPattern>().is_ok() => Some(value.clone()),
        Value::String(s) => s
            .split_whitespace()
            .map(|part| part.parse::<u32>().ok().map(|n| Value::Int(i64::from(n))))
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
        Value::List(items) => items
            .iter()
            .map(|item| match item {
                Value::Int(n) if *n >= 0 => Some(Value::Int(*n)),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmark_domain::enums::TextAlign;

    #[test]
    fn nullable_accepts_null_and_inner_values() {
        let kind = PropertyKind::nullable(PropertyKind::Color);
        assert_eq!(kind.canonicalize(&Value::Null), Some(Value::Null));
        assert_eq!(kind.canonicalize(&Value::from("red")), Some(Value::Color(Color::rgb(255, 0, 0))));
        assert_eq!(PropertyKind::Color.canonicalize(&Value::Null), None);
    }

    #[test]
    fn nullable_does_not_nest() {
        let once = PropertyKind::nullable(PropertyKind::String);
        assert_eq!(PropertyKind::nullable(once.clone()), once);
        assert_eq!(PropertyKind::nullable(PropertyKind::Any), PropertyKind::Any);
    }

    #[test]
    fn numeric_ranges_are_enforced() {
        let alpha = PropertyKind::alpha();
        assert_eq!(alpha.canonicalize(&Value::Int(1)), Some(Value::Float(1.0)));
        assert_eq!(alpha.canonicalize(&Value::Float(1.5)), None);
        assert_eq!(alpha.canonicalize(&Value::Float(f64::NAN)), None);

        let small = PropertyKind::Int { min: Some(0), max: Some(10) };
        assert_eq!(small.canonicalize(&Value::Float(3.0)), Some(Value::Int(3)));
        assert_eq!(small.canonicalize(&Value::Float(3.5)), None);
        assert_eq!(small.canonicalize(&Value::Int(11)), None);
    }

    #[test]
    fn enum_membership() {
        let kind = PropertyKind::enumeration::<TextAlign>();
        assert!(kind.canonicalize(&Value::from("center")).is_some());
        assert!(kind.canonicalize(&Value::from("up")).is_none());
        assert_eq!(kind.to_string(), "Enum(TextAlign: left|right|center)");
    }

    #[test]
    fn ad_hoc_domains_drop_duplicates() {
        let domain = EnumDomain::new("Align", ["left", "center", "left", "right"]);
        assert_eq!(domain.values(), &["left", "center", "right"]);
    }

    #[test]
    fn font_sizes_need_a_unit() {
        for ok in ["13px", "1.5em", "2rem", "100%", "12pt"] {
            assert!(PropertyKind::FontSize.canonicalize(&Value::from(ok)).is_some(), "{ok}");
        }
        for bad in ["13", "px", "big", "12 px"] {
            assert!(PropertyKind::FontSize.canonicalize(&Value::from(bad)).is_none(), "{bad}");
        }
    }

    #[test]
    fn coordinates_accept_numbers_and_factors() {
        let kind = PropertyKind::CoordinateLike;
        assert_eq!(kind.canonicalize(&Value::Int(5)), Some(Value::Float(5.0)));
        assert!(kind.canonicalize(&Value::from("apples")).is_some());
        let nested = Value::List(vec![Value::from("a"), Value::from("b")]);
        assert!(kind.canonicalize(&nested).is_some());
        assert!(kind.canonicalize(&Value::Bool(true)).is_none());
    }

    #[test]
    fn padding_and_radius_shapes() {
        assert!(PropertyKind::Padding.canonicalize(&Value::Int(4)).is_some());
        assert!(PropertyKind::Padding.canonicalize(&Value::Int(-1)).is_none());
        let pair = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert!(PropertyKind::Padding.canonicalize(&pair).is_some());
        assert!(PropertyKind::BorderRadius.canonicalize(&pair).is_none());
    }

    #[test]
    fn dash_patterns_normalise_to_lengths() {
        let kind = PropertyKind::DashPattern;
        assert_eq!(kind.canonicalize(&Value::from("dashed")), Some(Value::from("dashed")));
        assert_eq!(
            kind.canonicalize(&Value::from("4 2")),
            Some(Value::List(vec![Value::Int(4), Value::Int(2)]))
        );
        assert_eq!(kind.canonicalize(&Value::List(vec![])), Some(Value::List(vec![])));
        assert_eq!(kind.canonicalize(&Value::from("4 x")), None);
    }
}
