use crate::error::SchemaError;
use crate::kind::{EnumDomain, PropertyKind};
use crate::value::Value;
use pmark_domain::config::NullDefaultPolicy;
use pmark_domain::flags::DescriptorFlags;
use serde::Serialize;
use std::borrow::Cow;

/// The default of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// No usable default; the attribute must be supplied at construction.
    Unset,
    Value(Value),
}

impl DefaultValue {
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Unset => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Where a resolved descriptor came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum Origin {
    Declared { model: String },
    Included { model: String, group: String, prefix: String },
}

/// An unresolved property declaration, as written in a model or group body.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub kind: PropertyKind,
    pub default: DefaultValue,
    pub help: Cow<'static, str>,
}

/// One typed, named property of a resolved model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    name: String,
    kind: PropertyKind,
    default: DefaultValue,
    flags: DescriptorFlags,
    help: Cow<'static, str>,
    origin: Origin,
}

impl PropertyDescriptor {
    pub(crate) fn new(
        name: String,
        kind: PropertyKind,
        default: DefaultValue,
        help: Cow<'static, str>,
        origin: Origin,
        extra: DescriptorFlags,
    ) -> Self {
        let mut flags = extra;
        flags.set(DescriptorFlags::REQUIRED, matches!(default, DefaultValue::Unset));
        flags.set(DescriptorFlags::NULLABLE, kind.accepts_null());
        Self { name, kind, default, flags, help, origin }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    #[must_use]
    pub const fn default(&self) -> &DefaultValue {
        &self.default
    }

    #[must_use]
    pub const fn flags(&self) -> DescriptorFlags {
        self.flags
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.flags.contains(DescriptorFlags::REQUIRED)
    }

    pub(crate) fn inherited(&self) -> Self {
        let mut copy = self.clone();
        copy.flags.insert(DescriptorFlags::INHERITED);
        copy
    }

    pub(crate) fn overridden(&mut self, default: Value) {
        self.default = DefaultValue::Value(default);
        self.flags.remove(DescriptorFlags::REQUIRED);
        self.flags.insert(DescriptorFlags::OVERRIDDEN);
    }

    /// Validates a supplied value and returns its canonical form.
    pub(crate) fn validate(&self, model: &str, value: &Value) -> Result<Value, SchemaError> {
        self.kind.canonicalize(value).ok_or_else(|| SchemaError::Validation {
            model: model.to_owned(),
            name: self.name.clone(),
            value: value.clone(),
            expected: self.kind.describe(),
        })
    }
}

/// Checks a declared or overriding default against `kind`.
pub(crate) fn check_default(
    owner: &str,
    name: &str,
    kind: &PropertyKind,
    default: &DefaultValue,
    policy: NullDefaultPolicy,
) -> Result<DefaultValue, SchemaError> {
    let DefaultValue::Value(value) = default else {
        return Ok(DefaultValue::Unset);
    };
    if value.is_null() && !kind.accepts_null() && policy == NullDefaultPolicy::Permit {
        return Ok(DefaultValue::Value(Value::Null));
    }
    kind.canonicalize(value).map(DefaultValue::Value).ok_or_else(|| SchemaError::InvalidDefault {
        model: owner.to_owned(),
        name: name.to_owned(),
        value: value.clone(),
        expected: kind.describe(),
    })
}

/// Declaration methods shared by model and group builders.
pub trait Declare: Sized {
    /// Appends a fully spelled-out declaration.
    #[must_use]
    fn declare(self, spec: PropertySpec) -> Self;

    /// Declares a property with a default.
    #[must_use]
    fn scalar(
        self,
        name: impl Into<String>,
        kind: PropertyKind,
        default: impl Into<Value>,
        help: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.declare(PropertySpec {
            name: name.into(),
            kind,
            default: DefaultValue::Value(default.into()),
            help: help.into(),
        })
    }

    /// Declares a property that must be supplied at construction.
    #[must_use]
    fn required(
        self,
        name: impl Into<String>,
        kind: PropertyKind,
        help: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.declare(PropertySpec {
            name: name.into(),
            kind,
            default: DefaultValue::Unset,
            help: help.into(),
        })
    }

    /// Declares an enumerated property. The default must be one of the domain's values.
    #[must_use]
    fn enumeration(
        self,
        name: impl Into<String>,
        domain: EnumDomain,
        default: &str,
        help: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.scalar(name, PropertyKind::Enum(domain), default, help)
    }
}
