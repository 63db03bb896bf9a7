use crate::descriptor::{
    Declare, DefaultValue, Origin, PropertyDescriptor, PropertySpec, check_default,
};
use crate::error::SchemaError;
use crate::group::{PropertyGroup, included_help, qualify};
use crate::instance::Instance;
use crate::value::Value;
use fxhash::FxHashMap;
use pmark_domain::config::NullDefaultPolicy;
use pmark_domain::flags::DescriptorFlags;
use pmark_signals::SignalHub;
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use tracing::debug;

const OPEN: u8 = 0;
const SEALED: u8 = 1;
const RETIRED: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
enum Directive {
    Declare(PropertySpec),
    Include { group: String, prefix: String, help: Cow<'static, str> },
    Override { name: String, default: Value },
}

/// The declaration of a model: its parent and an ordered list of directives.
///
/// Nothing is checked until the builder is registered with a
/// [`Schema`](crate::schema::Schema); directives are then applied in the order they were
/// written, so an override must come after the declaration it targets.
///
/// # Examples
/// ```rust
/// use pmark_schema::prelude::*;
///
/// # fn main() -> Result<(), SchemaError> {
/// let schema = Schema::default();
/// schema.define_group(
///     PropertyGroup::builder("text")
///         .scalar("color", PropertyKind::Color, "#444444", "")
///         .build()?,
/// )?;
///
/// let model = schema.register(
///     ModelBuilder::new("T")
///         .required("x", PropertyKind::float(), "")
///         .enumeration("align", EnumDomain::new("Align", ["left", "center", "right"]), "left", "")
///         .include("text", "", ""),
/// )?;
///
/// let t = model.construct([("x", 5)])?;
/// assert_eq!(t.get("align")?, &Value::from("left"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    parent: Option<String>,
    help: Cow<'static, str>,
    directives: Vec<Directive>,
}

impl ModelBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), parent: None, help: Cow::Borrowed(""), directives: Vec::new() }
    }

    /// Inherits every resolved descriptor of `parent`, which must already be registered.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = help.into();
        self
    }

    /// Expands a registered group under `prefix`. `{prop}` in `help` names each member.
    #[must_use]
    pub fn include(
        mut self,
        group: impl Into<String>,
        prefix: impl Into<String>,
        help: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.directives.push(Directive::Include {
            group: group.into(),
            prefix: prefix.into(),
            help: help.into(),
        });
        self
    }

    /// Replaces the default of a visible descriptor, keeping its kind.
    #[must_use]
    pub fn override_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.directives.push(Directive::Override { name: name.into(), default: default.into() });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

impl Declare for ModelBuilder {
    fn declare(mut self, spec: PropertySpec) -> Self {
        self.directives.push(Directive::Declare(spec));
        self
    }
}

/// A resolved model: one flat, ordered namespace of descriptors.
#[derive(Debug)]
pub struct Model {
    name: String,
    parent: Option<String>,
    help: Cow<'static, str>,
    descriptors: Vec<PropertyDescriptor>,
    index: FxHashMap<String, usize>,
    declaration: ModelBuilder,
    state: AtomicU8,
    next_instance: AtomicU64,
    hub: SignalHub,
}

impl Model {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Descriptors in resolution order: inherited first, then own and included ones.
    #[must_use]
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.position(name).map(|i| &self.descriptors[i])
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The declaration this model was resolved from.
    #[must_use]
    pub const fn declaration(&self) -> &ModelBuilder {
        &self.declaration
    }

    /// `true` once the model has been instantiated or extended.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.state.load(Ordering::Acquire) == SEALED
    }

    /// `true` once a newer registration under the same name replaced this model.
    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.state.load(Ordering::Acquire) == RETIRED
    }

    /// Marks the model as instantiated or extended. A retired model cannot be sealed.
    pub(crate) fn seal(&self) -> Result<(), SchemaError> {
        match self.state.compare_exchange(OPEN, SEALED, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) | Err(SEALED) => Ok(()),
            Err(_) => Err(SchemaError::SchemaReopened { model: self.name.clone() }),
        }
    }

    /// Takes an open model out of service so it is never instantiated or extended.
    pub(crate) fn retire(&self) -> Result<(), SchemaError> {
        self.state
            .compare_exchange(OPEN, RETIRED, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| SchemaError::SchemaReopened { model: self.name.clone() })
    }

    pub(crate) const fn hub(&self) -> &SignalHub {
        &self.hub
    }

    /// Builds a fully populated instance from `values`.
    ///
    /// Names are checked first, then required attributes, then every supplied value is
    /// validated in descriptor order. Absent attributes take their default.
    ///
    /// # Errors
    /// [`SchemaError::UnknownAttribute`], [`SchemaError::MissingRequiredAttribute`] or
    /// [`SchemaError::Validation`]; nothing is built in that case.
    /// [`SchemaError::SchemaReopened`] if the model was replaced by a newer registration.
    pub fn construct<I, K, V>(self: &Arc<Self>, values: I) -> Result<Instance, SchemaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        if self.is_retired() {
            return Err(SchemaError::SchemaReopened { model: self.name.clone() });
        }

        let mut supplied: Vec<Option<Value>> = vec![None; self.descriptors.len()];
        for (name, value) in values {
            let name = name.as_ref();
            let position = self.position(name).ok_or_else(|| SchemaError::UnknownAttribute {
                model: self.name.clone(),
                name: name.to_owned(),
            })?;
            supplied[position] = Some(value.into());
        }

        if let Some(missing) = self
            .descriptors
            .iter()
            .zip(&supplied)
            .find_map(|(d, v)| (d.is_required() && v.is_none()).then_some(d))
        {
            return Err(SchemaError::MissingRequiredAttribute {
                model: self.name.clone(),
                name: missing.name().to_owned(),
            });
        }

        let values = self
            .descriptors
            .iter()
            .zip(supplied)
            .map(|(descriptor, value)| match value {
                Some(value) => descriptor.validate(&self.name, &value),
                None => descriptor.default().value().cloned().ok_or_else(|| {
                    SchemaError::MissingRequiredAttribute {
                        model: self.name.clone(),
                        name: descriptor.name().to_owned(),
                    }
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.seal()?;
        let id = self.next_instance.fetch_add(1, Ordering::Relaxed);
        debug!(model = %self.name, id, "Instance constructed");
        Ok(Instance::new(self, id, values))
    }
}

/// Applies a declaration on top of its parent's table.
pub(crate) fn resolve(
    declaration: ModelBuilder,
    parent: Option<&Model>,
    groups: &FxHashMap<String, Arc<PropertyGroup>>,
    policy: NullDefaultPolicy,
    hub: SignalHub,
) -> Result<Model, SchemaError> {
    let mut table = Table::new(&declaration.name);
    for inherited in parent.map(Model::descriptors).unwrap_or_default() {
        table.push(inherited.inherited())?;
    }

    for directive in &declaration.directives {
        match directive {
            Directive::Declare(spec) => {
                let default =
                    check_default(table.model, &spec.name, &spec.kind, &spec.default, policy)?;
                table.push(PropertyDescriptor::new(
                    spec.name.clone(),
                    spec.kind.clone(),
                    default,
                    spec.help.clone(),
                    Origin::Declared { model: declaration.name.clone() },
                    DescriptorFlags::empty(),
                ))?;
            },
            Directive::Include { group, prefix, help } => {
                let group = groups
                    .get(group)
                    .ok_or_else(|| SchemaError::UnknownGroup { name: group.clone() })?;
                for member in group.members() {
                    let default = check_default(
                        group.name(),
                        &member.name,
                        &member.kind,
                        &member.default,
                        policy,
                    )?;
                    table.push(PropertyDescriptor::new(
                        qualify(prefix, &member.name),
                        member.kind.clone(),
                        default,
                        included_help(help, member),
                        Origin::Included {
                            model: declaration.name.clone(),
                            group: group.name().to_owned(),
                            prefix: prefix.clone(),
                        },
                        DescriptorFlags::INCLUDED,
                    ))?;
                }
            },
            Directive::Override { name, default } => {
                let descriptor = table.get_mut(name)?;
                let DefaultValue::Value(value) = check_default(
                    &declaration.name,
                    name,
                    descriptor.kind(),
                    &DefaultValue::Value(default.clone()),
                    policy,
                )?
                else {
                    return Err("override produced an unset default".into());
                };
                descriptor.overridden(value);
            },
        }
    }

    table.check_angle_units()?;

    debug!(
        model = %declaration.name,
        parent = ?declaration.parent,
        descriptors = table.descriptors.len(),
        "Model resolved"
    );

    let Table { descriptors, index, .. } = table;
    Ok(Model {
        name: declaration.name.clone(),
        parent: declaration.parent.clone(),
        help: declaration.help.clone(),
        descriptors,
        index,
        declaration,
        state: AtomicU8::new(OPEN),
        next_instance: AtomicU64::new(1),
        hub,
    })
}

struct Table<'a> {
    model: &'a str,
    descriptors: Vec<PropertyDescriptor>,
    index: FxHashMap<String, usize>,
}

impl<'a> Table<'a> {
    fn new(model: &'a str) -> Self {
        Self { model, descriptors: Vec::new(), index: FxHashMap::default() }
    }

    fn push(&mut self, descriptor: PropertyDescriptor) -> Result<(), SchemaError> {
        if self.index.contains_key(descriptor.name()) {
            return Err(SchemaError::DuplicateAttribute {
                model: self.model.to_owned(),
                name: descriptor.name().to_owned(),
            });
        }
        self.index.insert(descriptor.name().to_owned(), self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut PropertyDescriptor, SchemaError> {
        let position = self.index.get(name).copied().ok_or_else(|| SchemaError::UnknownAttribute {
            model: self.model.to_owned(),
            name: name.to_owned(),
        })?;
        Ok(&mut self.descriptors[position])
    }

    fn check_angle_units(&self) -> Result<(), SchemaError> {
        let missing = self
            .descriptors
            .iter()
            .filter_map(|d| d.kind().angle_units())
            .find(|units| !self.index.contains_key(*units));
        match missing {
            Some(units) => Err(SchemaError::UnknownAttribute {
                model: self.model.to_owned(),
                name: units.to_owned(),
            }),
            None => Ok(()),
        }
    }
}
