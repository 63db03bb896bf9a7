use crate::error::SchemaError;
use crate::kind::PropertyKind;
use crate::model::Model;
use crate::value::Value;
use pmark_domain::enums::AngleUnits;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{trace, warn};

/// Announces that an attribute of an instance changed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChanged {
    pub model: String,
    pub instance: u64,
    pub name: String,
    pub old: Value,
    pub new: Value,
}

/// Handle returned by [`Instance::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Observer = Box<dyn Fn(&PropertyChanged) + Send + Sync>;

/// One `(name, kind, value)` triple of a flattened instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyEntry {
    pub name: String,
    pub kind: PropertyKind,
    pub value: Value,
}

/// The flattened, ordered view of an instance handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub model: String,
    pub properties: Vec<PropertyEntry>,
}

impl Snapshot {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// A validated set of values for a [`Model`].
///
/// Values are stored by descriptor position. The instance only keeps a weak reference to
/// its model; once the model is gone every lookup fails with
/// [`SchemaError::ModelDropped`].
pub struct Instance {
    model: Weak<Model>,
    model_name: String,
    id: u64,
    values: Vec<Value>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("model", &self.model_name)
            .field("id", &self.id)
            .field("values", &self.values)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Instance {
    pub(crate) fn new(model: &Arc<Model>, id: u64, values: Vec<Value>) -> Self {
        Self {
            model: Arc::downgrade(model),
            model_name: model.name().to_owned(),
            id,
            values,
            observers: Vec::new(),
            next_observer: 1,
        }
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Sequence number of this instance within its model.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The model, if it is still alive.
    ///
    /// # Errors
    /// [`SchemaError::ModelDropped`] once every strong reference to the model is gone.
    pub fn model(&self) -> Result<Arc<Model>, SchemaError> {
        self.model
            .upgrade()
            .ok_or_else(|| SchemaError::ModelDropped { model: self.model_name.clone() })
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Result<&Value, SchemaError> {
        let model = self.model()?;
        let position = self.position(&model, name)?;
        Ok(&self.values[position])
    }

    /// Validates `value` and stores its canonical form.
    ///
    /// Returns `true` if the stored value changed. Observers and the model's signal hub
    /// are only notified in that case.
    ///
    /// # Errors
    /// [`SchemaError::UnknownAttribute`] or [`SchemaError::Validation`]; the prior value
    /// is kept.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<bool, SchemaError> {
        let model = self.model()?;
        let position = self.position(&model, name)?;
        let canonical = model.descriptors()[position].validate(&self.model_name, &value.into())?;

        if self.values[position] == canonical {
            trace!(model = %self.model_name, name, "Value unchanged");
            return Ok(false);
        }

        let old = std::mem::replace(&mut self.values[position], canonical.clone());
        trace!(model = %self.model_name, name, %old, new = %canonical, "Value set");

        let change = Arc::new(PropertyChanged {
            model: self.model_name.clone(),
            instance: self.id,
            name: name.to_owned(),
            old,
            new: canonical,
        });
        for (_, observer) in &self.observers {
            observer(change.as_ref());
        }
        if let Err(err) = model.hub().emit_arc(change) {
            warn!(model = %self.model_name, name, error = %err, "Change signal not delivered");
        }
        Ok(true)
    }

    /// Registers a callback invoked after every effective [`Instance::set`].
    pub fn on_change(
        &mut self,
        observer: impl Fn(&PropertyChanged) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` when the id is unknown.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        before != self.observers.len()
    }

    /// Flattened `(name, kind, value)` triples in descriptor order.
    pub fn properties(&self) -> Result<Vec<PropertyEntry>, SchemaError> {
        let model = self.model()?;
        Ok(model
            .descriptors()
            .iter()
            .zip(&self.values)
            .map(|(descriptor, value)| PropertyEntry {
                name: descriptor.name().to_owned(),
                kind: descriptor.kind().clone(),
                value: value.clone(),
            })
            .collect())
    }

    pub fn snapshot(&self) -> Result<Snapshot, SchemaError> {
        Ok(Snapshot { model: self.model_name.clone(), properties: self.properties()? })
    }

    /// Reads an angle attribute in radians, interpreting the stored number through the
    /// current value of its companion units attribute.
    pub fn angle_radians(&self, name: &str) -> Result<Option<f64>, SchemaError> {
        let model = self.model()?;
        let position = self.position(&model, name)?;
        let descriptor = &model.descriptors()[position];
        let Some(units_name) = descriptor.kind().angle_units() else {
            return Err(SchemaError::Validation {
                model: self.model_name.clone(),
                name: name.to_owned(),
                value: self.values[position].clone(),
                expected: "Angle".to_owned(),
            });
        };

        let Some(raw) = self.values[position].as_f64() else {
            return Ok(None);
        };
        let units_value = &self.values[self.position(&model, units_name)?];
        let units = units_value
            .as_str()
            .and_then(|u| u.parse::<AngleUnits>().ok())
            .ok_or_else(|| SchemaError::Validation {
                model: self.model_name.clone(),
                name: units_name.to_owned(),
                value: units_value.clone(),
                expected: "AngleUnits".to_owned(),
            })?;
        Ok(Some(units.to_radians(raw)))
    }

    fn position(&self, model: &Model, name: &str) -> Result<usize, SchemaError> {
        model.position(name).ok_or_else(|| SchemaError::UnknownAttribute {
            model: self.model_name.clone(),
            name: name.to_owned(),
        })
    }
}
