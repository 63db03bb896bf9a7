use crate::error::SchemaError;
use crate::group::PropertyGroup;
use crate::instance::Instance;
use crate::model::{Model, ModelBuilder, resolve};
use crate::value::Value;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use pmark_domain::config::SchemaConfig;
use pmark_signals::SignalHub;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Registry {
    groups: FxHashMap<String, Arc<PropertyGroup>>,
    models: FxHashMap<String, Arc<Model>>,
    /// Model names in first-registration order.
    order: Vec<String>,
}

#[derive(Debug)]
struct SchemaInner {
    registry: RwLock<Registry>,
    config: SchemaConfig,
    hub: SignalHub,
}

/// The registry of property groups and models.
///
/// A `Schema` is a cheap, cloneable handle. Models are defined once at start-up; callers
/// must not define the same model from two threads at once.
#[derive(Debug, Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::with_hub(SchemaConfig::default(), SignalHub::new())
    }
}

impl Schema {
    /// Creates an empty schema with its own signal hub sized from `config`.
    ///
    /// # Errors
    /// [`SchemaError::Signal`] when `signal_capacity` is zero.
    pub fn new(config: SchemaConfig) -> Result<Self, SchemaError> {
        let hub = SignalHub::with_capacity(config.signal_capacity)?;
        Ok(Self::with_hub(config, hub))
    }

    /// Creates an empty schema that publishes on an existing hub.
    #[must_use]
    pub fn with_hub(config: SchemaConfig, hub: SignalHub) -> Self {
        Self {
            inner: Arc::new(SchemaInner {
                registry: RwLock::new(Registry::default()),
                config,
                hub,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SchemaConfig {
        &self.inner.config
    }

    /// Hub receiving `PropertyChanged` signals from every instance of every model.
    #[must_use]
    pub fn hub(&self) -> &SignalHub {
        &self.inner.hub
    }

    /// Registers a property group.
    ///
    /// Member defaults are checked here, so a broken group never reaches a model.
    ///
    /// # Errors
    /// [`SchemaError::DuplicateGroup`] or [`SchemaError::InvalidDefault`].
    pub fn define_group(&self, group: PropertyGroup) -> Result<Arc<PropertyGroup>, SchemaError> {
        for member in group.members() {
            crate::descriptor::check_default(
                group.name(),
                &member.name,
                &member.kind,
                &member.default,
                self.inner.config.null_defaults,
            )?;
        }

        let mut registry = self.inner.registry.write();
        if registry.groups.contains_key(group.name()) {
            return Err(SchemaError::DuplicateGroup { name: group.name().to_owned() });
        }
        debug!(group = group.name(), members = group.members().len(), "Property group defined");
        let group = Arc::new(group);
        registry.groups.insert(group.name().to_owned(), Arc::clone(&group));
        Ok(group)
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<Arc<PropertyGroup>> {
        self.inner.registry.read().groups.get(name).cloned()
    }

    /// Resolves and registers a model.
    ///
    /// Registering a name that already exists replaces the earlier model, unless that
    /// model has been instantiated or extended. The replaced model is retired: handles
    /// still pointing at it can neither construct nor be extended. Registering a child
    /// seals its parent.
    ///
    /// # Errors
    /// Any resolution error, [`SchemaError::UnknownModel`] for a missing parent, or
    /// [`SchemaError::SchemaReopened`].
    pub fn register(&self, builder: ModelBuilder) -> Result<Arc<Model>, SchemaError> {
        let (parent, groups) = {
            let registry = self.inner.registry.read();
            if let Some(existing) = registry.models.get(builder.name())
                && existing.is_sealed()
            {
                return Err(SchemaError::SchemaReopened { model: builder.name().to_owned() });
            }
            let parent = builder
                .parent()
                .map(|name| {
                    registry
                        .models
                        .get(name)
                        .cloned()
                        .ok_or_else(|| SchemaError::UnknownModel { name: name.to_owned() })
                })
                .transpose()?;
            (parent, registry.groups.clone())
        };

        let model = Arc::new(resolve(
            builder,
            parent.as_deref(),
            &groups,
            self.inner.config.null_defaults,
            self.inner.hub.clone(),
        )?);

        let mut registry = self.inner.registry.write();
        if let Some(existing) = registry.models.get(model.name())
            && existing.is_sealed()
        {
            return Err(SchemaError::SchemaReopened { model: model.name().to_owned() });
        }
        if let Some(parent) = &parent {
            parent.seal()?;
        }
        match registry.models.get(model.name()) {
            Some(existing) => {
                existing.retire()?;
                warn!(model = model.name(), "Model re-registered, replacing earlier definition");
            },
            None => registry.order.push(model.name().to_owned()),
        }
        registry.models.insert(model.name().to_owned(), Arc::clone(&model));
        Ok(model)
    }

    /// Returns the declaration of a registered model for further editing.
    ///
    /// Register the returned builder to replace the model.
    ///
    /// # Errors
    /// [`SchemaError::UnknownModel`], or [`SchemaError::SchemaReopened`] once the model
    /// has been instantiated or extended.
    pub fn reopen(&self, name: &str) -> Result<ModelBuilder, SchemaError> {
        let model = self.model(name)?;
        if model.is_sealed() {
            return Err(SchemaError::SchemaReopened { model: name.to_owned() });
        }
        Ok(model.declaration().clone())
    }

    /// # Errors
    /// [`SchemaError::UnknownModel`].
    pub fn model(&self, name: &str) -> Result<Arc<Model>, SchemaError> {
        self.inner
            .registry
            .read()
            .models
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownModel { name: name.to_owned() })
    }

    /// Registered models in registration order.
    #[must_use]
    pub fn models(&self) -> Vec<Arc<Model>> {
        let registry = self.inner.registry.read();
        registry.order.iter().filter_map(|name| registry.models.get(name).cloned()).collect()
    }

    /// Looks up `model` and constructs an instance of it.
    pub fn construct<I, K, V>(&self, model: &str, values: I) -> Result<Instance, SchemaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.model(model)?.construct(values)
    }
}
