//! # Schema
//!
//! Declarative property descriptors for plot annotation models.
//!
//! A [`Model`] is a flat, ordered table of typed [`PropertyDescriptor`]s built from a
//! [`ModelBuilder`]: its parent's table, its own declarations, and reusable
//! [`PropertyGroup`]s expanded under a prefix. Overrides replace inherited defaults
//! without touching validation. Instances are built from a name → value mapping,
//! validated atomically, and re-validated on every assignment.
//!
//! ## Lifecycle
//!
//! ```text
//! declared ──register──▶ resolved ──construct / extends──▶ sealed ──set──▶ mutated
//! ```
//!
//! A resolved model may be re-registered or [reopened](Schema::reopen) until it is
//! sealed; afterwards that fails with [`SchemaError::SchemaReopened`].
//!
//! ## Example
//!
//! ```rust
//! use pmark_schema::prelude::*;
//!
//! # fn main() -> Result<(), SchemaError> {
//! let schema = Schema::default();
//! let point = schema.register(
//!     ModelBuilder::new("Point")
//!         .required("x", PropertyKind::float(), "Horizontal position.")
//!         .scalar("color", PropertyKind::nullable(PropertyKind::Color), "navy", ""),
//! )?;
//!
//! let mut p = point.construct([("x", 1.5)])?;
//! p.set("color", "#ff0000")?;
//! assert_eq!(p.get("color")?.to_string(), "#ff0000");
//! assert!(p.set("color", "not a color").is_err());
//! # Ok(())
//! # }
//! ```

mod color;
mod descriptor;
mod error;
mod group;
mod instance;
mod kind;
mod model;
mod schema;
mod value;

pub use color::Color;
pub use descriptor::{Declare, DefaultValue, Origin, PropertyDescriptor, PropertySpec};
pub use error::{SchemaError, SchemaErrorExt};
pub use group::{GroupBuilder, PropertyGroup, qualify};
pub use instance::{Instance, ObserverId, PropertyChanged, PropertyEntry, Snapshot};
pub use kind::{EnumDomain, PropertyKind};
pub use model::{Model, ModelBuilder};
pub use schema::Schema;
pub use value::Value;

pub mod prelude {
    //! Everything needed to declare models and work with instances.
    pub use crate::{
        Color, Declare, EnumDomain, Instance, Model, ModelBuilder, PropertyGroup, PropertyKind,
        Schema, SchemaError, Value,
    };
}
