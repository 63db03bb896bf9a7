use crate::descriptor::{Declare, PropertySpec};
use crate::error::SchemaError;
use fxhash::FxHashSet;
use std::borrow::Cow;

/// A reusable bundle of declarations, mixed into models with an include directive.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    name: String,
    help: Cow<'static, str>,
    members: Vec<PropertySpec>,
}

impl PropertyGroup {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder { name: name.into(), help: Cow::Borrowed(""), members: Vec::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Member declarations, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[PropertySpec] {
        &self.members
    }
}

/// Collects the members of a [`PropertyGroup`].
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    name: String,
    help: Cow<'static, str>,
    members: Vec<PropertySpec>,
}

impl GroupBuilder {
    #[must_use]
    pub fn help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = help.into();
        self
    }

    /// Finishes the group.
    ///
    /// # Errors
    /// [`SchemaError::DuplicateAttribute`] when two members share a name.
    pub fn build(self) -> Result<PropertyGroup, SchemaError> {
        let mut seen = FxHashSet::default();
        if let Some(dup) = self.members.iter().find(|m| !seen.insert(m.name.as_str())) {
            return Err(SchemaError::DuplicateAttribute {
                model: self.name.clone(),
                name: dup.name.clone(),
            });
        }
        Ok(PropertyGroup { name: self.name, help: self.help, members: self.members })
    }
}

impl Declare for GroupBuilder {
    fn declare(mut self, spec: PropertySpec) -> Self {
        self.members.push(spec);
        self
    }
}

/// Qualified name of a member included under `prefix`.
#[must_use]
pub fn qualify(prefix: &str, member: &str) -> String {
    if prefix.is_empty() { member.to_owned() } else { format!("{prefix}_{member}") }
}

/// Help text of an included member: the include's help with `{prop}` filled in, else the
/// member's own help.
pub(crate) fn included_help(include_help: &str, member: &PropertySpec) -> Cow<'static, str> {
    if include_help.is_empty() {
        member.help.clone()
    } else {
        Cow::Owned(include_help.replace("{prop}", &member.name.replace('_', " ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::PropertyKind;

    #[test]
    fn prefix_joins_with_underscore() {
        assert_eq!(qualify("", "fill_color"), "fill_color");
        assert_eq!(qualify("background", "fill_color"), "background_fill_color");
    }

    #[test]
    fn duplicate_members_are_rejected() {
        let err = PropertyGroup::builder("fill")
            .scalar("fill_alpha", PropertyKind::alpha(), 1.0, "")
            .scalar("fill_alpha", PropertyKind::alpha(), 0.5, "")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateAttribute { ref name, .. } if name == "fill_alpha"));
    }

    #[test]
    fn include_help_fills_in_member_name() {
        let group = PropertyGroup::builder("fill")
            .scalar("fill_color", PropertyKind::Color, "gray", "A fill color.")
            .build()
            .unwrap();
        let member = &group.members()[0];
        assert_eq!(
            included_help("The {prop} values for the box.", member),
            "The fill color values for the box."
        );
        assert_eq!(included_help("", member), "A fill color.");
    }
}
