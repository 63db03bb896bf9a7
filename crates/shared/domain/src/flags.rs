use bitflags::bitflags;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

bitflags! {
    /// Traits of a resolved property descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct DescriptorFlags: u8 {
        /// Must be supplied at construction; has no usable default.
        const REQUIRED = 1 << 0;
        /// Accepts `null` in addition to values of its kind.
        const NULLABLE = 1 << 1;
        /// Contributed by an included property group.
        const INCLUDED = 1 << 2;
        /// Default replaced by an override directive.
        const OVERRIDDEN = 1 << 3;
        /// Declared on an ancestor model.
        const INHERITED = 1 << 4;
    }
}

impl DescriptorFlags {
    /// Lower-case flag names, in bit order.
    #[must_use]
    pub fn names(self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_ascii_lowercase()).collect()
    }
}

impl Serialize for DescriptorFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in &names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}
