use crate::constants::{CHECK_IN, GALLERY, REGISTRATIONS};
use bitflags::bitflags;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Public-facing modules a tenant has switched on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeatureSet: u32 {
        const REGISTRATIONS = 1 << 0;
        const GALLERY = 1 << 1;
        const CHECK_IN = 1 << 2;

        const ALL = Self::REGISTRATIONS.bits() | Self::GALLERY.bits() | Self::CHECK_IN.bits();
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<u32> for FeatureSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl FeatureSet {
    /// Looks up a single configuration name. `all` and `*` select every feature.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            REGISTRATIONS => Some(Self::REGISTRATIONS),
            GALLERY => Some(Self::GALLERY),
            CHECK_IN | "check-in" => Some(Self::CHECK_IN),
            "all" | "*" => Some(Self::ALL),
            _ => None,
        }
    }

    /// Configuration names of the enabled features, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [(Self::REGISTRATIONS, REGISTRATIONS), (Self::GALLERY, GALLERY), (Self::CHECK_IN, CHECK_IN)]
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
            .collect()
    }
}

impl Serialize for FeatureSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Accepts either a list of feature names or the raw bit mask.
impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FeatureVisitor;

        impl<'de> Visitor<'de> for FeatureVisitor {
            type Value = FeatureSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of feature names or a bit mask")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u32::try_from(v).map(FeatureSet::from).map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u32::try_from(v).map(FeatureSet::from).map_err(E::custom)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                FeatureSet::from_name(v).ok_or_else(|| E::custom(format!("unknown feature '{v}'")))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = FeatureSet::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    set |= FeatureSet::from_name(&name).ok_or_else(|| {
                        serde::de::Error::custom(format!("unknown feature '{name}'"))
                    })?;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(FeatureVisitor)
    }
}
