use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "********";

bitflags! {
    /// How a configuration field is resolved and displayed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FieldFlags: u8 {
        /// No default and not optional: the source must provide it.
        const REQUIRED = 1 << 0;
        /// `Option<T>` field, `None` when absent.
        const OPTIONAL = 1 << 1;
        /// Never echoed in logs or error messages.
        const SECRET = 1 << 2;
    }
}

impl Serialize for FieldFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for FieldFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Static description of one declared configuration field.
///
/// Instances are generated by `#[derive(Settings)]` and live in a `'static` slice,
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Lookup key (field name unless renamed).
    pub name: &'static str,
    /// Rust type as written in the struct, e.g. `Option<u16>`.
    pub type_name: &'static str,
    /// Textual default, coerced exactly like a looked-up value.
    pub default: Option<&'static str>,
    pub flags: FieldFlags,
}

impl FieldSpec {
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.flags.contains(FieldFlags::OPTIONAL)
    }

    #[must_use]
    pub const fn is_secret(&self) -> bool {
        self.flags.contains(FieldFlags::SECRET)
    }

    /// Returns `value`, or [`REDACTED`] for secret fields.
    #[must_use]
    pub fn display_value<'a>(&self, value: &'a str) -> &'a str {
        if self.is_secret() { REDACTED } else { value }
    }
}
