//! Raw index schema and the typed enumerations derived from it.
//!
//! [`IndexEntry`] mirrors one value of the upstream `peps.json` object
//! field-for-field. Conversion into typed values happens in
//! [`Pep::from_entry`](crate::pep::Pep::from_entry), never here.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Raw entry as published in the upstream index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexEntry {
    #[serde(default, deserialize_with = "lenient_number")]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Comma-separated, `", "` delimited.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: String,
    #[serde(default)]
    pub discussions_to: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_empty")]
    pub pep_type: String,
    /// Comma-separated, possibly empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topic: String,
    /// `DD-Mon-YYYY`, e.g. `05-Jul-2000`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created: String,
    #[serde(default)]
    pub python_version: Option<String>,
    #[serde(default)]
    pub post_history: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub requires: Option<String>,
    #[serde(default)]
    pub replaces: Option<String>,
    #[serde(default)]
    pub superseded_by: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Accept `number` as either a JSON integer or a decimal string. Anything
/// else reads as `None`; the index key is authoritative.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => u32::try_from(n).ok(),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

/// Read a nullable text field, mapping `null` to `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A raw value that is not a member of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed string enumeration with `FromStr`, `Display`, and
/// `Serialize` all keyed on the raw upstream spelling.
macro_rules! raw_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $raw:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The raw upstream spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $raw),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($raw => Ok($name::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

raw_enum! {
    /// Lifecycle status of a PEP.
    Status, "status" {
        Accepted => "Accepted",
        Active => "Active",
        Deferred => "Deferred",
        Draft => "Draft",
        Final => "Final",
        Provisional => "Provisional",
        Rejected => "Rejected",
        Replaced => "Replaced",
        Superseded => "Superseded",
        Withdrawn => "Withdrawn",
    }
}

raw_enum! {
    /// PEP category.
    PepType, "type" {
        Informational => "Informational",
        Process => "Process",
        StandardsTrack => "Standards Track",
    }
}

raw_enum! {
    Topic, "topic" {
        Governance => "governance",
        Packaging => "packaging",
        Release => "release",
        Typing => "typing",
    }
}
