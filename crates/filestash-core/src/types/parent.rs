//! Reference from an item to the folder that contains it.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::FileId;

/// Where an item lives: the owner's root or a specific folder.
///
/// On the wire the root is the number `0` and a folder is its id string.
/// Clients may also send the string `"0"` for the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    /// Top level of the owner's tree.
    #[default]
    Root,
    /// Inside the given folder.
    Folder(FileId),
}

impl ParentRef {
    /// Parse a textual parent reference.
    ///
    /// `"0"` and the empty string denote the root.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "0" {
            return Ok(Self::Root);
        }
        raw.parse::<FileId>().map(Self::Folder)
    }

    /// The containing folder, if any.
    pub fn folder_id(&self) -> Option<FileId> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(*id),
        }
    }
}

impl From<Option<FileId>> for ParentRef {
    fn from(value: Option<FileId>) -> Self {
        value.map_or(Self::Root, Self::Folder)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "0"),
            Self::Folder(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Root => serializer.serialize_u8(0),
            Self::Folder(id) => serializer.collect_str(id),
        }
    }
}

struct ParentRefVisitor;

impl Visitor<'_> for ParentRefVisitor {
    type Value = ParentRef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0 or a folder id")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        if v == 0 {
            Ok(ParentRef::Root)
        } else {
            Err(E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        if v == 0 {
            Ok(ParentRef::Root)
        } else {
            Err(E::invalid_value(de::Unexpected::Signed(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ParentRef::parse(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParentRefVisitor)
    }
}
