//! Book identifier type.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// An opaque book identifier, assigned by the remote store.
///
/// Backends differ on whether ids are JSON numbers or strings, so this
/// type accepts either and serializes back in the original shape. The
/// client never assigns or mutates ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Int(i64),
    Text(String),
}

impl BookId {
    /// Returns the id rendered as text, as used in resource paths.
    pub fn to_path_segment(&self) -> String {
        self.to_string()
    }
}

impl From<i64> for BookId {
    fn from(value: i64) -> Self {
        Self(Repr::Int(value))
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(Repr::Text(value.to_string()))
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(Repr::Text(value))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Int(n) => write!(f, "{n}"),
            Repr::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Repr::Int(n) => serializer.serialize_i64(*n),
            Repr::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = BookId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<BookId, E> {
                Ok(BookId::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<BookId, E> {
                i64::try_from(v)
                    .map(BookId::from)
                    .map_err(|_| E::custom("id out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BookId, E> {
                Ok(BookId::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<BookId, E> {
                Ok(BookId::from(v))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
