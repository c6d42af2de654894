//! Task identifier newtype

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to a task by the remote store.
///
/// Stored as a string. Remotes are free to hand out numeric ids, so
/// deserialization accepts JSON integers and normalizes them to their
/// decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(String);

impl TaskId {
    /// Create a task id from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        TaskId(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        TaskId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = TaskId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or integer task id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<TaskId, E> {
                Ok(TaskId(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<TaskId, E> {
                Ok(TaskId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<TaskId, E> {
                Ok(TaskId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<TaskId, E> {
                Ok(TaskId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
