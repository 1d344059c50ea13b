//! Identity, timestamps and the open attribute set shared by every entity.
//!
//! A [`BaseModel`] is either created fresh (new UUID, both timestamps set to
//! "now") or rehydrated from the mapping produced by [`BaseModel::to_dict_as`].
//! Timestamps are naive UTC values truncated to microseconds so that their
//! ISO-8601 text round-trips through the JSON file unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, SubsecRound, Timelike, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ModelError;

/// Reserved key carrying the runtime type name of a serialized record.
pub const CLASS_KEY: &str = "__class__";
pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Serialized form of a model: field name -> JSON value.
pub type Attributes = Map<String, Value>;

/// Current time at the precision kept on disk.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// ISO-8601 text for a timestamp. The fractional part is omitted when zero.
pub fn isoformat(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Parse a timestamp field from its serialized value, dropping anything
/// below a microsecond.
pub fn parse_timestamp(field: &str, value: &Value) -> Result<NaiveDateTime, ModelError> {
    match value {
        Value::String(text) => NaiveDateTime::from_str(text)
            .map(|ts| ts.trunc_subsecs(6))
            .map_err(|_| ModelError::InvalidTimestamp { field: field.to_string(), value: text.clone() }),
        other => Err(ModelError::type_error(format!(
            "`{field}` must be an ISO-8601 string, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Common state of every persisted object.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModel {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    attributes: Attributes,
}

impl Default for BaseModel {
    fn default() -> Self { Self::new() }
}

impl BaseModel {
    /// Fresh identity with `created_at == updated_at == now()`.
    pub fn new() -> Self {
        let now = now();
        Self { id: Uuid::new_v4().to_string(), created_at: now, updated_at: now, attributes: Attributes::new() }
    }

    /// Rebuild a model from its serialized form.
    ///
    /// Every key except `__class__` is applied with [`BaseModel::set`], so a
    /// null `id` or timestamp fails with [`ModelError::Type`]. Keys missing
    /// from `dict` keep a freshly generated value.
    pub fn from_dict(dict: &Attributes) -> Result<Self, ModelError> {
        let mut model = Self::new();
        for (key, value) in dict {
            if key == CLASS_KEY {
                continue;
            }
            model.set(key, value.clone())?;
        }
        Ok(model)
    }

    /// Assign a named attribute.
    ///
    /// `id` only accepts a string, the timestamps only accept ISO-8601 text,
    /// and `__class__` cannot be assigned at all.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let value = value.into();
        match name {
            CLASS_KEY => Err(ModelError::type_error(format!("`{CLASS_KEY}` is reserved"))),
            ID => match value {
                Value::String(id) => {
                    self.id = id;
                    Ok(())
                }
                other => Err(ModelError::type_error(format!("`id` must be a string, got {}", json_kind(&other)))),
            },
            CREATED_AT => {
                self.created_at = parse_timestamp(name, &value)?;
                Ok(())
            }
            UPDATED_AT => {
                self.updated_at = parse_timestamp(name, &value)?;
                Ok(())
            }
            _ => {
                self.attributes.insert(name.to_string(), value);
                Ok(())
            }
        }
    }

    /// Extra attribute by name. Identity and timestamps are plain fields.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Attributes beyond `id`, `created_at` and `updated_at`.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn put(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }

    pub(crate) fn str_field(&self, name: &str) -> &str {
        self.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// Refresh `updated_at`; the new value is always later than the old one.
    pub fn touch(&mut self) {
        let now = now();
        self.updated_at = if now > self.updated_at { now } else { self.updated_at + Duration::microseconds(1) };
    }

    /// Serialized copy tagged with `class_name` under `__class__`.
    pub fn to_dict_as(&self, class_name: &str) -> Attributes {
        let mut dict = self.attributes.clone();
        dict.insert(ID.to_string(), Value::String(self.id.clone()));
        dict.insert(CREATED_AT.to_string(), Value::String(isoformat(&self.created_at)));
        dict.insert(UPDATED_AT.to_string(), Value::String(isoformat(&self.updated_at)));
        dict.insert(CLASS_KEY.to_string(), Value::String(class_name.to_string()));
        dict
    }

    /// `[<class>] (<id>) {<raw attributes>}` with timestamps in native form.
    pub fn fmt_repr(&self, f: &mut fmt::Formatter<'_>, class_name: &str) -> fmt::Result {
        write!(
            f,
            "[{class_name}] ({}) {{\"id\": {:?}, \"created_at\": {:?}, \"updated_at\": {:?}",
            self.id, self.id, self.created_at, self.updated_at
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", {name:?}: {value}")?;
        }
        f.write_str("}")
    }
}
