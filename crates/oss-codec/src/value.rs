use std::any::Any;
use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::attributes::WireType;
use crate::errors::{CodecError, CodecResult};
use crate::model::Model;

/// Upcasts used to recover concrete nested models from `Box<dyn Model>`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// An owned field value on its way into a model.
#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(i64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Mapping(BTreeMap<String, String>),
    Json(serde_json::Value),
    Bytes(Bytes),
    Model(Box<dyn Model>),
    List(Vec<Box<dyn Model>>),
}

/// A borrowed view of a field value held by a model.
#[derive(Debug, Clone)]
pub enum FieldRef<'a> {
    String(&'a str),
    Integer(i64),
    Boolean(bool),
    DateTime(&'a DateTime<Utc>),
    Mapping(&'a BTreeMap<String, String>),
    Json(&'a serde_json::Value),
    Bytes(&'a Bytes),
    Model(&'a dyn Model),
    List(Vec<&'a dyn Model>),
}

impl Value {
    pub fn model<T: Model>(model: T) -> Self {
        Value::Model(Box::new(model))
    }

    pub fn list<T: Model>(models: Vec<T>) -> Self {
        Value::List(
            models
                .into_iter()
                .map(|model| Box::new(model) as Box<dyn Model>)
                .collect(),
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "datetime",
            Value::Mapping(_) => "mapping",
            Value::Json(_) => "json",
            Value::Bytes(_) => "bytes",
            Value::Model(_) => "model",
            Value::List(_) => "list",
        }
    }

    pub fn into_string(self, field: &str) -> CodecResult<String> {
        match self {
            Value::String(value) => Ok(value),
            _ => Err(CodecError::field_type(field, WireType::String)),
        }
    }

    pub fn into_integer(self, field: &str) -> CodecResult<i64> {
        match self {
            Value::Integer(value) => Ok(value),
            _ => Err(CodecError::field_type(field, WireType::Integer)),
        }
    }

    pub fn into_bool(self, field: &str) -> CodecResult<bool> {
        match self {
            Value::Boolean(value) => Ok(value),
            _ => Err(CodecError::field_type(field, WireType::Boolean)),
        }
    }

    pub fn into_datetime(self, field: &str) -> CodecResult<DateTime<Utc>> {
        match self {
            Value::DateTime(value) => Ok(value),
            _ => Err(CodecError::field_type(field, "datetime")),
        }
    }

    pub fn into_mapping(self, field: &str) -> CodecResult<BTreeMap<String, String>> {
        match self {
            Value::Mapping(value) => Ok(value),
            _ => Err(CodecError::field_type(field, WireType::PrefixedMapping)),
        }
    }

    pub fn into_json(self, field: &str) -> CodecResult<serde_json::Value> {
        match self {
            Value::Json(value) => Ok(value),
            _ => Err(CodecError::field_type(field, WireType::OpaqueJson)),
        }
    }

    pub fn into_bytes(self, field: &str) -> CodecResult<Bytes> {
        match self {
            Value::Bytes(value) => Ok(value),
            Value::String(value) => Ok(Bytes::from(value)),
            _ => Err(CodecError::field_type(field, WireType::Blob)),
        }
    }

    /// Recovers a concrete nested model.
    pub fn into_model<T: Model>(self, field: &str) -> CodecResult<T> {
        match self {
            Value::Model(model) => downcast_model(model, field),
            _ => Err(CodecError::field_type(field, "model")),
        }
    }

    /// Recovers a list of concrete nested models, preserving order.
    pub fn into_list<T: Model>(self, field: &str) -> CodecResult<Vec<T>> {
        match self {
            Value::List(models) => models
                .into_iter()
                .map(|model| downcast_model(model, field))
                .collect(),
            _ => Err(CodecError::field_type(field, "list")),
        }
    }
}

fn downcast_model<T: Model>(model: Box<dyn Model>, field: &str) -> CodecResult<T> {
    model
        .into_any()
        .downcast::<T>()
        .map(|model| *model)
        .map_err(|_| CodecError::field_type(field, std::any::type_name::<T>()))
}

impl<'a> FieldRef<'a> {
    pub fn list<T: Model>(items: &'a [T]) -> Self {
        FieldRef::List(items.iter().map(|item| item as &dyn Model).collect())
    }

    pub fn model<T: Model>(item: &'a T) -> Self {
        FieldRef::Model(item)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(value: BTreeMap<String, String>) -> Self {
        Value::Mapping(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(value))
    }
}
