use std::collections::BTreeMap;
use std::fmt::Debug;

use bytes::Bytes;

use crate::attributes::{AttributeMap, DependencyMap};
use crate::errors::CodecResult;
use crate::operation::Headers;
use crate::value::{AsAny, FieldRef, Value};

/// A typed record whose fields are described by a static [`AttributeMap`].
///
/// Implementations are declarations: they expose each declared field by name
/// and accept values back by name. Everything else about the wire is derived
/// from the attribute map by the generic serializer and deserializer.
pub trait Model: AsAny + Debug + Send + Sync {
    fn attribute_map(&self) -> &'static AttributeMap;

    /// Element name used when this model is the root of, or nested within,
    /// a structured body.
    fn document_name(&self) -> Option<&'static str> {
        None
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        None
    }

    /// Current value of a declared field, `None` when unset or undeclared.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Assigns a declared field. Names that are not declared are ignored.
    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()>;

    /// Accepts a reserved extension slot (e.g. `headers`). Returns `false`
    /// when the name is not a slot this model reserves.
    fn accept_extension(&mut self, _name: &str, _value: Value) -> CodecResult<bool> {
        Ok(false)
    }
}

/// Open-ended request data not bound to any declared field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestExtras {
    pub headers: BTreeMap<String, String>,
    pub parameters: BTreeMap<String, String>,
    pub payload: Option<Bytes>,
}

impl RequestExtras {
    pub fn accept(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        match name {
            "headers" => self.headers.extend(value.into_mapping(name)?),
            "parameters" => self.parameters.extend(value.into_mapping(name)?),
            "payload" => self.payload = Some(value.into_bytes(name)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

pub trait RequestModel: Model {
    fn extras(&self) -> &RequestExtras;
    fn extras_mut(&mut self) -> &mut RequestExtras;
}

/// Response data every result carries regardless of its declared fields.
#[derive(Clone, Debug, Default)]
pub struct ResultEnvelope {
    pub status: String,
    pub status_code: u16,
    pub request_id: String,
    pub headers: Headers,
}

impl ResultEnvelope {
    pub fn accept(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        match name {
            "status" => self.status = value.into_string(name)?,
            "status_code" => {
                let code = value.into_integer(name)?;
                self.status_code = u16::try_from(code).map_err(|_| {
                    crate::errors::CodecError::coercion(name, "status code", code.to_string())
                })?;
            }
            "request_id" => self.request_id = value.into_string(name)?,
            "headers" => {
                for (key, value) in value.into_mapping(name)? {
                    self.headers.insert(&key, &value)?;
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

pub trait ResultModel: Model {
    fn envelope(&self) -> &ResultEnvelope;
    fn envelope_mut(&mut self) -> &mut ResultEnvelope;
}

/// Builds a model from named inputs.
///
/// Legacy alias names resolve to their canonical field (the canonical name
/// wins when both are given), declared fields are assigned, reserved
/// extension slots are routed to the model, and any other name is dropped.
pub fn from_inputs<M, I, K>(inputs: I) -> CodecResult<M>
where
    M: Model + Default,
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut model = M::default();
    let attributes = model.attribute_map();

    let mut named: BTreeMap<String, Value> = inputs
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect();

    for alias in attributes.aliases() {
        let Some(legacy) = named.remove(alias.legacy) else {
            continue;
        };
        if !named.contains_key(alias.canonical) {
            named.insert(alias.canonical.to_string(), legacy);
        }
    }

    for (name, value) in named {
        if attributes.contains(&name) {
            model.set_field(&name, value)?;
        } else {
            let kind = value.kind();
            if !model.accept_extension(&name, value)? {
                tracing::debug!(input = %name, kind, "dropping unrecognized model input");
            }
        }
    }
    Ok(model)
}
