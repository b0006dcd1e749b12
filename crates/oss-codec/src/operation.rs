//! Wire-bound request and response descriptions exchanged with the transport.

use std::collections::{BTreeMap, HashMap};
use std::error::Error as StdError;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};

use crate::errors::{CodecError, CodecResult, InvokeError};
use crate::hooks::SerdeHook;
use crate::input::serialize_input;
use crate::model::{RequestModel, ResultModel};
use crate::output::deserialize_output;

/// Everything the transport needs to issue one HTTP request.
#[derive(Clone, Debug)]
pub struct OperationInput {
    pub op_name: String,
    pub method: Method,
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub headers: Headers,
    pub parameters: BTreeMap<String, String>,
    pub body: Option<Bytes>,
}

impl OperationInput {
    pub fn new(op_name: impl Into<String>, method: Method) -> Self {
        Self {
            op_name: op_name.into(),
            method,
            bucket: None,
            key: None,
            headers: Headers::new(),
            parameters: BTreeMap::new(),
            body: None,
        }
    }

    /// Adds a query parameter carried regardless of the request's fields,
    /// such as a sub-resource flag (`?delete`).
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> CodecResult<Self> {
        self.headers.insert(name, value)?;
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get_str(name)
    }
}

/// A response as handed back by the transport, body not yet parsed.
#[derive(Clone, Debug, Default)]
pub struct OperationOutput {
    pub status: String,
    pub status_code: u16,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl OperationOutput {
    pub fn new(status_code: u16, status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            status_code,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> CodecResult<Self> {
        self.headers.insert(name, value)?;
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Header store with case-insensitive lookup that remembers how each name
/// was spelled when it was last inserted.
#[derive(Clone, Debug, Default)]
pub struct Headers {
    map: HeaderMap,
    spelling: HashMap<HeaderName, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value under any case.
    pub fn insert(&mut self, name: &str, value: &str) -> CodecResult<()> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| CodecError::InvalidHeader {
                name: name.to_string(),
                detail: err.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| CodecError::InvalidHeader {
            name: name.to_string(),
            detail: err.to_string(),
        })?;
        if header_name.as_str() == name {
            self.spelling.remove(&header_name);
        } else {
            self.spelling.insert(header_name.clone(), name.to_string());
        }
        self.map.insert(header_name, header_value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.map.get(name)
    }

    /// Value of `name` as UTF-8 text; `None` when absent or not UTF-8.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries with names in the spelling they were inserted with.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> + '_ {
        self.map.iter().map(|(name, value)| {
            let spelled = self.spelling.get(name).map_or(name.as_str(), String::as_str);
            (spelled, value)
        })
    }

    pub fn as_header_map(&self) -> &HeaderMap {
        &self.map
    }
}

impl From<HeaderMap> for Headers {
    fn from(map: HeaderMap) -> Self {
        Self {
            map,
            spelling: HashMap::new(),
        }
    }
}

/// The collaborator that turns an [`OperationInput`] into an HTTP exchange.
/// Connection management, signing and retries all live behind it.
pub trait Transport {
    type Error: StdError + 'static;

    fn execute(&self, input: OperationInput) -> Result<OperationOutput, Self::Error>;
}

/// Serializes `request`, hands it to `transport` and decodes the response
/// into a fresh `R`.
pub fn invoke<T, M, R>(
    transport: &T,
    request: &M,
    partial: OperationInput,
    hooks: &[SerdeHook<M>],
) -> Result<R, InvokeError<T::Error>>
where
    T: Transport,
    M: RequestModel,
    R: ResultModel + Default,
{
    let input = serialize_input(request, partial, hooks)?;
    let op_name = input.op_name.clone();
    let output = transport.execute(input).map_err(InvokeError::Transport)?;
    tracing::debug!(op = %op_name, status_code = output.status_code, "operation completed");
    let mut result = R::default();
    deserialize_output(&mut result, output)?;
    Ok(result)
}
