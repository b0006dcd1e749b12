use thiserror::Error;

/// Errors raised while mapping models to and from their wire descriptions.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("exactly one of {legacy} or {current} must be supplied")]
    AmbiguousEncoding { legacy: String, current: String },

    #[error("field {field}: cannot read {raw:?} as {wire_type}")]
    Coercion {
        field: String,
        wire_type: String,
        raw: String,
    },

    #[error("malformed {format} body: {detail}")]
    MalformedBody { format: &'static str, detail: String },

    #[error("field {field}: value does not match declared type {expected}")]
    FieldType { field: String, expected: String },

    #[error("no factory registered for model type {0}")]
    UnknownModelType(String),

    #[error("invalid header {name}: {detail}")]
    InvalidHeader { name: String, detail: String },
}

pub type CodecResult<T> = Result<T, CodecError>;

impl CodecError {
    pub fn missing(field: impl Into<String>) -> Self {
        CodecError::MissingRequiredField {
            field: field.into(),
        }
    }

    pub fn coercion(
        field: impl Into<String>,
        wire_type: impl ToString,
        raw: impl Into<String>,
    ) -> Self {
        CodecError::Coercion {
            field: field.into(),
            wire_type: wire_type.to_string(),
            raw: raw.into(),
        }
    }

    pub fn malformed(format: &'static str, detail: impl Into<String>) -> Self {
        CodecError::MalformedBody {
            format,
            detail: detail.into(),
        }
    }

    pub fn field_type(field: impl Into<String>, expected: impl ToString) -> Self {
        CodecError::FieldType {
            field: field.into(),
            expected: expected.to_string(),
        }
    }
}

/// Failure of a full request/response exchange: either the codec rejected
/// the data or the transport failed to carry it.
#[derive(Debug, Error)]
pub enum InvokeError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("transport error: {0}")]
    Transport(#[source] E),
}
