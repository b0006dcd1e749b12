//! Field-metadata driven codec between typed object-storage models and
//! HTTP-shaped wire descriptions.
//!
//! Request and result types declare a static [`AttributeMap`] (plus optional
//! document name and [`DependencyMap`]); the generic [`serialize_input`] and
//! [`deserialize_output`] passes do the rest. Behavior that per-field metadata
//! cannot express is attached as ordered [`SerdeHook`]s.

pub mod attributes;
pub mod coerce;
pub mod config;
pub mod errors;
pub mod hooks;
pub mod input;
pub mod model;
pub mod operation;
pub mod output;
pub mod tree;
pub mod value;
pub mod xml;

#[cfg(test)]
mod test_util;

pub use attributes::{
    Alias, AttributeMap, DependencyMap, DependencyScope, FieldDescriptor, ModelFactory, Position,
    Tag, WireType, factory,
};
pub use config::{CodecConfig, DEFAULT_REQUEST_ID_HEADER};
pub use errors::{CodecError, CodecResult, InvokeError};
pub use hooks::{CONTENT_SHA256_HEADER, SerdeHook, add_content_sha256, exactly_one, run_hooks};
pub use input::{serialize_input, serialize_input_with_config};
pub use model::{
    Model, RequestExtras, RequestModel, ResultEnvelope, ResultModel, from_inputs,
};
pub use operation::{Headers, OperationInput, OperationOutput, Transport, invoke};
pub use output::{deserialize_output, deserialize_output_with_config};
pub use value::{AsAny, FieldRef, Value};
pub use xml::XmlNode;
