use std::collections::BTreeMap;

use serde_json::Value as Json;

use crate::attributes::{DependencyScope, FieldDescriptor, Position, Tag, WireType};
use crate::coerce;
use crate::config::CodecConfig;
use crate::errors::{CodecError, CodecResult};
use crate::model::ResultModel;
use crate::operation::{Headers, OperationOutput};
use crate::tree;
use crate::value::Value;
use crate::xml::XmlNode;

pub fn deserialize_output<M: ResultModel>(
    result: &mut M,
    output: OperationOutput,
) -> CodecResult<()> {
    deserialize_output_with_config(result, output, &CodecConfig::default())
}

/// Populates `result` from a response description.
///
/// The envelope (status, code, request id, full header map) is always set.
/// Declared `Output` header fields are read case-insensitively and left unset
/// when absent. A structured body is parsed at most once and shared by every
/// field that reads from it.
pub fn deserialize_output_with_config<M: ResultModel>(
    result: &mut M,
    output: OperationOutput,
    config: &CodecConfig,
) -> CodecResult<()> {
    let OperationOutput {
        status,
        status_code,
        headers,
        body,
    } = output;

    let attributes = result.attribute_map();
    for field in attributes.with_tag(Tag::Output) {
        if field.position == Position::Header {
            if let Some(value) = read_header(field, &headers)? {
                result.set_field(field.name, value)?;
            }
        }
    }

    if let Some(body) = body.as_deref() {
        let mut document: Option<XmlNode> = None;
        let mut json_document: Option<Json> = None;
        for field in attributes.with_tag(Tag::Output) {
            if field.position != Position::Body {
                continue;
            }
            let value = match field.wire_type {
                WireType::Blob => Value::Bytes(bytes::Bytes::copy_from_slice(body)),
                WireType::String => Value::String(String::from_utf8(body.to_vec()).map_err(
                    |_| CodecError::coercion(field.name, field.wire_type, "<binary body>"),
                )?),
                _ if body.is_empty() => continue,
                WireType::Model(type_name) => {
                    let mut nested = result
                        .dependency_map()
                        .and_then(|map| map.create(type_name))
                        .ok_or_else(|| CodecError::UnknownModelType(type_name.to_string()))?;
                    if tree::is_json_model(nested.as_ref()) {
                        let object = parsed_json(&mut json_document, body)?;
                        tree::decode_json(object, nested.as_mut(), &mut DependencyScope::new())?;
                    } else {
                        let root = parsed(&mut document, body)?;
                        tree::decode_root(root, nested.as_mut(), config)?;
                    }
                    Value::Model(nested)
                }
                WireType::OpaqueJson => Value::Json(
                    serde_json::from_slice(body)
                        .map_err(|err| CodecError::malformed("json", err.to_string()))?,
                ),
                other => return Err(CodecError::field_type(field.name, other)),
            };
            result.set_field(field.name, value)?;
        }

        if !body.is_empty() {
            if attributes.with_tag(Tag::Xml).next().is_some() {
                let root = parsed(&mut document, body)?;
                tree::decode_root(root, result, config)?;
            } else if attributes.with_tag(Tag::Json).next().is_some() {
                let object = parsed_json(&mut json_document, body)?;
                tree::decode_json(object, result, &mut DependencyScope::new())?;
            }
        }
    }

    let request_id = headers
        .get_str(&config.request_id_header)
        .unwrap_or_default()
        .to_string();
    tracing::debug!(status_code, request_id = %request_id, "deserialized operation output");

    let envelope = result.envelope_mut();
    envelope.status = status;
    envelope.status_code = status_code;
    envelope.request_id = request_id;
    envelope.headers = headers;
    Ok(())
}

fn parsed<'a>(document: &'a mut Option<XmlNode>, body: &[u8]) -> CodecResult<&'a XmlNode> {
    if document.is_none() {
        *document = Some(XmlNode::parse(body)?);
    }
    document
        .as_ref()
        .ok_or_else(|| CodecError::malformed("xml", "document unavailable"))
}

fn parsed_json<'a>(document: &'a mut Option<Json>, body: &[u8]) -> CodecResult<&'a Json> {
    if document.is_none() {
        let value = serde_json::from_slice(body)
            .map_err(|err| CodecError::malformed("json", err.to_string()))?;
        *document = Some(value);
    }
    document
        .as_ref()
        .ok_or_else(|| CodecError::malformed("json", "document unavailable"))
}

fn read_header(field: &FieldDescriptor, headers: &Headers) -> CodecResult<Option<Value>> {
    if field.wire_type == WireType::PrefixedMapping {
        let mapping: BTreeMap<String, String> = coerce::collect_prefixed(
            field.wire_name,
            headers.iter().filter_map(|(name, value)| {
                std::str::from_utf8(value.as_bytes())
                    .ok()
                    .map(|value| (name, value))
            }),
        );
        return Ok((!mapping.is_empty()).then_some(Value::Mapping(mapping)));
    }

    let Some(raw) = headers.get(field.wire_name) else {
        return Ok(None);
    };
    let text = std::str::from_utf8(raw.as_bytes())
        .map_err(|_| CodecError::coercion(field.name, field.wire_type, "<non-utf8 header>"))?;
    coerce::from_text(field.name, field.wire_type, text).map(Some)
}
