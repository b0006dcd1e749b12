use bytes::Bytes;

use crate::attributes::{FieldDescriptor, Position, Tag, WireType};
use crate::coerce;
use crate::config::CodecConfig;
use crate::errors::{CodecError, CodecResult};
use crate::hooks::{SerdeHook, run_hooks};
use crate::model::RequestModel;
use crate::operation::OperationInput;
use crate::tree;
use crate::value::FieldRef;

pub fn serialize_input<M: RequestModel>(
    request: &M,
    partial: OperationInput,
    hooks: &[SerdeHook<M>],
) -> CodecResult<OperationInput> {
    serialize_input_with_config(request, partial, hooks, &CodecConfig::default())
}

/// Builds the request description for `request` on top of `partial`.
///
/// Open-ended extras are applied first so declared fields win on conflict,
/// then every present `Input` field is placed by position, required fields
/// are checked, and finally `hooks` run in order.
pub fn serialize_input_with_config<M: RequestModel>(
    request: &M,
    mut input: OperationInput,
    hooks: &[SerdeHook<M>],
    config: &CodecConfig,
) -> CodecResult<OperationInput> {
    let extras = request.extras();
    for (name, value) in &extras.headers {
        input.headers.insert(name, value)?;
    }
    for (name, value) in &extras.parameters {
        input.parameters.insert(name.clone(), value.clone());
    }

    let attributes = request.attribute_map();
    for field in attributes.with_tag(Tag::Input) {
        let Some(value) = request.field(field.name) else {
            continue;
        };
        place_field(&mut input, field, value, config)?;
    }

    if input.body.is_none() {
        input.body = extras.payload.clone();
    }

    for field in attributes.with_tag(Tag::Input) {
        if field.position != Position::Nop
            && field.is_required()
            && request.field(field.name).is_none()
        {
            return Err(CodecError::missing(field.name));
        }
    }

    run_hooks(request, &mut input, hooks, config)?;
    tracing::debug!(
        op = %input.op_name,
        headers = input.headers.len(),
        parameters = input.parameters.len(),
        body_len = input.body.as_ref().map_or(0, Bytes::len),
        hooks = hooks.len(),
        "serialized operation input"
    );
    Ok(input)
}

fn place_field(
    input: &mut OperationInput,
    field: &FieldDescriptor,
    value: FieldRef<'_>,
    config: &CodecConfig,
) -> CodecResult<()> {
    match field.position {
        Position::Host => {
            input.bucket = Some(coerce::to_text(field.name, field.wire_type, &value)?);
        }
        Position::Path => {
            input.key = Some(coerce::to_text(field.name, field.wire_type, &value)?);
        }
        Position::Query => {
            let text = coerce::to_text(field.name, field.wire_type, &value)?;
            input.parameters.insert(field.wire_name.to_string(), text);
        }
        Position::Header => match (field.wire_type, value) {
            (WireType::PrefixedMapping, FieldRef::Mapping(mapping)) => {
                for (name, text) in coerce::expand_prefixed(field.wire_name, mapping) {
                    input.headers.insert(&name, &text)?;
                }
            }
            (wire_type, value) => {
                let text = coerce::to_text(field.name, wire_type, &value)?;
                input.headers.insert(field.wire_name, &text)?;
            }
        },
        Position::Body => input.body = Some(encode_body(field, value, config)?),
        Position::Nop => {}
    }
    Ok(())
}

fn encode_body(
    field: &FieldDescriptor,
    value: FieldRef<'_>,
    config: &CodecConfig,
) -> CodecResult<Bytes> {
    let body: Bytes = match value {
        FieldRef::Model(model) if tree::is_json_model(model) => {
            serde_json::to_vec(&tree::encode_json(model)?)
                .map_err(|err| CodecError::malformed("json", err.to_string()))?
                .into()
        }
        FieldRef::Model(model) => tree::encode_document(model, field.wire_name, config)?.into(),
        FieldRef::Json(json) => serde_json::to_vec(json)
            .map_err(|err| CodecError::malformed("json", err.to_string()))?
            .into(),
        FieldRef::Bytes(bytes) => bytes.clone(),
        FieldRef::String(text) => Bytes::copy_from_slice(text.as_bytes()),
        _ => return Err(CodecError::field_type(field.name, field.wire_type)),
    };
    Ok(body)
}
