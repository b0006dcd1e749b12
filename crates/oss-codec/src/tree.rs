//! Recursive structured-body codec.
//!
//! Walks a model's [`AttributeMap`](crate::attributes::AttributeMap) in
//! declaration order, turning `Xml`-tagged fields into child elements and
//! back. Models declaring `Json`-tagged fields use JSON objects instead.
//! Nested models are materialized through the dependency maps in scope.

use crate::attributes::{DependencyScope, FieldDescriptor, Tag, WireType};
use crate::coerce;
use crate::config::CodecConfig;
use crate::errors::{CodecError, CodecResult};
use crate::model::Model;
use crate::value::{FieldRef, Value};
use crate::xml::XmlNode;

use serde_json::{Map, Value as Json};

/// Encodes `model` as an element named `element`. Fails on the first
/// required field that is unset, at any depth.
pub fn encode_model(model: &dyn Model, element: &str) -> CodecResult<XmlNode> {
    let mut node = XmlNode::new(element);
    for field in model.attribute_map().with_tag(Tag::Xml) {
        let Some(value) = model.field(field.name) else {
            if field.is_required() {
                return Err(CodecError::missing(field.name));
            }
            continue;
        };
        encode_field(&mut node, field, value)?;
    }
    Ok(node)
}

fn encode_field(
    node: &mut XmlNode,
    field: &FieldDescriptor,
    value: FieldRef<'_>,
) -> CodecResult<()> {
    match value {
        FieldRef::Model(nested) => node.push(encode_model(nested, field.wire_name)?),
        FieldRef::List(items) => {
            for item in items {
                node.push(encode_model(item, field.wire_name)?);
            }
        }
        FieldRef::Mapping(mapping) => {
            for (name, text) in coerce::expand_prefixed(field.wire_name, mapping) {
                node.push(XmlNode::with_text(name, text));
            }
        }
        scalar => {
            let text = coerce::to_text(field.name, field.wire_type, &scalar)?;
            node.push(XmlNode::with_text(field.wire_name, text));
        }
    }
    Ok(())
}

/// Renders `model` as a complete XML document. The root element is the
/// model's document name, or `fallback` when it declares none.
pub fn encode_document(
    model: &dyn Model,
    fallback: &str,
    config: &CodecConfig,
) -> CodecResult<Vec<u8>> {
    let root = model.document_name().unwrap_or(fallback);
    let node = encode_model(model, root)?;
    let bytes = node.to_bytes(config.xml_declaration)?;
    tracing::trace!(root, len = bytes.len(), "encoded xml document");
    Ok(bytes)
}

/// Fills the `Xml`-tagged fields of `model` from the children of `node`.
///
/// Scalars read the first matching child's text; nested models the first
/// matching child; lists every matching child in document order. Children
/// that match no field are ignored, and absent children leave fields unset.
pub fn decode_model(
    node: &XmlNode,
    model: &mut dyn Model,
    scope: &mut DependencyScope,
) -> CodecResult<()> {
    let pushed = scope.push(model.dependency_map());
    let result = decode_fields(node, model, scope);
    if pushed {
        scope.pop();
    }
    result
}

fn decode_fields(
    node: &XmlNode,
    model: &mut dyn Model,
    scope: &mut DependencyScope,
) -> CodecResult<()> {
    let attributes = model.attribute_map();
    for field in attributes.with_tag(Tag::Xml) {
        if let Some(value) = decode_field(node, field, scope)? {
            model.set_field(field.name, value)?;
        }
    }
    Ok(())
}

fn decode_field(
    node: &XmlNode,
    field: &FieldDescriptor,
    scope: &mut DependencyScope,
) -> CodecResult<Option<Value>> {
    match field.wire_type {
        WireType::Model(type_name) => {
            let Some(child) = node.child(field.wire_name) else {
                return Ok(None);
            };
            let nested = decode_nested(child, type_name, scope)?;
            Ok(Some(Value::Model(nested)))
        }
        WireType::ModelList(type_name) => {
            let mut items = Vec::new();
            for child in node.children_named(field.wire_name) {
                items.push(decode_nested(child, type_name, scope)?);
            }
            if items.is_empty() {
                return Ok(None);
            }
            Ok(Some(Value::List(items)))
        }
        WireType::PrefixedMapping => {
            let mapping = coerce::collect_prefixed(
                field.wire_name,
                node.children
                    .iter()
                    .map(|child| (child.name.as_str(), child.text.as_str())),
            );
            if mapping.is_empty() {
                return Ok(None);
            }
            Ok(Some(Value::Mapping(mapping)))
        }
        wire_type => match node.child(field.wire_name) {
            Some(child) => coerce::from_text(field.name, wire_type, &child.text).map(Some),
            None => Ok(None),
        },
    }
}

fn decode_nested(
    node: &XmlNode,
    type_name: &str,
    scope: &mut DependencyScope,
) -> CodecResult<Box<dyn Model>> {
    let mut nested = scope
        .create(type_name)
        .ok_or_else(|| CodecError::UnknownModelType(type_name.to_string()))?;
    decode_model(node, nested.as_mut(), scope)?;
    Ok(nested)
}

/// Parses `data` and fills `model` from its root element.
pub fn decode_document(
    data: &[u8],
    model: &mut dyn Model,
    config: &CodecConfig,
) -> CodecResult<()> {
    let root = XmlNode::parse(data)?;
    decode_root(&root, model, config)
}

/// Fills `model` from an already parsed root element, checking the root
/// name against the model's document name when configured to.
pub fn decode_root(
    root: &XmlNode,
    model: &mut dyn Model,
    config: &CodecConfig,
) -> CodecResult<()> {
    if let Some(expected) = model.document_name() {
        if config.strict_root && root.name != expected {
            return Err(CodecError::malformed(
                "xml",
                format!("expected root element <{expected}>, found <{}>", root.name),
            ));
        }
    }
    let mut scope = DependencyScope::new();
    decode_model(root, model, &mut scope)
}

/// True when `model` declares `Json`-tagged fields, i.e. its documents are
/// JSON objects rather than XML trees.
pub fn is_json_model(model: &dyn Model) -> bool {
    model.attribute_map().with_tag(Tag::Json).next().is_some()
}

/// Encodes the `Json`-tagged fields of `model` as a JSON object. Integers
/// and booleans become JSON numbers and booleans; other scalars use their
/// wire text.
pub fn encode_json(model: &dyn Model) -> CodecResult<Json> {
    let mut object = Map::new();
    for field in model.attribute_map().with_tag(Tag::Json) {
        let Some(value) = model.field(field.name) else {
            if field.is_required() {
                return Err(CodecError::missing(field.name));
            }
            continue;
        };
        match value {
            FieldRef::Model(nested) => {
                object.insert(field.wire_name.to_string(), encode_json(nested)?);
            }
            FieldRef::List(items) => {
                let items = items
                    .into_iter()
                    .map(encode_json)
                    .collect::<CodecResult<Vec<_>>>()?;
                object.insert(field.wire_name.to_string(), Json::Array(items));
            }
            FieldRef::Mapping(mapping) => {
                for (name, text) in coerce::expand_prefixed(field.wire_name, mapping) {
                    object.insert(name, Json::String(text));
                }
            }
            FieldRef::Json(json) => {
                object.insert(field.wire_name.to_string(), json.clone());
            }
            FieldRef::Integer(number) => {
                object.insert(field.wire_name.to_string(), Json::from(number));
            }
            FieldRef::Boolean(flag) => {
                object.insert(field.wire_name.to_string(), Json::Bool(flag));
            }
            scalar => {
                let text = coerce::to_text(field.name, field.wire_type, &scalar)?;
                object.insert(field.wire_name.to_string(), Json::String(text));
            }
        }
    }
    Ok(Json::Object(object))
}

/// Fills the `Json`-tagged fields of `model` from a JSON object. Missing
/// and `null` members leave fields unset; unknown members are ignored.
pub fn decode_json(
    value: &Json,
    model: &mut dyn Model,
    scope: &mut DependencyScope,
) -> CodecResult<()> {
    let Json::Object(object) = value else {
        return Err(CodecError::malformed("json", "expected a JSON object"));
    };
    let pushed = scope.push(model.dependency_map());
    let result = decode_json_fields(object, model, scope);
    if pushed {
        scope.pop();
    }
    result
}

fn decode_json_fields(
    object: &Map<String, Json>,
    model: &mut dyn Model,
    scope: &mut DependencyScope,
) -> CodecResult<()> {
    let attributes = model.attribute_map();
    for field in attributes.with_tag(Tag::Json) {
        if let Some(value) = decode_json_field(object, field, scope)? {
            model.set_field(field.name, value)?;
        }
    }
    Ok(())
}

fn decode_json_field(
    object: &Map<String, Json>,
    field: &FieldDescriptor,
    scope: &mut DependencyScope,
) -> CodecResult<Option<Value>> {
    if field.wire_type == WireType::PrefixedMapping {
        let mapping = coerce::collect_prefixed(
            field.wire_name,
            object
                .iter()
                .filter_map(|(name, value)| value.as_str().map(|text| (name.as_str(), text))),
        );
        return Ok((!mapping.is_empty()).then_some(Value::Mapping(mapping)));
    }

    let member = match object.get(field.wire_name) {
        None | Some(Json::Null) => return Ok(None),
        Some(member) => member,
    };
    let value = match (field.wire_type, member) {
        (WireType::Model(type_name), member) => {
            Value::Model(json_nested(member, type_name, scope)?)
        }
        (WireType::ModelList(type_name), Json::Array(items)) => {
            if items.is_empty() {
                return Ok(None);
            }
            let mut models = Vec::with_capacity(items.len());
            for item in items {
                models.push(json_nested(item, type_name, scope)?);
            }
            Value::List(models)
        }
        (WireType::OpaqueJson, member) => Value::Json(member.clone()),
        (wire_type, Json::String(text)) => coerce::from_text(field.name, wire_type, text)?,
        (wire_type @ (WireType::Integer | WireType::Boolean), Json::Number(_) | Json::Bool(_)) => {
            coerce::from_text(field.name, wire_type, &member.to_string())?
        }
        (wire_type, other) => {
            return Err(CodecError::coercion(field.name, wire_type, other.to_string()));
        }
    };
    Ok(Some(value))
}

fn json_nested(
    value: &Json,
    type_name: &str,
    scope: &mut DependencyScope,
) -> CodecResult<Box<dyn Model>> {
    let mut nested = scope
        .create(type_name)
        .ok_or_else(|| CodecError::UnknownModelType(type_name.to_string()))?;
    decode_json(value, nested.as_mut(), scope)?;
    Ok(nested)
}

/// Parses `data` as a JSON object and fills `model` from it.
pub fn decode_json_document(data: &[u8], model: &mut dyn Model) -> CodecResult<()> {
    let value: Json = serde_json::from_slice(data)
        .map_err(|err| CodecError::malformed("json", err.to_string()))?;
    decode_json(&value, model, &mut DependencyScope::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{Destination, Entry, Inventory, Listing, Owner};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn listing() -> Listing {
        Listing {
            name: Some("examplebucket".to_string()),
            max_keys: Some(2),
            truncated: Some(false),
            entries: Some(vec![
                Entry {
                    key: Some("a.txt".to_string()),
                    size: Some(10),
                    owner: Some(Owner {
                        id: Some("1001".to_string()),
                    }),
                },
                Entry {
                    key: Some("b.txt".to_string()),
                    size: None,
                    owner: None,
                },
            ]),
            tags: None,
        }
    }

    #[test]
    fn encode_emits_fields_in_declaration_order_and_skips_absent_values() {
        let config = CodecConfig::default().with_xml_declaration(false);
        let bytes =
            encode_document(&listing(), "Fallback", &config).expect("listing should encode");

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<Listing><Name>examplebucket</Name><MaxKeys>2</MaxKeys>\
             <IsTruncated>false</IsTruncated>\
             <Entry><Key>a.txt</Key><Size>10</Size><Owner><ID>1001</ID></Owner></Entry>\
             <Entry><Key>b.txt</Key></Entry></Listing>"
        );
    }

    #[test]
    fn decode_restores_list_order_and_nested_models() {
        let config = CodecConfig::default();
        let bytes = encode_document(&listing(), "Listing", &config).unwrap();
        let mut decoded = Listing::default();

        decode_document(&bytes, &mut decoded, &config).expect("listing should decode");

        assert_eq!(decoded, listing());
    }

    #[test]
    fn decode_with_no_matching_children_leaves_list_absent() {
        let mut decoded = Listing::default();

        let body = b"<Listing><Name>b</Name><Unknown>x</Unknown></Listing>";
        decode_document(body, &mut decoded, &CodecConfig::default())
            .expect("unknown nodes are ignored");

        assert_eq!(decoded.name.as_deref(), Some("b"));
        assert!(decoded.entries.is_none());
    }

    #[test]
    fn decode_rejects_unexpected_root_when_strict() {
        let mut decoded = Listing::default();
        let err = decode_document(b"<Other/>", &mut decoded, &CodecConfig::default()).unwrap_err();

        assert!(matches!(err, CodecError::MalformedBody { .. }));

        decode_document(
            b"<Other><Name>n</Name></Other>",
            &mut decoded,
            &CodecConfig::default().with_strict_root(false),
        )
        .expect("lenient root");
        assert_eq!(decoded.name.as_deref(), Some("n"));
    }

    #[test]
    fn decode_reports_coercion_failure_for_bad_scalar() {
        let mut decoded = Listing::default();
        let err = decode_document(
            b"<Listing><MaxKeys>many</MaxKeys></Listing>",
            &mut decoded,
            &CodecConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CodecError::Coercion { ref field, .. } if field == "max_keys"));
    }

    #[test]
    fn prefixed_mapping_round_trips_through_elements() {
        let mut source = Listing::default();
        source.tags = Some(
            [("env", "prod"), ("team", "storage")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        let config = CodecConfig::default();
        let bytes = encode_document(&source, "Listing", &config).unwrap();
        let mut decoded = Listing::default();

        decode_document(&bytes, &mut decoded, &config).unwrap();

        assert_eq!(decoded.tags, source.tags);
    }

    #[test]
    fn nested_type_without_factory_is_reported() {
        let mut owner = Owner::default();
        let node = XmlNode::parse(b"<Owner><ID>7</ID></Owner>").unwrap();
        decode_model(&node, &mut owner, &mut DependencyScope::new()).unwrap();
        assert_eq!(owner.id.as_deref(), Some("7"));

        let mut entry = Entry::default();
        let node = XmlNode::parse(b"<Entry><Owner><ID>7</ID></Owner></Entry>").unwrap();
        let err = decode_model(&node, &mut entry, &mut DependencyScope::new()).unwrap_err();
        assert!(matches!(err, CodecError::UnknownModelType(ref name) if name == "Owner"));
    }

    #[test]
    fn unset_required_field_fails_at_any_depth() {
        let mut listing = listing();
        listing.entries = Some(vec![Entry {
            size: Some(1),
            ..Entry::default()
        }]);

        let err = encode_model(&listing, "Listing").unwrap_err();

        assert!(matches!(err, CodecError::MissingRequiredField { ref field } if field == "key"));
    }

    #[test]
    fn json_unset_required_nested_field_fails() {
        let mut inventory = inventory();
        inventory.destinations = Some(vec![Destination {
            prefix: Some("p".to_string()),
            ..Destination::default()
        }]);

        let err = encode_json(&inventory).unwrap_err();

        assert!(matches!(err, CodecError::MissingRequiredField { ref field } if field == "bucket"));
    }

    fn inventory() -> Inventory {
        Inventory {
            id: Some("report1".to_string()),
            enabled: Some(true),
            frequency: Some(7),
            created: Some(Utc.with_ymd_and_hms(2020, 5, 18, 5, 45, 54).unwrap()),
            destinations: Some(vec![
                Destination {
                    bucket: Some("acs:oss:::dest".to_string()),
                    prefix: Some("prefix1".to_string()),
                },
                Destination {
                    bucket: Some("acs:oss:::backup".to_string()),
                    prefix: None,
                },
            ]),
            extra: Some(json!({"Filter": {"Prefix": "logs/"}})),
        }
    }

    #[test]
    fn json_encode_uses_native_numbers_and_booleans() {
        let encoded = encode_json(&inventory()).expect("inventory should encode");

        assert_eq!(
            encoded,
            json!({
                "Id": "report1",
                "IsEnabled": true,
                "Frequency": 7,
                "CreatedAt": "2020-05-18T05:45:54.000Z",
                "Destinations": [
                    {"Bucket": "acs:oss:::dest", "Prefix": "prefix1"},
                    {"Bucket": "acs:oss:::backup"}
                ],
                "Extra": {"Filter": {"Prefix": "logs/"}}
            })
        );
    }

    #[test]
    fn json_decode_restores_nested_list_in_order() {
        let bytes = serde_json::to_vec(&encode_json(&inventory()).unwrap()).unwrap();
        let mut decoded = Inventory::default();

        decode_json_document(&bytes, &mut decoded).expect("inventory should decode");

        assert_eq!(decoded, inventory());
    }

    #[test]
    fn json_decode_accepts_string_scalars_and_skips_null_members() {
        let mut decoded = Inventory::default();
        decode_json_document(
            br#"{"Id":null,"IsEnabled":"false","Frequency":"30","Destinations":[],"Unknown":1}"#,
            &mut decoded,
        )
        .expect("lenient scalars should decode");

        assert_eq!(decoded.id, None);
        assert_eq!(decoded.enabled, Some(false));
        assert_eq!(decoded.frequency, Some(30));
        assert!(decoded.destinations.is_none());
    }

    #[test]
    fn json_decode_rejects_non_object_and_mistyped_members() {
        let mut decoded = Inventory::default();
        let err = decode_json_document(b"[1, 2]", &mut decoded).unwrap_err();
        assert!(matches!(err, CodecError::MalformedBody { format: "json", .. }));

        let err = decode_json_document(br#"{"Frequency": [7]}"#, &mut decoded).unwrap_err();
        assert!(matches!(err, CodecError::Coercion { ref field, .. } if field == "frequency"));
    }
}
