//! `DeleteMultipleObjects`: the request accepts either the legacy flat
//! `objects` + `quiet` pair or a composite [`Delete`] container. Both
//! encodings render the same `<Delete>` document.

use oss_codec::tree;
use oss_codec::{
    AttributeMap, CodecConfig, CodecError, CodecResult, DependencyMap, FieldDescriptor, FieldRef,
    Model, ModelFactory, OperationInput, Position, RequestExtras, RequestModel, ResultEnvelope,
    ResultModel, Value, WireType, exactly_one, factory,
};

/// One key (and optional version) to delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectIdentifier {
    pub key: Option<String>,
    pub version_id: Option<String>,
}

/// Entry of the legacy flat `objects` list.
pub type DeleteObject = ObjectIdentifier;

static OBJECT_IDENTIFIER_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::xml("key", "Key", WireType::String).required(),
    FieldDescriptor::xml("version_id", "VersionId", WireType::String),
];
static OBJECT_IDENTIFIER_ATTRIBUTES: AttributeMap = AttributeMap::new(&OBJECT_IDENTIFIER_FIELDS);

impl ObjectIdentifier {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            version_id: None,
        }
    }

    pub fn with_version(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }
}

impl Model for ObjectIdentifier {
    fn attribute_map(&self) -> &'static AttributeMap {
        &OBJECT_IDENTIFIER_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Object")
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "key" => self.key.as_deref().map(FieldRef::String),
            "version_id" => self.version_id.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "key" => self.key = Some(value.into_string(name)?),
            "version_id" => self.version_id = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }
}

/// The composite delete container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delete {
    pub objects: Option<Vec<ObjectIdentifier>>,
    pub quiet: Option<bool>,
}

static DELETE_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::xml("objects", "Object", WireType::ModelList("ObjectIdentifier")),
    FieldDescriptor::xml("quiet", "Quiet", WireType::Boolean),
];
static DELETE_ATTRIBUTES: AttributeMap = AttributeMap::new(&DELETE_FIELDS);
static DELETE_FACTORIES: [(&str, ModelFactory); 1] =
    [("ObjectIdentifier", factory::<ObjectIdentifier>)];
static DELETE_DEPENDENCIES: DependencyMap = DependencyMap::new(&DELETE_FACTORIES);

impl Model for Delete {
    fn attribute_map(&self) -> &'static AttributeMap {
        &DELETE_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Delete")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&DELETE_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "objects" => self.objects.as_deref().map(FieldRef::list),
            "quiet" => self.quiet.map(FieldRef::Boolean),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "objects" => self.objects = Some(value.into_list(name)?),
            "quiet" => self.quiet = Some(value.into_bool(name)?),
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DeleteMultipleObjectsRequest {
    pub bucket: Option<String>,
    pub encoding_type: Option<String>,
    pub objects: Option<Vec<DeleteObject>>,
    pub quiet: Option<bool>,
    pub delete: Option<Delete>,
    pub request_payer: Option<String>,
    pub extras: RequestExtras,
}

static DELETE_MULTIPLE_OBJECTS_REQUEST_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String),
    FieldDescriptor::input("encoding_type", Position::Query, "encoding-type", WireType::String),
    FieldDescriptor::input(
        "objects",
        Position::Nop,
        "Object",
        WireType::ModelList("ObjectIdentifier"),
    ),
    FieldDescriptor::input("quiet", Position::Nop, "Quiet", WireType::Boolean),
    FieldDescriptor::input("delete", Position::Body, "Delete", WireType::Model("Delete")),
    FieldDescriptor::input(
        "request_payer",
        Position::Header,
        "x-oss-request-payer",
        WireType::String,
    ),
];
static DELETE_MULTIPLE_OBJECTS_REQUEST_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&DELETE_MULTIPLE_OBJECTS_REQUEST_FIELDS);

impl Model for DeleteMultipleObjectsRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &DELETE_MULTIPLE_OBJECTS_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "encoding_type" => self.encoding_type.as_deref().map(FieldRef::String),
            "objects" => self.objects.as_deref().map(FieldRef::list),
            "quiet" => self.quiet.map(FieldRef::Boolean),
            "delete" => self.delete.as_ref().map(FieldRef::model),
            "request_payer" => self.request_payer.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "encoding_type" => self.encoding_type = Some(value.into_string(name)?),
            "objects" => self.objects = Some(value.into_list(name)?),
            "quiet" => self.quiet = Some(value.into_bool(name)?),
            "delete" => self.delete = Some(value.into_model(name)?),
            "request_payer" => self.request_payer = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for DeleteMultipleObjectsRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

/// Requires exactly one of the legacy pair (`objects`, `quiet`) or
/// `delete`. Setting `quiet` alone counts as choosing the legacy pair, which
/// then needs `objects`. The legacy pair is rendered as the `<Delete>` body.
pub fn resolve_delete_encoding(
    request: &DeleteMultipleObjectsRequest,
    input: &mut OperationInput,
    config: &CodecConfig,
) -> CodecResult<()> {
    let legacy = request.objects.is_some() || request.quiet.is_some();
    exactly_one("objects", legacy, "delete", request.delete.is_some())?;
    if !legacy {
        return Ok(());
    }

    let objects = request
        .objects
        .as_ref()
        .ok_or_else(|| CodecError::missing("objects"))?;
    let delete = Delete {
        objects: Some(objects.clone()),
        quiet: request.quiet,
    };
    let body = tree::encode_document(&delete, "Delete", config)?;
    tracing::trace!(count = objects.len(), "rendered legacy delete list");
    input.body = Some(body.into());
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeletedInfo {
    pub key: Option<String>,
    pub version_id: Option<String>,
    pub delete_marker: Option<bool>,
    pub delete_marker_version_id: Option<String>,
}

static DELETED_INFO_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::xml("key", "Key", WireType::String),
    FieldDescriptor::xml("version_id", "VersionId", WireType::String),
    FieldDescriptor::xml("delete_marker", "DeleteMarker", WireType::Boolean),
    FieldDescriptor::xml("delete_marker_version_id", "DeleteMarkerVersionId", WireType::String),
];
static DELETED_INFO_ATTRIBUTES: AttributeMap = AttributeMap::new(&DELETED_INFO_FIELDS);

impl Model for DeletedInfo {
    fn attribute_map(&self) -> &'static AttributeMap {
        &DELETED_INFO_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Deleted")
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "key" => self.key.as_deref().map(FieldRef::String),
            "version_id" => self.version_id.as_deref().map(FieldRef::String),
            "delete_marker" => self.delete_marker.map(FieldRef::Boolean),
            "delete_marker_version_id" => {
                self.delete_marker_version_id.as_deref().map(FieldRef::String)
            }
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "key" => self.key = Some(value.into_string(name)?),
            "version_id" => self.version_id = Some(value.into_string(name)?),
            "delete_marker" => self.delete_marker = Some(value.into_bool(name)?),
            "delete_marker_version_id" => {
                self.delete_marker_version_id = Some(value.into_string(name)?)
            }
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DeleteMultipleObjectsResult {
    pub deleted_objects: Option<Vec<DeletedInfo>>,
    pub encoding_type: Option<String>,
    pub envelope: ResultEnvelope,
}

static DELETE_MULTIPLE_OBJECTS_RESULT_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::xml("deleted_objects", "Deleted", WireType::ModelList("DeletedInfo")),
    FieldDescriptor::xml("encoding_type", "EncodingType", WireType::String),
];
static DELETE_MULTIPLE_OBJECTS_RESULT_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&DELETE_MULTIPLE_OBJECTS_RESULT_FIELDS);
static DELETE_MULTIPLE_OBJECTS_RESULT_FACTORIES: [(&str, ModelFactory); 1] =
    [("DeletedInfo", factory::<DeletedInfo>)];
static DELETE_MULTIPLE_OBJECTS_RESULT_DEPENDENCIES: DependencyMap =
    DependencyMap::new(&DELETE_MULTIPLE_OBJECTS_RESULT_FACTORIES);

impl Model for DeleteMultipleObjectsResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &DELETE_MULTIPLE_OBJECTS_RESULT_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("DeleteResult")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&DELETE_MULTIPLE_OBJECTS_RESULT_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "deleted_objects" => self.deleted_objects.as_deref().map(FieldRef::list),
            "encoding_type" => self.encoding_type.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "deleted_objects" => self.deleted_objects = Some(value.into_list(name)?),
            "encoding_type" => self.encoding_type = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for DeleteMultipleObjectsResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}
