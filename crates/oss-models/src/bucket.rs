use chrono::{DateTime, Utc};
use oss_codec::{
    AttributeMap, CodecResult, DependencyMap, FieldDescriptor, FieldRef, Model, ModelFactory,
    Position, RequestExtras, RequestModel, ResultEnvelope, ResultModel, Value, WireType, factory,
};

/// Lists objects in a bucket (version 2 listing).
#[derive(Debug, Default)]
pub struct ListObjectsV2Request {
    pub bucket: Option<String>,
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    pub start_after: Option<String>,
    pub continuation_token: Option<String>,
    pub max_keys: Option<i64>,
    pub encoding_type: Option<String>,
    pub fetch_owner: Option<bool>,
    pub extras: RequestExtras,
}

static LIST_OBJECTS_V2_REQUEST_FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String),
    FieldDescriptor::input("prefix", Position::Query, "prefix", WireType::String),
    FieldDescriptor::input("delimiter", Position::Query, "delimiter", WireType::String),
    FieldDescriptor::input("start_after", Position::Query, "start-after", WireType::String),
    FieldDescriptor::input(
        "continuation_token",
        Position::Query,
        "continuation-token",
        WireType::String,
    ),
    FieldDescriptor::input("max_keys", Position::Query, "max-keys", WireType::Integer),
    FieldDescriptor::input("encoding_type", Position::Query, "encoding-type", WireType::String),
    FieldDescriptor::input("fetch_owner", Position::Query, "fetch-owner", WireType::Boolean),
];
static LIST_OBJECTS_V2_REQUEST_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&LIST_OBJECTS_V2_REQUEST_FIELDS);

impl Model for ListObjectsV2Request {
    fn attribute_map(&self) -> &'static AttributeMap {
        &LIST_OBJECTS_V2_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "prefix" => self.prefix.as_deref().map(FieldRef::String),
            "delimiter" => self.delimiter.as_deref().map(FieldRef::String),
            "start_after" => self.start_after.as_deref().map(FieldRef::String),
            "continuation_token" => self.continuation_token.as_deref().map(FieldRef::String),
            "max_keys" => self.max_keys.map(FieldRef::Integer),
            "encoding_type" => self.encoding_type.as_deref().map(FieldRef::String),
            "fetch_owner" => self.fetch_owner.map(FieldRef::Boolean),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "prefix" => self.prefix = Some(value.into_string(name)?),
            "delimiter" => self.delimiter = Some(value.into_string(name)?),
            "start_after" => self.start_after = Some(value.into_string(name)?),
            "continuation_token" => self.continuation_token = Some(value.into_string(name)?),
            "max_keys" => self.max_keys = Some(value.into_integer(name)?),
            "encoding_type" => self.encoding_type = Some(value.into_string(name)?),
            "fetch_owner" => self.fetch_owner = Some(value.into_bool(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for ListObjectsV2Request {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Owner {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

static OWNER_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::xml("id", "ID", WireType::String),
    FieldDescriptor::xml("display_name", "DisplayName", WireType::String),
];
static OWNER_ATTRIBUTES: AttributeMap = AttributeMap::new(&OWNER_FIELDS);

impl Model for Owner {
    fn attribute_map(&self) -> &'static AttributeMap {
        &OWNER_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Owner")
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "id" => self.id.as_deref().map(FieldRef::String),
            "display_name" => self.display_name.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "id" => self.id = Some(value.into_string(name)?),
            "display_name" => self.display_name = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }
}

/// One `<Contents>` entry of a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectProperties {
    pub key: Option<String>,
    pub object_type: Option<String>,
    pub size: Option<i64>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub storage_class: Option<String>,
    pub owner: Option<Owner>,
    pub restore_info: Option<String>,
}

static OBJECT_PROPERTIES_FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor::xml("key", "Key", WireType::String),
    FieldDescriptor::xml("object_type", "Type", WireType::String),
    FieldDescriptor::xml("size", "Size", WireType::Integer),
    FieldDescriptor::xml("etag", "ETag", WireType::String),
    FieldDescriptor::xml("last_modified", "LastModified", WireType::DateTimeIso8601),
    FieldDescriptor::xml("storage_class", "StorageClass", WireType::String),
    FieldDescriptor::xml("owner", "Owner", WireType::Model("Owner")),
    FieldDescriptor::xml("restore_info", "RestoreInfo", WireType::String),
];
static OBJECT_PROPERTIES_ATTRIBUTES: AttributeMap = AttributeMap::new(&OBJECT_PROPERTIES_FIELDS);
static OBJECT_PROPERTIES_FACTORIES: [(&str, ModelFactory); 1] = [("Owner", factory::<Owner>)];
static OBJECT_PROPERTIES_DEPENDENCIES: DependencyMap =
    DependencyMap::new(&OBJECT_PROPERTIES_FACTORIES);

impl Model for ObjectProperties {
    fn attribute_map(&self) -> &'static AttributeMap {
        &OBJECT_PROPERTIES_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Contents")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&OBJECT_PROPERTIES_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "key" => self.key.as_deref().map(FieldRef::String),
            "object_type" => self.object_type.as_deref().map(FieldRef::String),
            "size" => self.size.map(FieldRef::Integer),
            "etag" => self.etag.as_deref().map(FieldRef::String),
            "last_modified" => self.last_modified.as_ref().map(FieldRef::DateTime),
            "storage_class" => self.storage_class.as_deref().map(FieldRef::String),
            "owner" => self.owner.as_ref().map(FieldRef::model),
            "restore_info" => self.restore_info.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "key" => self.key = Some(value.into_string(name)?),
            "object_type" => self.object_type = Some(value.into_string(name)?),
            "size" => self.size = Some(value.into_integer(name)?),
            "etag" => self.etag = Some(value.into_string(name)?),
            "last_modified" => self.last_modified = Some(value.into_datetime(name)?),
            "storage_class" => self.storage_class = Some(value.into_string(name)?),
            "owner" => self.owner = Some(value.into_model(name)?),
            "restore_info" => self.restore_info = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommonPrefix {
    pub prefix: Option<String>,
}

static COMMON_PREFIX_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::xml("prefix", "Prefix", WireType::String)];
static COMMON_PREFIX_ATTRIBUTES: AttributeMap = AttributeMap::new(&COMMON_PREFIX_FIELDS);

impl Model for CommonPrefix {
    fn attribute_map(&self) -> &'static AttributeMap {
        &COMMON_PREFIX_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("CommonPrefixes")
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "prefix" => self.prefix.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        if name == "prefix" {
            self.prefix = Some(value.into_string(name)?);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ListObjectsV2Result {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub start_after: Option<String>,
    pub max_keys: Option<i64>,
    pub delimiter: Option<String>,
    pub is_truncated: Option<bool>,
    pub key_count: Option<i64>,
    pub continuation_token: Option<String>,
    pub next_continuation_token: Option<String>,
    pub encoding_type: Option<String>,
    pub contents: Option<Vec<ObjectProperties>>,
    pub common_prefixes: Option<Vec<CommonPrefix>>,
    pub envelope: ResultEnvelope,
}

static LIST_OBJECTS_V2_RESULT_FIELDS: [FieldDescriptor; 12] = [
    FieldDescriptor::xml("name", "Name", WireType::String),
    FieldDescriptor::xml("prefix", "Prefix", WireType::String),
    FieldDescriptor::xml("start_after", "StartAfter", WireType::String),
    FieldDescriptor::xml("max_keys", "MaxKeys", WireType::Integer),
    FieldDescriptor::xml("delimiter", "Delimiter", WireType::String),
    FieldDescriptor::xml("is_truncated", "IsTruncated", WireType::Boolean),
    FieldDescriptor::xml("key_count", "KeyCount", WireType::Integer),
    FieldDescriptor::xml("continuation_token", "ContinuationToken", WireType::String),
    FieldDescriptor::xml("next_continuation_token", "NextContinuationToken", WireType::String),
    FieldDescriptor::xml("encoding_type", "EncodingType", WireType::String),
    FieldDescriptor::xml("contents", "Contents", WireType::ModelList("ObjectProperties")),
    FieldDescriptor::xml("common_prefixes", "CommonPrefixes", WireType::ModelList("CommonPrefix")),
];
static LIST_OBJECTS_V2_RESULT_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&LIST_OBJECTS_V2_RESULT_FIELDS);
static LIST_OBJECTS_V2_RESULT_FACTORIES: [(&str, ModelFactory); 2] = [
    ("ObjectProperties", factory::<ObjectProperties>),
    ("CommonPrefix", factory::<CommonPrefix>),
];
static LIST_OBJECTS_V2_RESULT_DEPENDENCIES: DependencyMap =
    DependencyMap::new(&LIST_OBJECTS_V2_RESULT_FACTORIES);

impl Model for ListObjectsV2Result {
    fn attribute_map(&self) -> &'static AttributeMap {
        &LIST_OBJECTS_V2_RESULT_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("ListBucketResult")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&LIST_OBJECTS_V2_RESULT_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "name" => self.name.as_deref().map(FieldRef::String),
            "prefix" => self.prefix.as_deref().map(FieldRef::String),
            "start_after" => self.start_after.as_deref().map(FieldRef::String),
            "max_keys" => self.max_keys.map(FieldRef::Integer),
            "delimiter" => self.delimiter.as_deref().map(FieldRef::String),
            "is_truncated" => self.is_truncated.map(FieldRef::Boolean),
            "key_count" => self.key_count.map(FieldRef::Integer),
            "continuation_token" => self.continuation_token.as_deref().map(FieldRef::String),
            "next_continuation_token" => {
                self.next_continuation_token.as_deref().map(FieldRef::String)
            }
            "encoding_type" => self.encoding_type.as_deref().map(FieldRef::String),
            "contents" => self.contents.as_deref().map(FieldRef::list),
            "common_prefixes" => self.common_prefixes.as_deref().map(FieldRef::list),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "name" => self.name = Some(value.into_string(name)?),
            "prefix" => self.prefix = Some(value.into_string(name)?),
            "start_after" => self.start_after = Some(value.into_string(name)?),
            "max_keys" => self.max_keys = Some(value.into_integer(name)?),
            "delimiter" => self.delimiter = Some(value.into_string(name)?),
            "is_truncated" => self.is_truncated = Some(value.into_bool(name)?),
            "key_count" => self.key_count = Some(value.into_integer(name)?),
            "continuation_token" => self.continuation_token = Some(value.into_string(name)?),
            "next_continuation_token" => {
                self.next_continuation_token = Some(value.into_string(name)?)
            }
            "encoding_type" => self.encoding_type = Some(value.into_string(name)?),
            "contents" => self.contents = Some(value.into_list(name)?),
            "common_prefixes" => self.common_prefixes = Some(value.into_list(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for ListObjectsV2Result {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}

/// Sets the bucket policy, a JSON document passed through untouched.
#[derive(Debug, Default)]
pub struct PutBucketPolicyRequest {
    pub bucket: Option<String>,
    pub policy: Option<serde_json::Value>,
    pub extras: RequestExtras,
}

static PUT_BUCKET_POLICY_REQUEST_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String),
    FieldDescriptor::input("policy", Position::Body, "policy", WireType::OpaqueJson).required(),
];
static PUT_BUCKET_POLICY_REQUEST_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&PUT_BUCKET_POLICY_REQUEST_FIELDS);

impl Model for PutBucketPolicyRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &PUT_BUCKET_POLICY_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "policy" => self.policy.as_ref().map(FieldRef::Json),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "policy" => self.policy = Some(value.into_json(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for PutBucketPolicyRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

/// Addresses a bucket and nothing else. Used by operations whose request
/// carries no fields of its own, e.g. `GetBucketPolicy`.
#[derive(Debug, Default)]
pub struct BucketRequest {
    pub bucket: Option<String>,
    pub extras: RequestExtras,
}

pub type GetBucketPolicyRequest = BucketRequest;

static BUCKET_REQUEST_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String)];
static BUCKET_REQUEST_ATTRIBUTES: AttributeMap = AttributeMap::new(&BUCKET_REQUEST_FIELDS);

impl Model for BucketRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &BUCKET_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        if name == "bucket" {
            self.bucket = Some(value.into_string(name)?);
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for BucketRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

/// A result carrying only the response envelope.
#[derive(Debug, Default)]
pub struct EmptyResult {
    pub envelope: ResultEnvelope,
}

pub type PutBucketPolicyResult = EmptyResult;

static EMPTY_RESULT_FIELDS: [FieldDescriptor; 0] = [];
static EMPTY_RESULT_ATTRIBUTES: AttributeMap = AttributeMap::new(&EMPTY_RESULT_FIELDS);

impl Model for EmptyResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &EMPTY_RESULT_ATTRIBUTES
    }

    fn field(&self, _name: &str) -> Option<FieldRef<'_>> {
        None
    }

    fn set_field(&mut self, _name: &str, _value: Value) -> CodecResult<()> {
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for EmptyResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}

#[derive(Debug, Default)]
pub struct GetBucketPolicyResult {
    pub policy: Option<serde_json::Value>,
    pub envelope: ResultEnvelope,
}

static GET_BUCKET_POLICY_RESULT_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor::output(
    "policy",
    Position::Body,
    "policy",
    WireType::OpaqueJson,
)];
static GET_BUCKET_POLICY_RESULT_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&GET_BUCKET_POLICY_RESULT_FIELDS);

impl Model for GetBucketPolicyResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &GET_BUCKET_POLICY_RESULT_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "policy" => self.policy.as_ref().map(FieldRef::Json),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        if name == "policy" {
            self.policy = Some(value.into_json(name)?);
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for GetBucketPolicyResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}
