use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use oss_codec::{
    Alias, AttributeMap, CodecResult, FieldDescriptor, FieldRef, Model, Position, RequestExtras,
    RequestModel, ResultEnvelope, ResultModel, Value, WireType,
};

/// Prefix of user metadata headers.
pub const METADATA_PREFIX: &str = "x-oss-meta-";

/// Uploads an object.
#[derive(Debug, Default)]
pub struct PutObjectRequest {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub acl: Option<String>,
    pub storage_class: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<i64>,
    pub expires: Option<DateTime<Utc>>,
    pub forbid_overwrite: Option<bool>,
    pub tagging: Option<String>,
    pub traffic_limit: Option<i64>,
    pub body: Option<Bytes>,
    pub extras: RequestExtras,
}

static PUT_OBJECT_REQUEST_FIELDS: [FieldDescriptor; 13] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String),
    FieldDescriptor::input("key", Position::Path, "key", WireType::String),
    FieldDescriptor::input("acl", Position::Header, "x-oss-object-acl", WireType::String),
    FieldDescriptor::input(
        "storage_class",
        Position::Header,
        "x-oss-storage-class",
        WireType::String,
    ),
    FieldDescriptor::input(
        "metadata",
        Position::Header,
        METADATA_PREFIX,
        WireType::PrefixedMapping,
    ),
    FieldDescriptor::input("cache_control", Position::Header, "Cache-Control", WireType::String),
    FieldDescriptor::input("content_type", Position::Header, "Content-Type", WireType::String),
    FieldDescriptor::input("content_length", Position::Header, "Content-Length", WireType::Integer),
    FieldDescriptor::input("expires", Position::Header, "Expires", WireType::DateTimeRfc1123),
    FieldDescriptor::input(
        "forbid_overwrite",
        Position::Header,
        "x-oss-forbid-overwrite",
        WireType::Boolean,
    ),
    FieldDescriptor::input("tagging", Position::Header, "x-oss-tagging", WireType::String),
    FieldDescriptor::input(
        "traffic_limit",
        Position::Header,
        "x-oss-traffic-limit",
        WireType::Integer,
    ),
    FieldDescriptor::input("body", Position::Body, "body", WireType::Blob),
];

static PUT_OBJECT_REQUEST_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&PUT_OBJECT_REQUEST_FIELDS).with_aliases(&[Alias {
        legacy: "forbid_override",
        canonical: "forbid_overwrite",
    }]);

impl Model for PutObjectRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &PUT_OBJECT_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "key" => self.key.as_deref().map(FieldRef::String),
            "acl" => self.acl.as_deref().map(FieldRef::String),
            "storage_class" => self.storage_class.as_deref().map(FieldRef::String),
            "metadata" => self.metadata.as_ref().map(FieldRef::Mapping),
            "cache_control" => self.cache_control.as_deref().map(FieldRef::String),
            "content_type" => self.content_type.as_deref().map(FieldRef::String),
            "content_length" => self.content_length.map(FieldRef::Integer),
            "expires" => self.expires.as_ref().map(FieldRef::DateTime),
            "forbid_overwrite" => self.forbid_overwrite.map(FieldRef::Boolean),
            "tagging" => self.tagging.as_deref().map(FieldRef::String),
            "traffic_limit" => self.traffic_limit.map(FieldRef::Integer),
            "body" => self.body.as_ref().map(FieldRef::Bytes),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "key" => self.key = Some(value.into_string(name)?),
            "acl" => self.acl = Some(value.into_string(name)?),
            "storage_class" => self.storage_class = Some(value.into_string(name)?),
            "metadata" => self.metadata = Some(value.into_mapping(name)?),
            "cache_control" => self.cache_control = Some(value.into_string(name)?),
            "content_type" => self.content_type = Some(value.into_string(name)?),
            "content_length" => self.content_length = Some(value.into_integer(name)?),
            "expires" => self.expires = Some(value.into_datetime(name)?),
            "forbid_overwrite" => self.forbid_overwrite = Some(value.into_bool(name)?),
            "tagging" => self.tagging = Some(value.into_string(name)?),
            "traffic_limit" => self.traffic_limit = Some(value.into_integer(name)?),
            "body" => self.body = Some(value.into_bytes(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for PutObjectRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

#[derive(Debug, Default)]
pub struct PutObjectResult {
    pub etag: Option<String>,
    pub content_md5: Option<String>,
    pub hash_crc64: Option<String>,
    pub version_id: Option<String>,
    pub envelope: ResultEnvelope,
}

static PUT_OBJECT_RESULT_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::output("etag", Position::Header, "ETag", WireType::String),
    FieldDescriptor::output("content_md5", Position::Header, "Content-MD5", WireType::String),
    FieldDescriptor::output(
        "hash_crc64",
        Position::Header,
        "x-oss-hash-crc64ecma",
        WireType::String,
    ),
    FieldDescriptor::output("version_id", Position::Header, "x-oss-version-id", WireType::String),
];

static PUT_OBJECT_RESULT_ATTRIBUTES: AttributeMap = AttributeMap::new(&PUT_OBJECT_RESULT_FIELDS);

impl Model for PutObjectResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &PUT_OBJECT_RESULT_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "etag" => self.etag.as_deref().map(FieldRef::String),
            "content_md5" => self.content_md5.as_deref().map(FieldRef::String),
            "hash_crc64" => self.hash_crc64.as_deref().map(FieldRef::String),
            "version_id" => self.version_id.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "etag" => self.etag = Some(value.into_string(name)?),
            "content_md5" => self.content_md5 = Some(value.into_string(name)?),
            "hash_crc64" => self.hash_crc64 = Some(value.into_string(name)?),
            "version_id" => self.version_id = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for PutObjectResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}

/// Fetches object metadata without the body. Also the shape of a
/// `GetObject` request.
#[derive(Debug, Default)]
pub struct HeadObjectRequest {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub version_id: Option<String>,
    pub range: Option<String>,
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_unmodified_since: Option<DateTime<Utc>>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub extras: RequestExtras,
}

pub type GetObjectRequest = HeadObjectRequest;

static HEAD_OBJECT_REQUEST_FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String),
    FieldDescriptor::input("key", Position::Path, "key", WireType::String),
    FieldDescriptor::input("version_id", Position::Query, "versionId", WireType::String),
    FieldDescriptor::input("range", Position::Header, "Range", WireType::String),
    FieldDescriptor::input(
        "if_modified_since",
        Position::Header,
        "If-Modified-Since",
        WireType::DateTimeRfc1123,
    ),
    FieldDescriptor::input(
        "if_unmodified_since",
        Position::Header,
        "If-Unmodified-Since",
        WireType::DateTimeRfc1123,
    ),
    FieldDescriptor::input("if_match", Position::Header, "If-Match", WireType::String),
    FieldDescriptor::input("if_none_match", Position::Header, "If-None-Match", WireType::String),
];

static HEAD_OBJECT_REQUEST_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&HEAD_OBJECT_REQUEST_FIELDS);

impl Model for HeadObjectRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &HEAD_OBJECT_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "key" => self.key.as_deref().map(FieldRef::String),
            "version_id" => self.version_id.as_deref().map(FieldRef::String),
            "range" => self.range.as_deref().map(FieldRef::String),
            "if_modified_since" => self.if_modified_since.as_ref().map(FieldRef::DateTime),
            "if_unmodified_since" => self.if_unmodified_since.as_ref().map(FieldRef::DateTime),
            "if_match" => self.if_match.as_deref().map(FieldRef::String),
            "if_none_match" => self.if_none_match.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "key" => self.key = Some(value.into_string(name)?),
            "version_id" => self.version_id = Some(value.into_string(name)?),
            "range" => self.range = Some(value.into_string(name)?),
            "if_modified_since" => self.if_modified_since = Some(value.into_datetime(name)?),
            "if_unmodified_since" => self.if_unmodified_since = Some(value.into_datetime(name)?),
            "if_match" => self.if_match = Some(value.into_string(name)?),
            "if_none_match" => self.if_none_match = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for HeadObjectRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

/// Object metadata as returned in response headers. `GetObject` results
/// carry the same headers plus the object body.
#[derive(Debug, Default)]
pub struct ObjectResult {
    pub content_length: Option<i64>,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub object_type: Option<String>,
    pub storage_class: Option<String>,
    pub version_id: Option<String>,
    pub delete_marker: Option<bool>,
    pub tagging_count: Option<i64>,
    pub body: Option<Bytes>,
    pub envelope: ResultEnvelope,
}

pub type HeadObjectResult = ObjectResult;
pub type GetObjectResult = ObjectResult;

static OBJECT_RESULT_FIELDS: [FieldDescriptor; 11] = [
    FieldDescriptor::output(
        "content_length",
        Position::Header,
        "Content-Length",
        WireType::Integer,
    ),
    FieldDescriptor::output("content_type", Position::Header, "Content-Type", WireType::String),
    FieldDescriptor::output("etag", Position::Header, "ETag", WireType::String),
    FieldDescriptor::output(
        "last_modified",
        Position::Header,
        "Last-Modified",
        WireType::DateTimeRfc1123,
    ),
    FieldDescriptor::output(
        "metadata",
        Position::Header,
        METADATA_PREFIX,
        WireType::PrefixedMapping,
    ),
    FieldDescriptor::output("object_type", Position::Header, "x-oss-object-type", WireType::String),
    FieldDescriptor::output(
        "storage_class",
        Position::Header,
        "x-oss-storage-class",
        WireType::String,
    ),
    FieldDescriptor::output("version_id", Position::Header, "x-oss-version-id", WireType::String),
    FieldDescriptor::output(
        "delete_marker",
        Position::Header,
        "x-oss-delete-marker",
        WireType::Boolean,
    ),
    FieldDescriptor::output(
        "tagging_count",
        Position::Header,
        "x-oss-tagging-count",
        WireType::Integer,
    ),
    FieldDescriptor::output("body", Position::Body, "body", WireType::Blob),
];

static OBJECT_RESULT_ATTRIBUTES: AttributeMap = AttributeMap::new(&OBJECT_RESULT_FIELDS);

impl Model for ObjectResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &OBJECT_RESULT_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "content_length" => self.content_length.map(FieldRef::Integer),
            "content_type" => self.content_type.as_deref().map(FieldRef::String),
            "etag" => self.etag.as_deref().map(FieldRef::String),
            "last_modified" => self.last_modified.as_ref().map(FieldRef::DateTime),
            "metadata" => self.metadata.as_ref().map(FieldRef::Mapping),
            "object_type" => self.object_type.as_deref().map(FieldRef::String),
            "storage_class" => self.storage_class.as_deref().map(FieldRef::String),
            "version_id" => self.version_id.as_deref().map(FieldRef::String),
            "delete_marker" => self.delete_marker.map(FieldRef::Boolean),
            "tagging_count" => self.tagging_count.map(FieldRef::Integer),
            "body" => self.body.as_ref().map(FieldRef::Bytes),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "content_length" => self.content_length = Some(value.into_integer(name)?),
            "content_type" => self.content_type = Some(value.into_string(name)?),
            "etag" => self.etag = Some(value.into_string(name)?),
            "last_modified" => self.last_modified = Some(value.into_datetime(name)?),
            "metadata" => self.metadata = Some(value.into_mapping(name)?),
            "object_type" => self.object_type = Some(value.into_string(name)?),
            "storage_class" => self.storage_class = Some(value.into_string(name)?),
            "version_id" => self.version_id = Some(value.into_string(name)?),
            "delete_marker" => self.delete_marker = Some(value.into_bool(name)?),
            "tagging_count" => self.tagging_count = Some(value.into_integer(name)?),
            "body" => self.body = Some(value.into_bytes(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for ObjectResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}
