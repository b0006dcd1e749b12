use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::attributes::{
    Alias, AttributeMap, DependencyMap, FieldDescriptor, ModelFactory, Position, WireType,
    factory,
};
use crate::errors::CodecResult;
use crate::model::{Model, RequestExtras, RequestModel, ResultEnvelope, ResultModel};
use crate::value::{FieldRef, Value};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Owner {
    pub id: Option<String>,
}

static OWNER_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor::xml("id", "ID", WireType::String)];
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
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        if name == "id" {
            self.id = Some(value.into_string(name)?);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    pub key: Option<String>,
    pub size: Option<i64>,
    pub owner: Option<Owner>,
}

static ENTRY_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::xml("key", "Key", WireType::String).required(),
    FieldDescriptor::xml("size", "Size", WireType::Integer),
    FieldDescriptor::xml("owner", "Owner", WireType::Model("Owner")),
];
static ENTRY_ATTRIBUTES: AttributeMap = AttributeMap::new(&ENTRY_FIELDS);

impl Model for Entry {
    fn attribute_map(&self) -> &'static AttributeMap {
        &ENTRY_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Entry")
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "key" => self.key.as_deref().map(FieldRef::String),
            "size" => self.size.map(FieldRef::Integer),
            "owner" => self.owner.as_ref().map(FieldRef::model),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "key" => self.key = Some(value.into_string(name)?),
            "size" => self.size = Some(value.into_integer(name)?),
            "owner" => self.owner = Some(value.into_model(name)?),
            _ => {}
        }
        Ok(())
    }
}

/// A structured document with scalars, a nested list and a prefixed mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Listing {
    pub name: Option<String>,
    pub max_keys: Option<i64>,
    pub truncated: Option<bool>,
    pub entries: Option<Vec<Entry>>,
    pub tags: Option<BTreeMap<String, String>>,
}

static LISTING_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor::xml("name", "Name", WireType::String),
    FieldDescriptor::xml("max_keys", "MaxKeys", WireType::Integer),
    FieldDescriptor::xml("truncated", "IsTruncated", WireType::Boolean),
    FieldDescriptor::xml("entries", "Entry", WireType::ModelList("Entry")),
    FieldDescriptor::xml("tags", "Tag-", WireType::PrefixedMapping),
];
static LISTING_ATTRIBUTES: AttributeMap = AttributeMap::new(&LISTING_FIELDS);
static LISTING_FACTORIES: [(&str, ModelFactory); 2] = [
    ("Entry", factory::<Entry>),
    ("Owner", factory::<Owner>),
];
static LISTING_DEPENDENCIES: DependencyMap = DependencyMap::new(&LISTING_FACTORIES);

impl Model for Listing {
    fn attribute_map(&self) -> &'static AttributeMap {
        &LISTING_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Listing")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&LISTING_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "name" => self.name.as_deref().map(FieldRef::String),
            "max_keys" => self.max_keys.map(FieldRef::Integer),
            "truncated" => self.truncated.map(FieldRef::Boolean),
            "entries" => self.entries.as_deref().map(FieldRef::list),
            "tags" => self.tags.as_ref().map(FieldRef::Mapping),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "name" => self.name = Some(value.into_string(name)?),
            "max_keys" => self.max_keys = Some(value.into_integer(name)?),
            "truncated" => self.truncated = Some(value.into_bool(name)?),
            "entries" => self.entries = Some(value.into_list(name)?),
            "tags" => self.tags = Some(value.into_mapping(name)?),
            _ => {}
        }
        Ok(())
    }
}

/// A request touching every wire position.
#[derive(Debug, Default)]
pub struct SampleRequest {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub acl: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub expires: Option<DateTime<Utc>>,
    pub max_keys: Option<i64>,
    pub fetch_owner: Option<bool>,
    pub listing: Option<Listing>,
    pub body: Option<bytes::Bytes>,
    pub hint: Option<String>,
    pub extras: RequestExtras,
}

static SAMPLE_REQUEST_FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String).required(),
    FieldDescriptor::input("key", Position::Path, "key", WireType::String),
    FieldDescriptor::input("acl", Position::Header, "x-oss-object-acl", WireType::String),
    FieldDescriptor::input("metadata", Position::Header, "x-oss-meta-", WireType::PrefixedMapping),
    FieldDescriptor::input("expires", Position::Header, "Expires", WireType::DateTimeRfc1123),
    FieldDescriptor::input("max_keys", Position::Query, "max-keys", WireType::Integer),
    FieldDescriptor::input("fetch_owner", Position::Query, "fetch-owner", WireType::Boolean),
    FieldDescriptor::input("listing", Position::Body, "Listing", WireType::Model("Listing")),
    FieldDescriptor::input("body", Position::Body, "body", WireType::Blob),
    FieldDescriptor::input("hint", Position::Nop, "hint", WireType::String).required(),
];
static SAMPLE_REQUEST_ATTRIBUTES: AttributeMap =
    AttributeMap::new(&SAMPLE_REQUEST_FIELDS).with_aliases(&[Alias {
        legacy: "object_acl",
        canonical: "acl",
    }]);

impl Model for SampleRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &SAMPLE_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "key" => self.key.as_deref().map(FieldRef::String),
            "acl" => self.acl.as_deref().map(FieldRef::String),
            "metadata" => self.metadata.as_ref().map(FieldRef::Mapping),
            "expires" => self.expires.as_ref().map(FieldRef::DateTime),
            "max_keys" => self.max_keys.map(FieldRef::Integer),
            "fetch_owner" => self.fetch_owner.map(FieldRef::Boolean),
            "listing" => self.listing.as_ref().map(FieldRef::model),
            "body" => self.body.as_ref().map(FieldRef::Bytes),
            "hint" => self.hint.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "key" => self.key = Some(value.into_string(name)?),
            "acl" => self.acl = Some(value.into_string(name)?),
            "metadata" => self.metadata = Some(value.into_mapping(name)?),
            "expires" => self.expires = Some(value.into_datetime(name)?),
            "max_keys" => self.max_keys = Some(value.into_integer(name)?),
            "fetch_owner" => self.fetch_owner = Some(value.into_bool(name)?),
            "listing" => self.listing = Some(value.into_model(name)?),
            "body" => self.body = Some(value.into_bytes(name)?),
            "hint" => self.hint = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for SampleRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

/// A result with header-bound fields and a structured body.
#[derive(Debug, Default)]
pub struct SampleResult {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_length: Option<i64>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub name: Option<String>,
    pub entries: Option<Vec<Entry>>,
    pub envelope: ResultEnvelope,
}

static SAMPLE_RESULT_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::output("etag", Position::Header, "ETag", WireType::String),
    FieldDescriptor::output(
        "last_modified",
        Position::Header,
        "Last-Modified",
        WireType::DateTimeRfc1123,
    ),
    FieldDescriptor::output(
        "content_length",
        Position::Header,
        "Content-Length",
        WireType::Integer,
    ),
    FieldDescriptor::output("metadata", Position::Header, "x-oss-meta-", WireType::PrefixedMapping),
    FieldDescriptor::xml("name", "Name", WireType::String),
    FieldDescriptor::xml("entries", "Entry", WireType::ModelList("Entry")),
];
static SAMPLE_RESULT_ATTRIBUTES: AttributeMap = AttributeMap::new(&SAMPLE_RESULT_FIELDS);

impl Model for SampleResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &SAMPLE_RESULT_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Listing")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&LISTING_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "etag" => self.etag.as_deref().map(FieldRef::String),
            "last_modified" => self.last_modified.as_ref().map(FieldRef::DateTime),
            "content_length" => self.content_length.map(FieldRef::Integer),
            "metadata" => self.metadata.as_ref().map(FieldRef::Mapping),
            "name" => self.name.as_deref().map(FieldRef::String),
            "entries" => self.entries.as_deref().map(FieldRef::list),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "etag" => self.etag = Some(value.into_string(name)?),
            "last_modified" => self.last_modified = Some(value.into_datetime(name)?),
            "content_length" => self.content_length = Some(value.into_integer(name)?),
            "metadata" => self.metadata = Some(value.into_mapping(name)?),
            "name" => self.name = Some(value.into_string(name)?),
            "entries" => self.entries = Some(value.into_list(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for SampleResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Destination {
    pub bucket: Option<String>,
    pub prefix: Option<String>,
}

static DESTINATION_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::json("bucket", "Bucket", WireType::String).required(),
    FieldDescriptor::json("prefix", "Prefix", WireType::String),
];
static DESTINATION_ATTRIBUTES: AttributeMap = AttributeMap::new(&DESTINATION_FIELDS);

impl Model for Destination {
    fn attribute_map(&self) -> &'static AttributeMap {
        &DESTINATION_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "prefix" => self.prefix.as_deref().map(FieldRef::String),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "prefix" => self.prefix = Some(value.into_string(name)?),
            _ => {}
        }
        Ok(())
    }
}

/// A JSON document with native scalars, a nested list and an opaque member.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    pub id: Option<String>,
    pub enabled: Option<bool>,
    pub frequency: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    pub destinations: Option<Vec<Destination>>,
    pub extra: Option<serde_json::Value>,
}

static INVENTORY_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::json("id", "Id", WireType::String),
    FieldDescriptor::json("enabled", "IsEnabled", WireType::Boolean),
    FieldDescriptor::json("frequency", "Frequency", WireType::Integer),
    FieldDescriptor::json("created", "CreatedAt", WireType::DateTimeIso8601),
    FieldDescriptor::json("destinations", "Destinations", WireType::ModelList("Destination")),
    FieldDescriptor::json("extra", "Extra", WireType::OpaqueJson),
];
static INVENTORY_ATTRIBUTES: AttributeMap = AttributeMap::new(&INVENTORY_FIELDS);
static INVENTORY_FACTORIES: [(&str, ModelFactory); 2] = [
    ("Inventory", factory::<Inventory>),
    ("Destination", factory::<Destination>),
];
pub static INVENTORY_DEPENDENCIES: DependencyMap = DependencyMap::new(&INVENTORY_FACTORIES);

impl Model for Inventory {
    fn attribute_map(&self) -> &'static AttributeMap {
        &INVENTORY_ATTRIBUTES
    }

    fn document_name(&self) -> Option<&'static str> {
        Some("Inventory")
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&INVENTORY_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "id" => self.id.as_deref().map(FieldRef::String),
            "enabled" => self.enabled.map(FieldRef::Boolean),
            "frequency" => self.frequency.map(FieldRef::Integer),
            "created" => self.created.as_ref().map(FieldRef::DateTime),
            "destinations" => self.destinations.as_deref().map(FieldRef::list),
            "extra" => self.extra.as_ref().map(FieldRef::Json),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "id" => self.id = Some(value.into_string(name)?),
            "enabled" => self.enabled = Some(value.into_bool(name)?),
            "frequency" => self.frequency = Some(value.into_integer(name)?),
            "created" => self.created = Some(value.into_datetime(name)?),
            "destinations" => self.destinations = Some(value.into_list(name)?),
            "extra" => self.extra = Some(value.into_json(name)?),
            _ => {}
        }
        Ok(())
    }
}

/// A request whose body is a JSON document built from a nested model.
#[derive(Debug, Default)]
pub struct InventoryRequest {
    pub bucket: Option<String>,
    pub inventory: Option<Inventory>,
    pub extras: RequestExtras,
}

static INVENTORY_REQUEST_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::input("bucket", Position::Host, "bucket", WireType::String),
    FieldDescriptor::input("inventory", Position::Body, "Inventory", WireType::Model("Inventory")),
];
static INVENTORY_REQUEST_ATTRIBUTES: AttributeMap = AttributeMap::new(&INVENTORY_REQUEST_FIELDS);

impl Model for InventoryRequest {
    fn attribute_map(&self) -> &'static AttributeMap {
        &INVENTORY_REQUEST_ATTRIBUTES
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "bucket" => self.bucket.as_deref().map(FieldRef::String),
            "inventory" => self.inventory.as_ref().map(FieldRef::model),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        match name {
            "bucket" => self.bucket = Some(value.into_string(name)?),
            "inventory" => self.inventory = Some(value.into_model(name)?),
            _ => {}
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.extras.accept(name, value)
    }
}

impl RequestModel for InventoryRequest {
    fn extras(&self) -> &RequestExtras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut RequestExtras {
        &mut self.extras
    }
}

/// A result whose whole JSON body fills one nested model.
#[derive(Debug, Default)]
pub struct InventoryResult {
    pub inventory: Option<Inventory>,
    pub envelope: ResultEnvelope,
}

static INVENTORY_RESULT_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor::output(
    "inventory",
    Position::Body,
    "Inventory",
    WireType::Model("Inventory"),
)];
static INVENTORY_RESULT_ATTRIBUTES: AttributeMap = AttributeMap::new(&INVENTORY_RESULT_FIELDS);

impl Model for InventoryResult {
    fn attribute_map(&self) -> &'static AttributeMap {
        &INVENTORY_RESULT_ATTRIBUTES
    }

    fn dependency_map(&self) -> Option<&'static DependencyMap> {
        Some(&INVENTORY_DEPENDENCIES)
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "inventory" => self.inventory.as_ref().map(FieldRef::model),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> CodecResult<()> {
        if name == "inventory" {
            self.inventory = Some(value.into_model(name)?);
        }
        Ok(())
    }

    fn accept_extension(&mut self, name: &str, value: Value) -> CodecResult<bool> {
        self.envelope.accept(name, value)
    }
}

impl ResultModel for InventoryResult {
    fn envelope(&self) -> &ResultEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ResultEnvelope {
        &mut self.envelope
    }
}
