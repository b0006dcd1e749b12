//! Static per-model field metadata.
//!
//! Every model type owns one [`AttributeMap`] describing, for each field, which
//! wire tag it belongs to, where on the wire it travels, under which name, and
//! how its value is coerced. Maps are `const`-constructed and live in
//! `static`s, so they are shared read-only across every call and thread.

use std::fmt;

use crate::model::Model;

/// Which side of an exchange a field participates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Serialized from a request model.
    Input,
    /// Deserialized into a result model.
    Output,
    /// An element inside a structured XML body.
    Xml,
    /// A member of a JSON body.
    Json,
}

/// Where a field's value travels in the HTTP exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Host,
    Path,
    Header,
    Query,
    Body,
    /// Never written directly; reserved for hooks.
    Nop,
}

/// Semantic type driving coercion between model values and wire text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireType {
    String,
    Integer,
    Boolean,
    DateTimeRfc1123,
    DateTimeIso8601,
    /// One header or element per entry, named `{wire_name}{key}`.
    PrefixedMapping,
    OpaqueJson,
    Blob,
    /// A nested model, resolved through a [`DependencyMap`] by type name.
    Model(&'static str),
    /// A homogeneous list of nested models.
    ModelList(&'static str),
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::String => write!(f, "string"),
            WireType::Integer => write!(f, "integer"),
            WireType::Boolean => write!(f, "boolean"),
            WireType::DateTimeRfc1123 => write!(f, "datetime:rfc1123"),
            WireType::DateTimeIso8601 => write!(f, "datetime:iso8601"),
            WireType::PrefixedMapping => write!(f, "prefixedMapping"),
            WireType::OpaqueJson => write!(f, "opaqueJsonMapping"),
            WireType::Blob => write!(f, "blob"),
            WireType::Model(name) => write!(f, "model({name})"),
            WireType::ModelList(name) => write!(f, "list(model({name}))"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub tag: Tag,
    pub position: Position,
    pub wire_name: &'static str,
    pub wire_type: WireType,
    pub required: bool,
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        tag: Tag,
        position: Position,
        wire_name: &'static str,
        wire_type: WireType,
    ) -> Self {
        Self {
            name,
            tag,
            position,
            wire_name,
            wire_type,
            required: false,
        }
    }

    pub const fn input(
        name: &'static str,
        position: Position,
        wire_name: &'static str,
        wire_type: WireType,
    ) -> Self {
        Self::new(name, Tag::Input, position, wire_name, wire_type)
    }

    pub const fn output(
        name: &'static str,
        position: Position,
        wire_name: &'static str,
        wire_type: WireType,
    ) -> Self {
        Self::new(name, Tag::Output, position, wire_name, wire_type)
    }

    /// An element of a structured XML body.
    pub const fn xml(name: &'static str, wire_name: &'static str, wire_type: WireType) -> Self {
        Self::new(name, Tag::Xml, Position::Body, wire_name, wire_type)
    }

    /// A member of a JSON object body.
    pub const fn json(name: &'static str, wire_name: &'static str, wire_type: WireType) -> Self {
        Self::new(name, Tag::Json, Position::Body, wire_name, wire_type)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Host and path fields address the resource and are always required.
    pub fn is_required(&self) -> bool {
        self.required || matches!(self.position, Position::Host | Position::Path)
    }
}

/// A legacy input name that resolves to a canonical field at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alias {
    pub legacy: &'static str,
    pub canonical: &'static str,
}

#[derive(Debug)]
pub struct AttributeMap {
    fields: &'static [FieldDescriptor],
    aliases: &'static [Alias],
}

impl AttributeMap {
    pub const fn new(fields: &'static [FieldDescriptor]) -> Self {
        Self {
            fields,
            aliases: &[],
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [Alias]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter()
    }

    pub fn with_tag(&self, tag: Tag) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(move |field| field.tag == tag)
    }

    pub fn aliases(&self) -> &'static [Alias] {
        self.aliases
    }
}

/// Builds an empty nested model instance.
pub type ModelFactory = fn() -> Box<dyn Model>;

/// Factory table used to materialize nested models while decoding.
#[derive(Debug)]
pub struct DependencyMap {
    entries: &'static [(&'static str, ModelFactory)],
}

impl DependencyMap {
    pub const fn new(entries: &'static [(&'static str, ModelFactory)]) -> Self {
        Self { entries }
    }

    pub fn create(&self, type_name: &str) -> Option<Box<dyn Model>> {
        self.entries
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, factory)| factory())
    }
}

/// Default-constructing factory usable in `const` dependency tables.
pub fn factory<T: Model + Default>() -> Box<dyn Model> {
    Box::new(T::default())
}

/// The dependency maps visible while decoding one nested element; inner
/// maps shadow outer ones.
#[derive(Debug, Default)]
pub struct DependencyScope {
    maps: Vec<&'static DependencyMap>,
}

impl DependencyScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: Option<&'static DependencyMap>) -> bool {
        match map {
            Some(map) => {
                self.maps.push(map);
                true
            }
            None => false,
        }
    }

    pub fn pop(&mut self) {
        self.maps.pop();
    }

    pub fn create(&self, type_name: &str) -> Option<Box<dyn Model>> {
        self.maps
            .iter()
            .rev()
            .find_map(|map| map.create(type_name))
    }
}
