use serde::{Deserialize, Serialize};

/// Header carrying the server-assigned request id.
pub const DEFAULT_REQUEST_ID_HEADER: &str = "x-oss-request-id";

/// Knobs shared by the serializer and deserializer. Missing keys fall back
/// to their defaults when loaded from a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Response header copied into `ResultEnvelope::request_id`.
    pub request_id_header: String,
    /// Prefix rendered XML bodies with an XML declaration.
    pub xml_declaration: bool,
    /// Reject structured result bodies whose root element differs from the
    /// result's document name.
    pub strict_root: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            request_id_header: DEFAULT_REQUEST_ID_HEADER.to_string(),
            xml_declaration: true,
            strict_root: true,
        }
    }
}

impl CodecConfig {
    pub fn with_request_id_header(mut self, header: impl Into<String>) -> Self {
        self.request_id_header = header.into();
        self
    }

    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    pub fn with_strict_root(mut self, enabled: bool) -> Self {
        self.strict_root = enabled;
        self
    }
}
