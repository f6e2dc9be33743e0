//! # Core Gemini API Primitives
//!
//! Building blocks shared by requests and responses.
//!
//! - [`Role`] - the speaker of a content block (User or Model)
//! - [`Part`] - a fragment of content: text or inline binary data
//! - [`Blob`] - base64 data with a MIME type
//! - [`Content`] - an ordered list of parts with an optional role
//! - [`Modality`] - output kinds the model may be asked to return
//! - [`Model`] - a model resource name

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};

/// Role of a message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from the user
    User,
    /// Message from the model
    Model,
}

/// Content part that can be included in a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content
    Text {
        /// The text content
        text: String,
        /// Whether this is a thought summary
        #[serde(skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },
    /// Inline binary content such as an image
    InlineData {
        /// The blob data
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// Any part shape this client does not model (function calls, file data, ...)
    Other(serde_json::Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into(), thought: None }
    }

    /// Inline data from raw bytes; the bytes are base64 encoded here.
    pub fn inline_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Part::InlineData { inline_data: Blob::new(mime_type, BASE64.encode(bytes)) }
    }
}

/// Blob for a message part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data
    pub mime_type: String,
    /// Base64 encoded data
    pub data: String,
}

impl Blob {
    /// Create a new blob with mime type and data
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), data: data.into() }
    }
}

/// Content of a message
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Parts of the content
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Role of the content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Content {
    /// Create a new text content
    pub fn text(text: impl Into<String>) -> Self {
        Self { parts: vec![Part::text(text)], role: None }
    }

    /// Create a new content with inline data (blob data)
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        let inline_data = Blob::new(mime_type, data);
        Self { parts: vec![Part::InlineData { inline_data }], role: None }
    }

    /// Add a role to this content
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Content modality type - specifies the format of model output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// Default value.
    ModalityUnspecified,
    /// Indicates the model should return text.
    Text,
    /// Indicates the model should return images.
    Image,
    /// Indicates the model should return audio.
    Audio,
    /// Unknown or future modality types
    #[serde(other)]
    Unknown,
}

/// A Gemini model resource name, e.g. `models/gemini-2.5-flash-image-preview`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Model(String);

impl Default for Model {
    fn default() -> Self {
        Self::GEMINI_2_5_FLASH_IMAGE_PREVIEW.into()
    }
}

impl Model {
    pub const GEMINI_2_5_FLASH_IMAGE_PREVIEW: &'static str = "models/gemini-2.5-flash-image-preview";
    pub const GEMINI_2_5_FLASH: &'static str = "models/gemini-2.5-flash";
    pub const IMAGEN_4_0_GENERATE: &'static str = "models/imagen-4.0-generate-001";

    pub fn new(model: impl Into<String>) -> Self {
        Self(model.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare model id without the `models/` prefix.
    pub fn id(&self) -> &str {
        self.0.strip_prefix("models/").unwrap_or(&self.0)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Self(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Self(model.to_string())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parts_deserialize_by_shape() {
        let parts: Vec<Part> = serde_json::from_value(json!([
            { "text": "Title: Spanish" },
            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
            { "functionCall": { "name": "noop", "args": {} } },
            { "text": "thinking", "thought": true, "thoughtSignature": "sig" }
        ]))
        .unwrap();

        assert_eq!(parts[0], Part::text("Title: Spanish"));
        assert!(matches!(
            &parts[1],
            Part::InlineData { inline_data } if inline_data.mime_type == "image/png"
        ));
        assert!(matches!(parts[2], Part::Other(_)));
        assert!(matches!(parts[3], Part::Text { thought: Some(true), .. }));
    }

    #[test]
    fn inline_bytes_are_base64_encoded() {
        let part = Part::inline_bytes("image/jpeg", &[0xff, 0xd8, 0xff]);
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value, json!({ "inlineData": { "mimeType": "image/jpeg", "data": "/9j/" } }));
    }

    #[test]
    fn model_id_strips_prefix() {
        assert_eq!(Model::default().id(), "gemini-2.5-flash-image-preview");
        assert_eq!(Model::new("imagen-4.0-generate-001").id(), "imagen-4.0-generate-001");
    }
}
