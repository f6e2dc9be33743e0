//! `generateContent`: prompt plus inline images in, ordered parts out.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::GeminiClient;
use crate::error::Error;
use crate::models::{Content, Modality, Model, Part, Role};

/// Generation parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output kinds the model may return
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub response_modalities: Vec<Modality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Why the model stopped producing a candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    FinishReasonUnspecified,
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    ProhibitedContent,
    ImageSafety,
    NoImage,
    #[serde(other)]
    Other,
}

/// A single response candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
    #[serde(default)]
    pub index: Option<u32>,
}

/// Feedback on the prompt itself, present when the prompt was blocked
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Token accounting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

/// Response body of `generateContent`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl GenerationResponse {
    /// Parts of the first candidate, or an empty slice when the model returned nothing.
    pub fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Number of inline-data parts in the first candidate.
    pub fn image_count(&self) -> usize {
        self.parts().iter().filter(|p| matches!(p, Part::InlineData { .. })).count()
    }

    pub fn finish_reason(&self) -> Option<&FinishReason> {
        self.candidates.first().and_then(|c| c.finish_reason.as_ref())
    }
}

/// Fluent builder for a single `generateContent` call.
///
/// ```rust,ignore
/// let response = client
///     .generate_content()
///     .with_inline_data("image/png", poster_base64)
///     .with_text("Place this poster on a billboard.")
///     .with_response_modalities(vec![Modality::Image, Modality::Text])
///     .execute()
///     .await?;
/// ```
pub struct ContentBuilder {
    client: GeminiClient,
    model: Model,
    parts: Vec<Part>,
    generation_config: Option<GenerationConfig>,
}

impl ContentBuilder {
    pub(crate) fn new(client: GeminiClient, model: Model) -> Self {
        Self { client, model, parts: Vec::new(), generation_config: None }
    }

    /// Override the model for this call.
    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    /// Append a text part.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::text(text));
        self
    }

    /// Append an already-encoded inline data part.
    pub fn with_inline_data(
        mut self,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        self.parts.push(Part::InlineData { inline_data: crate::Blob::new(mime_type, data) });
        self
    }

    /// Append an arbitrary part.
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_response_modalities(mut self, modalities: Vec<Modality>) -> Self {
        let config = self.generation_config.get_or_insert_with(Default::default);
        config.response_modalities = modalities;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.generation_config.get_or_insert_with(Default::default).temperature = Some(temperature);
        self
    }

    /// The request this builder would send.
    pub fn build(self) -> (Model, GenerateContentRequest) {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: self.parts, role: Some(Role::User) }],
            generation_config: self.generation_config,
        };
        (self.model, request)
    }

    #[instrument(skip_all, fields(model = %self.model, parts.count = self.parts.len()))]
    pub async fn execute(self) -> Result<GenerationResponse, Error> {
        let client = self.client.clone();
        let (model, request) = self.build();
        client.generate_content_raw(&model, &request).await
    }
}
