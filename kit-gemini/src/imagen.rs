//! Imagen text-to-image synthesis via `models/{model}:predict`.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::GeminiClient;
use crate::error::Error;
use crate::models::Model;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationParameters {
    pub sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_options: Option<OutputOptions>,
}

impl Default for ImageGenerationParameters {
    fn default() -> Self {
        Self { sample_count: 1, aspect_ratio: None, output_options: None }
    }
}

/// Request body for `predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: ImageGenerationParameters,
}

/// One synthesized image
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Set instead of image bytes when the image was filtered
    #[serde(default)]
    pub rai_filtered_reason: Option<String>,
}

impl Prediction {
    /// Decoded image bytes, if this prediction carries any.
    pub fn image_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        self.bytes_base64_encoded.as_deref().map(|data| BASE64.decode(data))
    }
}

/// Response body of `predict`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl PredictResponse {
    /// Predictions that actually carry image bytes.
    pub fn images(&self) -> impl Iterator<Item = &Prediction> {
        self.predictions.iter().filter(|p| p.bytes_base64_encoded.is_some())
    }
}

/// Fluent builder for a single Imagen call.
pub struct ImageBuilder {
    client: GeminiClient,
    model: Model,
    prompt: String,
    parameters: ImageGenerationParameters,
}

impl ImageBuilder {
    pub(crate) fn new(client: GeminiClient, model: Model, prompt: String) -> Self {
        Self { client, model, prompt, parameters: ImageGenerationParameters::default() }
    }

    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.parameters.sample_count = count;
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.parameters.aspect_ratio = Some(ratio.into());
        self
    }

    pub fn with_output_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.parameters.output_options = Some(OutputOptions { mime_type: mime_type.into() });
        self
    }

    pub fn build(self) -> (Model, PredictRequest) {
        let request = PredictRequest {
            instances: vec![PredictInstance { prompt: self.prompt }],
            parameters: self.parameters,
        };
        (self.model, request)
    }

    #[instrument(skip_all, fields(model = %self.model, sample_count = self.parameters.sample_count))]
    pub async fn execute(self) -> Result<PredictResponse, Error> {
        let client = self.client.clone();
        let (model, request) = self.build();
        client.predict_raw(&model, &request).await
    }
}
