//! # Generation Client
//!
//! [`ImageGenerator`] is the seam between the orchestrator and the remote
//! model. [`GeminiGenerator`] implements it on top of [`kit_gemini`]; tests
//! substitute a scripted fake.

use crate::parser::ResponsePart;
use crate::prompt::ResponseShape;
use async_trait::async_trait;
use kit_core::{KitError, Result, SourceAsset};
use kit_gemini::{GeminiClient, Modality, Part};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One multimodal request: input images first, then the prompt text.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub images: Vec<SourceAsset>,
    pub shape: ResponseShape,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, shape: ResponseShape) -> Self {
        Self { prompt: prompt.into(), images: Vec::new(), shape }
    }

    pub fn with_image(mut self, image: SourceAsset) -> Self {
        self.images.push(image);
        self
    }
}

/// A text-to-image request for synthesizing a source photo.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub prompt: String,
    pub count: u32,
    pub mime_type: String,
    pub aspect_ratio: String,
}

impl SynthesisRequest {
    /// One square JPEG.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            mime_type: "image/jpeg".to_string(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Send one request and return the reply parts in the order received.
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ResponsePart>>;

    /// Synthesize images from text alone.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<SourceAsset>>;
}

#[async_trait]
impl<G: ImageGenerator + ?Sized> ImageGenerator for Arc<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ResponsePart>> {
        (**self).generate(request).await
    }

    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<SourceAsset>> {
        (**self).synthesize(request).await
    }
}

/// [`ImageGenerator`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    fn convert_parts(parts: &[Part]) -> Vec<ResponsePart> {
        parts
            .iter()
            .filter_map(|part| match part {
                // Thought summaries are not part of the answer.
                Part::Text { thought: Some(true), .. } => None,
                Part::Text { text, .. } => Some(ResponsePart::Text(text.clone())),
                Part::InlineData { inline_data } => Some(ResponsePart::Image {
                    media_type: inline_data.mime_type.clone(),
                    data: inline_data.data.clone(),
                }),
                Part::Other(_) => None,
            })
            .collect()
    }
}

fn modalities(shape: ResponseShape) -> Vec<Modality> {
    match shape {
        ResponseShape::ImageOnly => vec![Modality::Image],
        ResponseShape::TitledImages => vec![Modality::Image, Modality::Text],
    }
}

/// Flatten an error and its sources into one line.
fn upstream(err: kit_gemini::Error) -> KitError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    KitError::Upstream(message)
}

#[async_trait]
impl ImageGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        self.client.model().id()
    }

    #[instrument(skip_all, fields(model = %self.client.model(), images = request.images.len()))]
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ResponsePart>> {
        let mut builder = self.client.generate_content();
        for image in &request.images {
            builder = builder.with_part(Part::inline_bytes(image.media_type(), image.bytes()));
        }
        let response = builder
            .with_text(request.prompt)
            .with_response_modalities(modalities(request.shape))
            .execute()
            .await
            .map_err(upstream)?;

        let block_reason = response.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_ref());
        if let Some(reason) = block_reason {
            warn!(block_reason = %reason, "prompt was blocked");
        }
        debug!(
            finish_reason = ?response.finish_reason(),
            images = response.image_count(),
            "generateContent returned"
        );
        Ok(Self::convert_parts(response.parts()))
    }

    #[instrument(skip_all, fields(model = %self.client.image_model(), count = request.count))]
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<SourceAsset>> {
        let response = self
            .client
            .generate_images(request.prompt)
            .with_count(request.count)
            .with_aspect_ratio(request.aspect_ratio)
            .with_output_mime_type(request.mime_type.clone())
            .execute()
            .await
            .map_err(upstream)?;

        let mut assets = Vec::new();
        for prediction in &response.predictions {
            if let Some(reason) = &prediction.rai_filtered_reason {
                warn!(reason = %reason, "image filtered by safety checks");
            }
            let Some(bytes) = prediction.image_bytes() else { continue };
            let bytes = bytes
                .map_err(|e| KitError::upstream(format!("invalid image payload: {e}")))?;
            let media_type =
                prediction.mime_type.clone().unwrap_or_else(|| request.mime_type.clone());
            assets.push(SourceAsset::new(bytes, media_type));
        }
        Ok(assets)
    }
}
