use std::sync::Arc;
use tracing::{Level, instrument};

use crate::backend::GeminiBackend;
use crate::error::Error;
use crate::generation::{ContentBuilder, GenerateContentRequest, GenerationResponse};
use crate::imagen::{ImageBuilder, PredictRequest, PredictResponse};
use crate::models::Model;

/// Client for the Gemini API.
///
/// Cheap to clone; all clones share one backend. The client never retries,
/// throttles, or caches: every call is one independent network request.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    backend: Arc<dyn GeminiBackend>,
    model: Model,
    image_model: Model,
}

impl GeminiClient {
    /// Wrap a backend. `model` serves `generateContent`, `image_model` serves Imagen `predict`.
    pub fn new(backend: Arc<dyn GeminiBackend>, model: Model, image_model: Model) -> Self {
        Self { backend, model, image_model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn image_model(&self) -> &Model {
        &self.image_model
    }

    /// Start building a content generation request
    pub fn generate_content(&self) -> ContentBuilder {
        ContentBuilder::new(self.clone(), self.model.clone())
    }

    /// Start building a text-to-image request
    pub fn generate_images(&self, prompt: impl Into<String>) -> ImageBuilder {
        ImageBuilder::new(self.clone(), self.image_model.clone(), prompt.into())
    }

    #[instrument(skip_all, fields(model = %model), ret(level = Level::TRACE), err)]
    pub async fn generate_content_raw(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerationResponse, Error> {
        self.backend.generate_content(model, request).await
    }

    #[instrument(skip_all, fields(model = %model), err)]
    pub async fn predict_raw(
        &self,
        model: &Model,
        request: &PredictRequest,
    ) -> Result<PredictResponse, Error> {
        self.backend.predict(model, request).await
    }
}
