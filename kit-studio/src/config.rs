//! Runtime configuration read from the environment.

use kit_core::{KitError, Result};
use kit_engine::GeminiGenerator;
use kit_gemini::{GeminiBuilder, Model};
use url::Url;

/// Message shown when no API key is configured.
pub const MISSING_API_KEY: &str = "API_KEY environment variable is not set.";

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_key: Option<String>,
    /// Model used for all multimodal stages.
    pub image_model: String,
    /// Imagen model used to synthesize source photos.
    pub source_model: String,
    pub base_url: Option<Url>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            image_model: Model::GEMINI_2_5_FLASH_IMAGE_PREVIEW.to_string(),
            source_model: Model::IMAGEN_4_0_GENERATE.to_string(),
            base_url: None,
        }
    }
}

impl StudioConfig {
    /// Read configuration from the process environment.
    ///
    /// Supported variables:
    /// - `API_KEY` (or `GEMINI_API_KEY`): credential for the Gemini API
    /// - `KIT_IMAGE_MODEL`: multimodal model (default `gemini-2.5-flash-image-preview`)
    /// - `KIT_SOURCE_MODEL`: Imagen model (default `imagen-4.0-generate-001`)
    /// - `KIT_BASE_URL`: API root, for proxies and tests
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = non_blank("KIT_BASE_URL")
            .map(|raw| Url::parse(&raw))
            .transpose()
            .map_err(|e| KitError::config(format!("KIT_BASE_URL is not a valid URL: {e}")))?;

        Ok(Self {
            api_key: non_blank("API_KEY").or_else(|| non_blank("GEMINI_API_KEY")),
            image_model: non_blank("KIT_IMAGE_MODEL").map(qualify).unwrap_or(defaults.image_model),
            source_model: non_blank("KIT_SOURCE_MODEL")
                .map(qualify)
                .unwrap_or(defaults.source_model),
            base_url,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the Gemini-backed generator, failing before any network activity
    /// when no credential is configured.
    pub fn generator(&self) -> Result<GeminiGenerator> {
        let key = self.api_key.as_deref().ok_or_else(|| KitError::config(MISSING_API_KEY))?;
        let mut builder = GeminiBuilder::new(key)
            .with_model(self.image_model.as_str())
            .with_image_model(self.source_model.as_str());
        if let Some(url) = &self.base_url {
            builder = builder.with_base_url(url.clone());
        }
        let client = builder.build().map_err(|e| KitError::config(e.to_string()))?;
        Ok(GeminiGenerator::new(client))
    }
}

/// Accept both `gemini-x` and `models/gemini-x`.
fn qualify(model: String) -> String {
    if model.starts_with("models/") { model } else { format!("models/{model}") }
}
