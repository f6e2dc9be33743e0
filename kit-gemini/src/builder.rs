use reqwest::{
    ClientBuilder, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use snafu::ResultExt;
use std::sync::{Arc, LazyLock};

use crate::backend::studio::StudioBackend;
use crate::client::GeminiClient;
use crate::error::{BuildClientSnafu, Error, InvalidApiKeySnafu};
use crate::models::Model;

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// The public Gemini REST endpoint.
pub fn default_base_url() -> Url {
    DEFAULT_BASE_URL.clone()
}

/// A builder for the [`GeminiClient`].
pub struct GeminiBuilder {
    api_key: Option<String>,
    model: Model,
    image_model: Model,
    client_builder: ClientBuilder,
    base_url: Url,
}

impl GeminiBuilder {
    /// Creates a new `GeminiBuilder` with the given API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self { api_key: Some(key.into()), ..Self::new_without_api_key() }
    }

    /// Creates a new `GeminiBuilder` without an API key; `build` fails until one is set.
    pub fn new_without_api_key() -> Self {
        Self {
            api_key: None,
            model: Model::default(),
            image_model: Model::new(Model::IMAGEN_4_0_GENERATE),
            client_builder: ClientBuilder::default(),
            base_url: DEFAULT_BASE_URL.clone(),
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model used for `generateContent`.
    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the model used for Imagen `predict`.
    pub fn with_image_model(mut self, model: impl Into<Model>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Sets a custom `reqwest::ClientBuilder`.
    pub fn with_http_client(mut self, client_builder: ClientBuilder) -> Self {
        self.client_builder = client_builder;
        self
    }

    /// Sets a custom base URL for the API.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn build(self) -> Result<GeminiClient, Error> {
        let key = self.api_key.filter(|k| !k.trim().is_empty()).ok_or(Error::MissingApiKey)?;

        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("x-goog-api-key"),
            HeaderValue::from_str(&key).context(InvalidApiKeySnafu)?,
        )]);

        let http_client =
            self.client_builder.default_headers(headers).build().context(BuildClientSnafu)?;

        let backend = StudioBackend::new_with_client(http_client, self.base_url);
        Ok(GeminiClient::new(Arc::new(backend), self.model, self.image_model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_api_key() {
        assert!(matches!(GeminiBuilder::new_without_api_key().build(), Err(Error::MissingApiKey)));
        assert!(matches!(GeminiBuilder::new("  ").build(), Err(Error::MissingApiKey)));
    }

    #[test]
    fn build_rejects_unprintable_key() {
        assert!(matches!(GeminiBuilder::new("bad\nkey").build(), Err(Error::InvalidApiKey { .. })));
    }

    #[test]
    fn build_keeps_models() {
        let client = GeminiBuilder::new("key")
            .with_model("models/custom-image")
            .with_image_model("imagen-3.0-generate-002")
            .build()
            .unwrap();
        assert_eq!(client.model().as_str(), "models/custom-image");
        assert_eq!(client.image_model().id(), "imagen-3.0-generate-002");
    }
}
