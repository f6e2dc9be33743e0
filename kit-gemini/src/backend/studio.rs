//! REST backend for the Gemini API (AI Studio endpoints, API-key auth).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use snafu::ResultExt;
use std::future::Future;
use tracing::{Level, instrument};
use url::Url;

use crate::backend::GeminiBackend;
use crate::error::{
    BadResponseSnafu, ConstructUrlSnafu, DecodeResponseSnafu, DeserializeSnafu, Error,
    PerformRequestSnafu,
};
use crate::generation::{GenerateContentRequest, GenerationResponse};
use crate::imagen::{PredictRequest, PredictResponse};
use crate::models::Model;

#[derive(Debug)]
pub struct StudioBackend {
    http_client: Client,
    base_url: Url,
}

impl StudioBackend {
    /// `http_client` must already carry the `x-goog-api-key` default header.
    pub fn new_with_client(http_client: Client, base_url: Url) -> Self {
        Self { http_client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, model: &Model, endpoint: &str) -> Result<Url, Error> {
        let suffix = format!("models/{}:{}", model.id(), endpoint);
        self.base_url.join(&suffix).context(ConstructUrlSnafu { suffix })
    }

    async fn perform_request<
        T,
        F: FnOnce(&Client) -> RequestBuilder,
        G: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    >(
        &self,
        url: Url,
        builder: F,
        checker: G,
    ) -> Result<T, Error> {
        let request_builder = builder(&self.http_client);
        tracing::debug!(request.url = %url, "sending request");
        let response = request_builder.send().await.context(PerformRequestSnafu { url })?;
        tracing::debug!(response.status = response.status().as_u16(), "response received");
        checker(check_response(response).await?).await
    }

    #[instrument(skip(self, json), fields(request.url = %url), err)]
    async fn post_json<Req: serde::Serialize + Sync, Res: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        json: &Req,
    ) -> Result<Res, Error> {
        self.perform_request(url.clone(), |c| c.post(url).json(json), async |r| {
            let body = r.bytes().await.context(DecodeResponseSnafu)?;
            serde_json::from_slice::<Res>(&body).context(DeserializeSnafu)
        })
        .await
    }
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

async fn check_response(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let description = response.text().await.ok().map(|text| {
        serde_json::from_str::<ApiErrorEnvelope>(&text).map(|e| e.error.message).unwrap_or(text)
    });
    BadResponseSnafu { code: status.as_u16(), description }.fail()
}

#[async_trait]
impl GeminiBackend for StudioBackend {
    #[instrument(skip_all, fields(model = %model, contents.count = req.contents.len()), ret(level = Level::TRACE), err)]
    async fn generate_content(
        &self,
        model: &Model,
        req: &GenerateContentRequest,
    ) -> Result<GenerationResponse, Error> {
        let url = self.build_url(model, "generateContent")?;
        self.post_json(url, req).await
    }

    #[instrument(skip_all, fields(model = %model, instances.count = req.instances.len()), err)]
    async fn predict(&self, model: &Model, req: &PredictRequest) -> Result<PredictResponse, Error> {
        let url = self.build_url(model, "predict")?;
        self.post_json(url, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_model_scoped_urls() {
        let backend = StudioBackend::new_with_client(
            Client::new(),
            Url::parse("https://generativelanguage.googleapis.com/v1beta/").unwrap(),
        );
        let url = backend.build_url(&Model::default(), "generateContent").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image-preview:generateContent"
        );

        let url = backend.build_url(&Model::new(Model::IMAGEN_4_0_GENERATE), "predict").unwrap();
        assert!(url.as_str().ends_with("/v1beta/models/imagen-4.0-generate-001:predict"));
    }
}
