use async_trait::async_trait;

use crate::error::Error;
use crate::generation::{GenerateContentRequest, GenerationResponse};
use crate::imagen::{PredictRequest, PredictResponse};
use crate::models::Model;

pub mod studio;

/// The contract a transport must fulfil.
/// Calling code never needs to know which backend is active.
#[async_trait]
pub trait GeminiBackend: Send + Sync + std::fmt::Debug {
    /// Generate content (unary)
    async fn generate_content(
        &self,
        model: &Model,
        req: &GenerateContentRequest,
    ) -> Result<GenerationResponse, Error>;

    /// Synthesize images from a text prompt
    async fn predict(&self, model: &Model, req: &PredictRequest) -> Result<PredictResponse, Error>;
}
