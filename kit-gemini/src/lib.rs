//! # kit-gemini
//!
//! A small Rust client for the two Gemini REST endpoints Campaign Kit relies on:
//!
//! - `models/{model}:generateContent` - text plus inline images in, ordered
//!   text/image parts out
//! - `models/{model}:predict` - Imagen text-to-image synthesis
//!
//! ```rust,ignore
//! use kit_gemini::{GeminiBuilder, Modality};
//!
//! let client = GeminiBuilder::new(std::env::var("API_KEY")?).build()?;
//! let response = client
//!     .generate_content()
//!     .with_inline_data("image/png", poster_base64)
//!     .with_text("Create 3 poster variations.")
//!     .with_response_modalities(vec![Modality::Image])
//!     .execute()
//!     .await?;
//! ```

pub mod backend;
pub mod builder;
pub mod client;
pub mod error;
pub mod generation;
pub mod imagen;
pub mod models;

pub use backend::{GeminiBackend, studio::StudioBackend};
pub use builder::{GeminiBuilder, default_base_url};
pub use client::GeminiClient;
pub use error::Error;
pub use generation::{
    Candidate, ContentBuilder, FinishReason, GenerateContentRequest, GenerationConfig,
    GenerationResponse, PromptFeedback, UsageMetadata,
};
pub use imagen::{
    ImageBuilder, ImageGenerationParameters, OutputOptions, PredictInstance, PredictRequest,
    PredictResponse, Prediction,
};
pub use models::{Blob, Content, Modality, Model, Part, Role};
