//! # kit-engine
//!
//! Everything between a submitted campaign and a finished [`MarketingKit`]:
//!
//! - [`prompt`] builds the instruction text for each stage
//! - [`generator`] defines the [`ImageGenerator`] seam and its Gemini implementation
//! - [`parser`] pairs titles with images in multi-part replies
//! - [`orchestrator`] runs the stages in order and assembles the kit
//!
//! ```rust,ignore
//! use kit_engine::{GeminiGenerator, KitOrchestrator};
//!
//! let orchestrator = KitOrchestrator::new(GeminiGenerator::new(client));
//! let source = orchestrator.generate_source_image(&spec).await?;
//! let kit = orchestrator.generate_kit(&spec, &source, None).await?;
//! ```
//!
//! [`MarketingKit`]: kit_core::MarketingKit

pub mod generator;
pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use generator::{GeminiGenerator, GenerationRequest, ImageGenerator, SynthesisRequest};
pub use orchestrator::KitOrchestrator;
pub use parser::{ResponsePart, TitleSlot, normalize_title, parse_parts};
pub use prompt::{InputImage, PromptKind, PromptPlan, ResponseShape};
