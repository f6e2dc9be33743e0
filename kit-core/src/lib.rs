//! # kit-core
//!
//! Core types for Campaign Kit.
//!
//! ## Overview
//!
//! - [`CampaignSpec`] - the campaign form as submitted by the user
//! - [`OutputFormat`] / [`FormatSelections`] - the fixed table of deliverable formats
//! - [`SourceAsset`] - an encoded image attached to outgoing requests
//! - [`GeneratedAsset`] / [`FormatAsset`] - images coming back, as data URLs
//! - [`MarketingKit`] - the aggregate result of one submission
//! - [`KitError`] - the error taxonomy shared by every crate in the workspace

pub mod asset;
pub mod campaign;
pub mod error;
pub mod kit;

pub use asset::{FormatAsset, GeneratedAsset, MAX_IMAGE_BYTES, SourceAsset, UNTITLED_FORMAT};
pub use campaign::{CampaignSpec, FormatSelections, OutputFormat};
pub use error::{KitError, Result};
pub use kit::{AssetCategory, KitEntry, MarketingKit};
