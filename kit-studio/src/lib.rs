//! # Kit Studio
//!
//! The user-facing side of Campaign Kit.
//!
//! ## Modules
//!
//! - **`server`**: axum API behind the campaign form and gallery, including the
//!   busy flags that keep at most one generation in flight and the slot holding
//!   the latest kit.
//! - **`config`**: credentials and model selection from the environment.
//! - **`export`**: writes a kit to disk for the command line `run` mode.

pub mod config;
pub mod export;
pub mod server;

pub use config::{MISSING_API_KEY, StudioConfig};
pub use export::{MANIFEST_FILE, write_kit};
pub use server::{AppState, api_routes, app};
