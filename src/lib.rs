//! # wine-guide
//!
//! Personalized wedding wine guides rendered as PDF, plus quick dinner
//! pairings, driven by an LLM content generator.

pub mod budget;
pub mod config;
pub mod content;
pub mod error;
pub mod guide;
pub mod layout;
pub mod logging;
pub mod model;
pub mod quantities;
pub mod render;
pub mod server;
pub mod wrap;

pub use budget::compute_budget;
pub use config::Config;
pub use content::{AnthropicClient, ContentGenerator};
pub use error::{AppError, ErrorResponse};
pub use guide::{assemble_guide, Guide};
pub use quantities::compute_quantities;
pub use render::{PdfRenderer, Renderer};
pub use server::{app, AppState, GuideSettings};
pub use wrap::wrap_text;
