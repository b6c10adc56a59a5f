// Turning composed pages into document bytes

mod pdf;

pub use pdf::PdfRenderer;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::layout::PageCanvas;

/// Produces a finished document from a display list. Implementations
/// must keep page order and content; only the output medium differs.
pub trait Renderer: Send + Sync {
    fn render(&self, title: &str, pages: &[PageCanvas]) -> Result<Vec<u8>, AppError>;
}

/// Renderer selection from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Pdf,
}

impl RendererKind {
    pub fn build(self) -> Box<dyn Renderer> {
        match self {
            RendererKind::Pdf => Box::new(PdfRenderer),
        }
    }
}
