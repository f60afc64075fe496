use crate::engine::errors::PipelineError;
use crate::shared::response::types::BlendResponse;

/// A trait that defines how to serialize pipeline output for a given transport.
pub trait Renderer: Send + Sync {
    /// Render a successful response to bytes.
    fn render(&self, response: &BlendResponse) -> Vec<u8>;

    /// Render a terminal pipeline error to bytes.
    fn render_error(&self, error: &PipelineError) -> Vec<u8>;
}
