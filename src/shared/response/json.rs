use serde::Serialize;

use crate::engine::errors::PipelineError;
use crate::shared::response::render::Renderer;
use crate::shared::response::types::{BlendResponse, StatusCode};

pub struct JsonRenderer {
    pretty: bool,
}

#[derive(Serialize)]
struct ErrorFrame<'a> {
    status: u16,
    message: &'a str,
    errors: Vec<String>,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn encode<T: Serialize>(&self, value: &T) -> Vec<u8> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        encoded.unwrap_or_else(|e| {
            format!(r#"{{"status":500,"message":"serialization failed: {e}"}}"#).into_bytes()
        })
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, response: &BlendResponse) -> Vec<u8> {
        self.encode(response)
    }

    fn render_error(&self, error: &PipelineError) -> Vec<u8> {
        let (status, errors) = match error {
            PipelineError::Validation(errors) => (
                StatusCode::BadRequest,
                errors.errors().iter().map(ToString::to_string).collect(),
            ),
            PipelineError::Request(e) => (StatusCode::BadRequest, vec![e.to_string()]),
            PipelineError::Unexpected(message) => (StatusCode::InternalError, vec![message.clone()]),
        };
        self.encode(&ErrorFrame {
            status: status.code(),
            message: status.message(),
            errors,
        })
    }
}
