//! Content-type specific response writers.
//!
//! A [`ResponseWriter`] turns a handler's payload into response body bytes
//! for one content type. Writers are registered in a [`WriterRegistry`] and
//! looked up by the lifecycle with the negotiated content type. The JSON
//! writer ships by default; hosts add writers for further formats the same
//! way.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use oriel_core::{DispatchError, DispatchResult};

/// Content type served by the default writer.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serializes a payload into response body bytes for one content type.
pub trait ResponseWriter: Send + Sync {
    /// The content type this writer serves.
    fn content_type(&self) -> &str;

    /// Encodes the payload.
    fn serialize(&self, payload: &Value) -> DispatchResult<Vec<u8>>;
}

/// The `application/json` writer.
#[derive(Debug, Default)]
pub struct JsonResponseWriter;

impl ResponseWriter for JsonResponseWriter {
    fn content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }

    fn serialize(&self, payload: &Value) -> DispatchResult<Vec<u8>> {
        serde_json::to_vec(payload).map_err(|source| DispatchError::Serialize {
            content_type: JSON_CONTENT_TYPE.to_string(),
            source: Box::new(source),
        })
    }
}

/// Registry of response writers, keyed by content type.
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn ResponseWriter>>,
}

impl WriterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
        }
    }

    /// Creates a registry with the JSON writer registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonResponseWriter));
        registry
    }

    /// Registers a writer under its own content type, replacing any previous
    /// writer for that type.
    pub fn register(&mut self, writer: Arc<dyn ResponseWriter>) {
        self.writers
            .insert(writer.content_type().to_string(), writer);
    }

    /// Registers a writer (builder pattern).
    pub fn with(mut self, writer: Arc<dyn ResponseWriter>) -> Self {
        self.register(writer);
        self
    }

    /// The writer registered for `content_type`, if any.
    pub fn writer_for(&self, content_type: &str) -> Option<Arc<dyn ResponseWriter>> {
        self.writers.get(content_type).map(Arc::clone)
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterRegistry")
            .field("content_types", &self.writers.keys().collect::<Vec<_>>())
            .finish()
    }
}
