use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolError;

pub const DEFAULT_MIME_TYPE: &str = "text/plain";

fn default_mime_type() -> String {
    DEFAULT_MIME_TYPE.to_string()
}

/// URI-addressed, read-only content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

impl Resource {
    pub fn new(uri: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: default_mime_type(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

#[async_trait]
pub trait ResourceHandler: Send + Sync {
    async fn read(&self) -> Result<Value, ToolError>;
}

type ResourceFuture = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>>;

#[derive(Clone)]
pub struct FnResourceHandler {
    inner: Arc<dyn Fn() -> ResourceFuture + Send + Sync>,
}

impl FnResourceHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self { inner: Arc::new(move || Box::pin(f())) }
    }
}

#[async_trait]
impl ResourceHandler for FnResourceHandler {
    async fn read(&self) -> Result<Value, ToolError> {
        (self.inner)().await
    }
}

/// Serves a fixed string.
#[derive(Debug, Clone)]
pub struct StaticText(pub &'static str);

#[async_trait]
impl ResourceHandler for StaticText {
    async fn read(&self) -> Result<Value, ToolError> {
        Ok(Value::String(self.0.to_string()))
    }
}
