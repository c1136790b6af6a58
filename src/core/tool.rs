use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ToolError;

pub type JsonObject = Map<String, Value>;

/// Metadata every tool exposes through `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self { name: name.into(), description: description.into(), input_schema }
    }

    /// Bind `arguments` against the schema: required keys must be present and,
    /// when `properties` is declared, no other keys are accepted.
    pub fn check_arguments(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        if let Some(required) = self.input_schema.get("required").and_then(Value::as_array) {
            for key in required.iter().filter_map(Value::as_str) {
                if !arguments.contains_key(key) {
                    return Err(ToolError::MissingArgument(key.to_string()));
                }
            }
        }
        if let Some(props) = self.input_schema.get("properties").and_then(Value::as_object) {
            if let Some(extra) = arguments.keys().find(|k| !props.contains_key(*k)) {
                return Err(ToolError::UnexpectedArgument(extra.clone()));
            }
        }
        Ok(())
    }
}

/// Async capability bound to a tool name.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError>;
}

type ToolFuture = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>>;

/// Adapts an async closure into a [`ToolHandler`].
#[derive(Clone)]
pub struct FnToolHandler {
    inner: Arc<dyn Fn(JsonObject) -> ToolFuture + Send + Sync>,
}

impl FnToolHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(JsonObject) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self { inner: Arc::new(move |args| Box::pin(f(args))) }
    }
}

#[async_trait]
impl ToolHandler for FnToolHandler {
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        (self.inner)(arguments).await
    }
}

/// Typed accessors over a call's named arguments.
pub struct Arguments<'a>(pub &'a JsonObject);

impl<'a> Arguments<'a> {
    pub fn required_str(&self, name: &str) -> Result<&'a str, ToolError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(ToolError::MissingArgument(name.to_string())),
            Some(v) => v.as_str().ok_or_else(|| ToolError::InvalidArgument {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }

    pub fn optional_array(&self, name: &str) -> Result<Option<&'a Vec<Value>>, ToolError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v.as_array().map(Some).ok_or_else(|| ToolError::InvalidArgument {
                name: name.to_string(),
                expected: "an array",
            }),
        }
    }
}
