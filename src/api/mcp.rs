//! The dispatcher: routes a tagged [`Request`] to the matching registry
//! entry and always answers with a [`Response`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde_json::Value as J;

use crate::core::mcp::label;
use crate::core::{
    DispatchError, JsonObject, MessageType, RegistryError, Reply, Request, Resource, ResourceHandler,
    Response, ServerInfo, Tool, ToolError, ToolHandler,
};
use crate::tools::registry::{ResourceRegistry, ToolRegistry};

pub struct McpServer {
    info: ServerInfo,
    tools: ToolRegistry,
    resources: ResourceRegistry,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: ServerInfo { name: name.into(), version: version.into() },
            tools: ToolRegistry::new(),
            resources: ResourceRegistry::new(),
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn register_tool<H: ToolHandler + 'static>(&mut self, tool: Tool, handler: H) -> Result<(), RegistryError> {
        self.tools.register(tool, handler)
    }

    pub fn register_resource<H: ResourceHandler + 'static>(
        &mut self,
        resource: Resource,
        handler: H,
    ) -> Result<(), RegistryError> {
        self.resources.register(resource, handler)
    }

    /// Dispatch one request. Lookup misses and handler faults (including
    /// panics) come back as `Response::Error`; nothing escapes to the caller.
    pub async fn handle_message(&self, req: Request) -> Response {
        let kind = req
            .message_type()
            .map(|t| t.as_str())
            .unwrap_or("unknown");
        metrics::counter!("mcp_requests_total", "type" => kind).increment(1);
        tracing::debug!(kind = ?req.kind, tool = ?req.tool_name, uri = ?req.uri, "dispatching message");

        match self.dispatch(req).await {
            Ok(reply) => reply.into(),
            Err(e) => {
                metrics::counter!("mcp_request_errors_total", "type" => kind).increment(1);
                tracing::warn!(error = %e, "message failed");
                e.into()
            }
        }
    }

    /// Same as [`handle_message`](Self::handle_message) for raw JSON input.
    /// Only a non-object request is rejected outright.
    pub async fn handle_value(&self, raw: J) -> Response {
        if !raw.is_object() {
            return DispatchError::InvalidRequest(format!("expected a JSON object, got {raw}")).into();
        }
        match serde_json::from_value::<Request>(raw) {
            Ok(req) => self.handle_message(req).await,
            Err(e) => DispatchError::InvalidRequest(e.to_string()).into(),
        }
    }

    async fn dispatch(&self, req: Request) -> Result<Reply, DispatchError> {
        match req.message_type()? {
            MessageType::Initialize => Ok(Reply::InitializeResponse { server: self.info.clone() }),
            MessageType::ListTools => Ok(Reply::ToolsResponse { tools: self.tools.list() }),
            MessageType::CallTool => self.call_tool(req.tool_name.as_ref(), req.arguments).await,
            MessageType::ListResources => Ok(Reply::ResourcesResponse { resources: self.resources.list() }),
            MessageType::GetResource => self.get_resource(req.uri.as_ref()).await,
        }
    }

    async fn call_tool(&self, name: Option<&J>, arguments: Option<J>) -> Result<Reply, DispatchError> {
        let entry = name
            .and_then(J::as_str)
            .and_then(|n| self.tools.get(n))
            .ok_or_else(|| DispatchError::ToolNotFound(label(name)))?;

        // An absent `arguments` means no arguments; an explicit null does not.
        let arguments = match arguments {
            None => JsonObject::new(),
            Some(J::Object(map)) => map,
            Some(_) => return Err(DispatchError::ArgumentsNotObject),
        };
        entry.tool.check_arguments(&arguments)?;

        tracing::debug!(tool = %entry.tool.name, "invoking tool handler");
        let content = guarded(entry.handler.call(arguments)).await?;
        Ok(Reply::ToolResponse { content })
    }

    async fn get_resource(&self, uri: Option<&J>) -> Result<Reply, DispatchError> {
        let entry = uri
            .and_then(J::as_str)
            .and_then(|u| self.resources.get(u))
            .ok_or_else(|| DispatchError::ResourceNotFound(label(uri)))?;

        tracing::debug!(uri = %entry.resource.uri, "reading resource");
        let content = guarded(entry.handler.read()).await?;
        Ok(Reply::ResourceResponse { uri: entry.resource.uri.clone(), content })
    }
}

/// Await a handler future, turning a panic into a `ToolError`.
async fn guarded<F>(fut: F) -> Result<J, ToolError>
where
    F: Future<Output = Result<J, ToolError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(ToolError::Message(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
