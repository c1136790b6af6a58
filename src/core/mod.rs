//! Core types & traits: protocol messages, tool/resource records and their handler contracts.

pub mod error;
pub mod mcp;
pub mod resource;
pub mod tool;

pub use error::{DispatchError, RegistryError, ToolError};
pub use mcp::{MessageType, Reply, Request, Response, ServerInfo};
pub use resource::{FnResourceHandler, Resource, ResourceHandler, StaticText};
pub use tool::{Arguments, FnToolHandler, JsonObject, Tool, ToolHandler};
