//! A tagged-message dispatcher for tools and resources, with a database
//! assistant served over stdio or HTTP.

pub mod api;
pub mod cli;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;

pub use api::mcp::McpServer;
