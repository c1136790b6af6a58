pub mod demo;
pub mod mcp;
pub mod stdio;
