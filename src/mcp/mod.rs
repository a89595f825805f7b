//! MCP (Model Context Protocol) module.
//!
//! JSON-RPC 2.0 over a line-delimited stdio transport.

pub mod content;
pub mod rpc;
pub mod server;
pub mod service;
pub mod tools;

pub use server::StdioServer;
pub use service::McpService;
