//! Lexware Office MCP server.
//!
//! Exposes the Lexware Office (lexoffice) REST API (invoices, contacts,
//! posting categories, countries) as MCP tools over a line-delimited
//! JSON-RPC 2.0 stdio transport. Every tool performs exactly one
//! authenticated GET against the upstream API and answers with a single
//! text content block.

pub mod config;
pub mod lexoffice;
pub mod logger;
pub mod mcp;

pub use crate::config::Config;
pub use crate::lexoffice::LexofficeClient;
