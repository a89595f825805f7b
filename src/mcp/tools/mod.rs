//! MCP tools wrapping the Lexware Office REST endpoints.

pub mod contacts;
pub mod countries;
pub mod invoices;
pub mod posting_categories;
pub mod registry;

pub use registry::{ToolDescriptor, ToolRegistry};
