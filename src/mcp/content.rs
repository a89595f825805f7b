//! Content shapes for MCP tool responses.
//!
//! Every tool in this server answers with exactly one text block. An
//! upstream failure is still a successful `tools/call` at the JSON-RPC
//! level; it is flagged in-band with `isError`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single content block in a tool result (MCP spec compatible).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: Some(text.into()),
        }
    }
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result carrying one text block.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: false,
        }
    }

    /// In-band failure carrying one text block.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: true,
        }
    }
}

/// Indented JSON used when embedding payloads into text blocks.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
