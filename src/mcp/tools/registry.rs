//! Tool registry - central routing for MCP tools.
//!
//! Provides `list_tools()` and `call_tool()` per MCP spec. Argument
//! deserialization and validation happen here, before any handler runs;
//! an `Err` from `call_tool` is a protocol-level invalid-params rejection
//! and guarantees that no upstream request was made.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::lexoffice::LexofficeClient;
use crate::mcp::content::ToolResult;

use super::contacts;
use super::countries;
use super::invoices;
use super::posting_categories;

/// Tool descriptor conforming to MCP specification.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Central registry for all MCP tools.
pub struct ToolRegistry {
    client: Arc<LexofficeClient>,
}

impl ToolRegistry {
    pub fn new(client: Arc<LexofficeClient>) -> Self {
        Self { client }
    }

    /// List all available tools per MCP spec.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![
            invoices::get_invoices_descriptor(),
            invoices::get_invoice_details_descriptor(),
            contacts::descriptor(),
            posting_categories::descriptor(),
            countries::descriptor(),
        ]
    }

    /// Call a tool by name with the given arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolResult, String> {
        match name {
            invoices::GET_INVOICES_TOOL => {
                let request: invoices::GetInvoicesRequest = parse_arguments(arguments)?;
                request.validate()?;
                Ok(invoices::get_invoices(&self.client, request).await)
            }
            invoices::GET_INVOICE_DETAILS_TOOL => {
                let request: invoices::GetInvoiceDetailsRequest = parse_arguments(arguments)?;
                let id = request.validate()?;
                Ok(invoices::get_invoice_details(&self.client, id).await)
            }
            contacts::GET_CONTACTS_TOOL => {
                let request: contacts::GetContactsRequest = parse_arguments(arguments)?;
                request.validate()?;
                Ok(contacts::get_contacts(&self.client, request).await)
            }
            posting_categories::LIST_POSTING_CATEGORIES_TOOL => {
                let request: posting_categories::ListPostingCategoriesRequest =
                    parse_arguments(arguments)?;
                Ok(posting_categories::list_posting_categories(&self.client, request).await)
            }
            countries::LIST_COUNTRIES_TOOL => {
                let request: countries::ListCountriesRequest = parse_arguments(arguments)?;
                Ok(countries::list_countries(&self.client, request).await)
            }
            _ => Ok(ToolResult::failure(format!(
                "Tool '{}' is not available. Available tools: {}, {}, {}, {}, {}",
                name,
                invoices::GET_INVOICES_TOOL,
                invoices::GET_INVOICE_DETAILS_TOOL,
                contacts::GET_CONTACTS_TOOL,
                posting_categories::LIST_POSTING_CATEGORIES_TOOL,
                countries::LIST_COUNTRIES_TOOL,
            ))),
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(arguments: Option<Value>) -> Result<T, String> {
    // Tools with only optional parameters must accept a missing arguments
    // object.
    let value = arguments.unwrap_or_else(|| json!({}));
    serde_json::from_value(value).map_err(|err| format!("Invalid arguments: {}", err))
}
