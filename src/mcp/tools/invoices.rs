//! Invoice tools: list invoices via the voucherlist endpoint and fetch a
//! single invoice by id.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::lexoffice::LexofficeClient;
use crate::mcp::content::{pretty, ToolResult};

use super::registry::ToolDescriptor;

pub const GET_INVOICES_TOOL: &str = "get-invoices";
pub const GET_INVOICE_DETAILS_TOOL: &str = "get-invoice-details";

const INVOICES_FAILURE: &str = "Failed to retrieve invoices";
const INVOICE_DETAILS_FAILURE: &str = "Failed to retrieve invoice data";

// =============================================================================
// Tool Descriptors
// =============================================================================

pub fn get_invoices_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: GET_INVOICES_TOOL.to_string(),
        description: "Get a list of invoices from Lexware Office".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ["open", "draft", "paid", "paidoff", "voided"]
                    },
                    "description": "invoice statuses to include (default: all)"
                },
                "page": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "page number to retrieve; starts at 0"
                },
                "size": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 250,
                    "description": "number of invoices to retrieve per page"
                }
            }
        }),
    }
}

pub fn get_invoice_details_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: GET_INVOICE_DETAILS_TOOL.to_string(),
        description: "Get details of an invoice from Lexware Office".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "The id of the invoice"
                }
            },
            "required": ["id"]
        }),
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    Open,
    Draft,
    Paid,
    Paidoff,
    Voided,
}

impl VoucherStatus {
    pub const ALL: [VoucherStatus; 5] = [
        VoucherStatus::Open,
        VoucherStatus::Draft,
        VoucherStatus::Paid,
        VoucherStatus::Paidoff,
        VoucherStatus::Voided,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VoucherStatus::Open => "open",
            VoucherStatus::Draft => "draft",
            VoucherStatus::Paid => "paid",
            VoucherStatus::Paidoff => "paidoff",
            VoucherStatus::Voided => "voided",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetInvoicesRequest {
    #[serde(default = "default_statuses")]
    pub status: Vec<VoucherStatus>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_statuses() -> Vec<VoucherStatus> {
    VoucherStatus::ALL.to_vec()
}

pub(super) fn default_size() -> i64 {
    250
}

impl GetInvoicesRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 0 {
            return Err("page must not be negative".to_string());
        }
        if self.size < 1 || self.size > 250 {
            return Err("size must be between 1 and 250".to_string());
        }
        Ok(())
    }

    /// Query path for the voucherlist endpoint. `page` and `size` are
    /// validated but not forwarded; the upstream list is fetched unpaged.
    pub fn path(&self) -> String {
        let statuses: Vec<&str> = self.status.iter().map(|status| status.as_str()).collect();
        format!(
            "/v1/voucherlist?voucherType=invoice&voucherStatus={}",
            statuses.join(",")
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDetailsRequest {
    pub id: String,
}

impl GetInvoiceDetailsRequest {
    pub fn validate(&self) -> Result<Uuid, String> {
        if self.id.trim().is_empty() {
            return Err("invoice id must not be empty".to_string());
        }
        Uuid::parse_str(self.id.trim())
            .map_err(|_| format!("id '{}' is not a valid UUID", self.id))
    }
}

/// Envelope for the voucherlist response; only the `content` array is
/// inspected, entries pass through verbatim.
#[derive(Debug, Deserialize)]
struct VoucherPage {
    #[serde(default)]
    content: Vec<Value>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn get_invoices(client: &LexofficeClient, request: GetInvoicesRequest) -> ToolResult {
    match client.get_json(&request.path()).await {
        Ok(payload) => render_invoices(payload),
        Err(_) => ToolResult::failure(INVOICES_FAILURE),
    }
}

fn render_invoices(payload: Value) -> ToolResult {
    let page: VoucherPage = match serde_json::from_value(payload) {
        Ok(page) => page,
        Err(_) => return ToolResult::failure(INVOICES_FAILURE),
    };

    if page.content.is_empty() {
        return ToolResult::failure(INVOICES_FAILURE);
    }

    let count = page.content.len();
    let vouchers = Value::Array(page.content);
    ToolResult::text(format!(
        "There are {} invoices in Lexware Office:\n\n{}",
        count,
        pretty(&vouchers)
    ))
}

pub async fn get_invoice_details(client: &LexofficeClient, id: Uuid) -> ToolResult {
    match client.get_json(&format!("/v1/invoices/{}", id)).await {
        Ok(payload) => ToolResult::text(format!("Invoice details:\n\n{}", pretty(&payload))),
        Err(_) => ToolResult::failure(INVOICE_DETAILS_FAILURE),
    }
}
