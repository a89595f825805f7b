//! Contact listing tool. Unlike the category and country tools, every
//! filter here is forwarded server-side as a query parameter.

use serde::Deserialize;
use serde_json::json;
use url::form_urlencoded;

use crate::lexoffice::LexofficeClient;
use crate::mcp::content::{pretty, ToolResult};

use super::invoices::default_size;
use super::registry::ToolDescriptor;

pub const GET_CONTACTS_TOOL: &str = "get-contacts";

const CONTACTS_FAILURE: &str = "Failed to retrieve contacts";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: GET_CONTACTS_TOOL.to_string(),
        description: concat!(
            "Get contacts from Lexware Office with optional filters ",
            "that are combined with a logical AND"
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "minLength": 3,
                    "description": concat!(
                        "filters contacts where any of their email addresses inside the ",
                        "emailAddresses object or in company contactPersons match the given ",
                        "email value; can be a substring; _ is allowed as wildcard for any ",
                        "character; % is allowed as wildcard for any number of characters; ",
                        "_ and % can be escaped with \\"
                    )
                },
                "name": {
                    "type": "string",
                    "minLength": 3,
                    "description": concat!(
                        "filters contacts whose name matches the given name value; can be a ",
                        "substring; _ is allowed as wildcard for any character; % is allowed ",
                        "as wildcard for any number of characters; _ and % can be escaped with \\"
                    )
                },
                "number": {
                    "type": "integer",
                    "description": "returns the contacts with the specified contact number (customer or vendor number)"
                },
                "customer": {
                    "type": "boolean",
                    "description": concat!(
                        "if set to true filters contacts that have the role customer, if set ",
                        "to false filters contacts that do not have the customer role"
                    )
                },
                "vendor": {
                    "type": "boolean",
                    "description": concat!(
                        "if set to true filters contacts that have the role vendor, if set ",
                        "to false filters contacts that do not have the vendor role"
                    )
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
                    "description": "number of contacts to retrieve per page"
                }
            }
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct GetContactsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub customer: Option<bool>,
    #[serde(default)]
    pub vendor: Option<bool>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

impl GetContactsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = &self.email {
            if email.chars().count() < 3 {
                return Err("email filter must be at least 3 characters".to_string());
            }
        }
        if let Some(name) = &self.name {
            if name.chars().count() < 3 {
                return Err("name filter must be at least 3 characters".to_string());
            }
        }
        if self.page < 0 {
            return Err("page must not be negative".to_string());
        }
        if self.size < 1 || self.size > 250 {
            return Err("size must be between 1 and 250".to_string());
        }
        Ok(())
    }

    /// Query path with every supplied filter percent-encoded. An explicit
    /// `customer=false` / `vendor=false` is forwarded; an unset filter is
    /// omitted. `page` and `size` are validated but not forwarded.
    pub fn path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(email) = &self.email {
            query.append_pair("email", email);
        }
        if let Some(name) = &self.name {
            query.append_pair("name", name);
        }
        if let Some(number) = self.number {
            query.append_pair("number", &number.to_string());
        }
        if let Some(customer) = self.customer {
            query.append_pair("customer", if customer { "true" } else { "false" });
        }
        if let Some(vendor) = self.vendor {
            query.append_pair("vendor", if vendor { "true" } else { "false" });
        }
        format!("/v1/contacts?{}", query.finish())
    }
}

pub async fn get_contacts(client: &LexofficeClient, request: GetContactsRequest) -> ToolResult {
    match client.get_json(&request.path()).await {
        Ok(payload) => ToolResult::text(format!("Contacts:\n\n{}", pretty(&payload))),
        Err(_) => ToolResult::failure(CONTACTS_FAILURE),
    }
}
