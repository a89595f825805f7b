//! Posting category listing. The upstream endpoint has no server-side
//! filter, so the full list is fetched and filtered locally by `type`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::lexoffice::LexofficeClient;
use crate::mcp::content::{pretty, ToolResult};

use super::registry::ToolDescriptor;

pub const LIST_POSTING_CATEGORIES_TOOL: &str = "list-posting-categories";

const POSTING_CATEGORIES_FAILURE: &str = "Failed to retrieve posting categories";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: LIST_POSTING_CATEGORIES_TOOL.to_string(),
        description: "Retrieve list of posting categories for bookkeeping vouchers".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["income", "outgo"],
                    "description": "Filter posting categories by type"
                }
            }
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Outgo,
}

impl CategoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Outgo => "outgo",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPostingCategoriesRequest {
    #[serde(default, rename = "type")]
    pub category_type: Option<CategoryType>,
}

/// Minimal envelope: only `type` is inspected, everything else passes
/// through verbatim via the flattened remainder.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostingCategory {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

pub async fn list_posting_categories(
    client: &LexofficeClient,
    request: ListPostingCategoriesRequest,
) -> ToolResult {
    match client.get_json("/v1/posting-categories").await {
        Ok(payload) => render_posting_categories(payload, request.category_type),
        Err(_) => ToolResult::failure(POSTING_CATEGORIES_FAILURE),
    }
}

fn render_posting_categories(payload: Value, filter: Option<CategoryType>) -> ToolResult {
    let categories: Vec<PostingCategory> = match serde_json::from_value(payload) {
        Ok(categories) => categories,
        Err(_) => return ToolResult::failure(POSTING_CATEGORIES_FAILURE),
    };

    let filtered: Vec<PostingCategory> = match filter {
        Some(wanted) => categories
            .into_iter()
            .filter(|category| category.category_type.as_deref() == Some(wanted.as_str()))
            .collect(),
        None => categories,
    };

    let rendered = serde_json::to_value(filtered)
        .map(|value| pretty(&value))
        .unwrap_or_else(|_| "[]".to_string());

    ToolResult::text(format!("Posting Categories:\n\n{}", rendered))
}
