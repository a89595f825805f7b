//! Country listing with local filtering by tax classification.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::lexoffice::LexofficeClient;
use crate::mcp::content::{pretty, ToolResult};

use super::registry::ToolDescriptor;

pub const LIST_COUNTRIES_TOOL: &str = "list-countries";

const COUNTRIES_FAILURE: &str = "Failed to retrieve countries";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: LIST_COUNTRIES_TOOL.to_string(),
        description: concat!(
            "Retrieve list of countries known to lexoffice with their tax classifications. ",
            "Tax classifications include \"de\" (Germany), \"intraCommunity\" (eligible for ",
            "Innergemeinschaftliche Lieferung within EU), and \"thirdPartyCountry\" ",
            "(countries outside the EU)."
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "taxClassification": {
                    "type": "string",
                    "enum": ["de", "intraCommunity", "thirdPartyCountry"],
                    "description": concat!(
                        "Filter countries by tax classification: \"de\" for Germany, ",
                        "\"intraCommunity\" for EU countries eligible for ",
                        "Innergemeinschaftliche Lieferung, or \"thirdPartyCountry\" ",
                        "for non-EU countries"
                    )
                }
            }
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxClassification {
    De,
    IntraCommunity,
    ThirdPartyCountry,
}

impl TaxClassification {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxClassification::De => "de",
            TaxClassification::IntraCommunity => "intraCommunity",
            TaxClassification::ThirdPartyCountry => "thirdPartyCountry",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListCountriesRequest {
    #[serde(default, rename = "taxClassification")]
    pub tax_classification: Option<TaxClassification>,
}

/// Minimal envelope: only `taxClassification` is inspected.
#[derive(Debug, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "taxClassification", skip_serializing_if = "Option::is_none")]
    pub tax_classification: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

pub async fn list_countries(
    client: &LexofficeClient,
    request: ListCountriesRequest,
) -> ToolResult {
    match client.get_json("/v1/countries").await {
        Ok(payload) => render_countries(payload, request.tax_classification),
        Err(_) => ToolResult::failure(COUNTRIES_FAILURE),
    }
}

fn render_countries(payload: Value, filter: Option<TaxClassification>) -> ToolResult {
    let countries: Vec<Country> = match serde_json::from_value(payload) {
        Ok(countries) => countries,
        Err(_) => return ToolResult::failure(COUNTRIES_FAILURE),
    };

    let filtered: Vec<Country> = match filter {
        Some(wanted) => countries
            .into_iter()
            .filter(|country| country.tax_classification.as_deref() == Some(wanted.as_str()))
            .collect(),
        None => countries,
    };

    let rendered = serde_json::to_value(filtered)
        .map(|value| pretty(&value))
        .unwrap_or_else(|_| "[]".to_string());

    ToolResult::text(format!("Countries:\n\n{}", rendered))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        json!([
            {"countryCode": "DE", "countryNameDE": "Deutschland", "taxClassification": "de"},
            {"countryCode": "FR", "countryNameDE": "Frankreich", "taxClassification": "intraCommunity"},
            {"countryCode": "US", "countryNameDE": "USA", "taxClassification": "thirdPartyCountry"}
        ])
    }

    #[test]
    fn test_enum_wire_names() {
        let parsed: ListCountriesRequest =
            serde_json::from_value(json!({"taxClassification": "intraCommunity"})).unwrap();
        assert_eq!(
            parsed.tax_classification,
            Some(TaxClassification::IntraCommunity)
        );
        assert!(
            serde_json::from_value::<ListCountriesRequest>(json!({"taxClassification": "eu"}))
                .is_err()
        );
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let result = render_countries(sample(), None);
        assert!(!result.is_error);
        let text = result.content[0].text.as_deref().unwrap();
        assert!(text.starts_with("Countries:"));
        assert!(text.contains("\"DE\""));
        assert!(text.contains("\"US\""));
    }

    #[test]
    fn test_third_party_filter() {
        let result = render_countries(sample(), Some(TaxClassification::ThirdPartyCountry));
        let text = result.content[0].text.as_deref().unwrap();
        assert!(text.contains("\"US\""));
        assert!(!text.contains("\"DE\""));
        assert!(!text.contains("\"FR\""));
    }

    #[test]
    fn test_entries_without_classification_are_dropped_by_filter() {
        let payload = json!([{"countryCode": "XX"}]);
        let result = render_countries(payload, Some(TaxClassification::De));
        assert!(result.content[0].text.as_deref().unwrap().contains("[]"));
    }

    #[test]
    fn test_non_array_payload_is_failure() {
        let result = render_countries(json!("nope"), None);
        assert!(result.is_error);
        assert_eq!(result.content[0].text.as_deref(), Some(COUNTRIES_FAILURE));
    }
}
