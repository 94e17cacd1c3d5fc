//! One-way flight search.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::ENGINE;
use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::search::SerpApiClient;
use crate::domains::tools::ToolError;

/// Validated parameters for a one-way search.
///
/// Defaults declared on the schema are substituted before deserialization,
/// so the defaulted fields are always present here.
#[derive(Debug, Clone, Deserialize)]
pub struct OneWayParams {
    pub departure_id: String,
    pub arrival_id: String,
    pub outbound_date: String,
    pub adults: i64,
    pub currency: String,
    pub hl: String,
}

/// Search one-way flights between two airports on a given date.
pub struct FlightSearchOneWayTool {
    client: Arc<SerpApiClient>,
}

impl FlightSearchOneWayTool {
    pub const NAME: &'static str = "flight_search_one_way";
    pub const DESCRIPTION: &'static str =
        "Search for one-way flights between two airports on a given date";

    pub fn new(client: Arc<SerpApiClient>) -> Self {
        Self { client }
    }

    pub fn descriptor(client: Arc<SerpApiClient>) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self::new(client)),
        )
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new()
            .field(
                FieldSpec::required("departure_id", FieldKind::String)
                    .description("Departure airport IATA code (e.g., ZRH)"),
            )
            .field(
                FieldSpec::required("arrival_id", FieldKind::String)
                    .description("Arrival airport IATA code (e.g., LIS)"),
            )
            .field(
                FieldSpec::required("outbound_date", FieldKind::String)
                    .description("Departure date, YYYY-MM-DD"),
            )
            .field(
                FieldSpec::optional("adults", FieldKind::Integer)
                    .description("Number of adult passengers")
                    .default_value(json!(1)),
            )
            .field(
                FieldSpec::optional("currency", FieldKind::String)
                    .description("Currency for prices")
                    .default_value(json!("USD")),
            )
            .field(
                FieldSpec::optional("hl", FieldKind::String)
                    .description("Language code for results")
                    .default_value(json!("en")),
            )
    }

    /// Build the SerpApi query for a one-way search (`type` 2).
    fn query(params: &OneWayParams) -> Vec<(String, String)> {
        vec![
            ("departure_id".to_string(), params.departure_id.clone()),
            ("arrival_id".to_string(), params.arrival_id.clone()),
            ("outbound_date".to_string(), params.outbound_date.clone()),
            ("type".to_string(), "2".to_string()),
            ("adults".to_string(), params.adults.to_string()),
            ("currency".to_string(), params.currency.clone()),
            ("hl".to_string(), params.hl.clone()),
        ]
    }
}

#[async_trait::async_trait]
impl ToolHandler for FlightSearchOneWayTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: OneWayParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        info!(
            "Searching one-way flights: {} -> {} on {}",
            params.departure_id, params.arrival_id, params.outbound_date
        );

        let results = self.client.search(ENGINE, Self::query(&params)).await?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::validate;

    #[test]
    fn test_schema_requires_route_and_date() {
        let rendered = FlightSearchOneWayTool::schema().to_json_schema();
        assert_eq!(
            rendered["required"],
            json!(["departure_id", "arrival_id", "outbound_date"])
        );
    }

    #[test]
    fn test_defaults_substituted() {
        let args = validate(
            &FlightSearchOneWayTool::schema(),
            &json!({
                "departure_id": "ZRH",
                "arrival_id": "LIS",
                "outbound_date": "2026-09-10",
            }),
        )
        .unwrap();

        let params: OneWayParams = args.deserialize().unwrap();
        assert_eq!(params.adults, 1);
        assert_eq!(params.currency, "USD");
        assert_eq!(params.hl, "en");
    }

    #[test]
    fn test_query_marks_one_way() {
        let params = OneWayParams {
            departure_id: "ZRH".to_string(),
            arrival_id: "LIS".to_string(),
            outbound_date: "2026-09-10".to_string(),
            adults: 2,
            currency: "EUR".to_string(),
            hl: "de".to_string(),
        };

        let query = FlightSearchOneWayTool::query(&params);
        assert!(query.contains(&("type".to_string(), "2".to_string())));
        assert!(query.contains(&("adults".to_string(), "2".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "return_date"));
    }
}
