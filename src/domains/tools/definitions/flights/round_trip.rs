//! Round-trip flight search.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::ENGINE;
use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::search::SerpApiClient;
use crate::domains::tools::ToolError;

/// Validated parameters for a round-trip search.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundTripParams {
    pub departure_id: String,
    pub arrival_id: String,
    pub outbound_date: String,
    pub return_date: String,
    pub adults: i64,
    pub currency: String,
    pub hl: String,
}

/// Search round-trip flights between two airports.
pub struct FlightSearchRoundTripTool {
    client: Arc<SerpApiClient>,
}

impl FlightSearchRoundTripTool {
    pub const NAME: &'static str = "flight_search_round_trip";
    pub const DESCRIPTION: &'static str =
        "Search for round-trip flights between two airports with outbound and return dates";

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
                FieldSpec::required("return_date", FieldKind::String)
                    .description("Return date, YYYY-MM-DD"),
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

    /// Build the SerpApi query for a round trip (`type` 1).
    fn query(params: &RoundTripParams) -> Vec<(String, String)> {
        vec![
            ("departure_id".to_string(), params.departure_id.clone()),
            ("arrival_id".to_string(), params.arrival_id.clone()),
            ("outbound_date".to_string(), params.outbound_date.clone()),
            ("return_date".to_string(), params.return_date.clone()),
            ("type".to_string(), "1".to_string()),
            ("adults".to_string(), params.adults.to_string()),
            ("currency".to_string(), params.currency.clone()),
            ("hl".to_string(), params.hl.clone()),
        ]
    }
}

#[async_trait::async_trait]
impl ToolHandler for FlightSearchRoundTripTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: RoundTripParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        info!(
            "Searching round-trip flights: {} <-> {} ({} / {})",
            params.departure_id, params.arrival_id, params.outbound_date, params.return_date
        );

        let results = self.client.search(ENGINE, Self::query(&params)).await?;
        Ok(results)
    }
}
