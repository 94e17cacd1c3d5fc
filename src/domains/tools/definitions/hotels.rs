//! Hotel search backed by the SerpApi Google Hotels engine.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::search::SerpApiClient;
use crate::domains::tools::ToolError;

const ENGINE: &str = "google_hotels";

/// Validated parameters for a hotel search.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearchParams {
    pub q: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub adults: Option<i64>,
    pub children: Option<i64>,
    pub rooms: Option<i64>,
    pub currency: String,
    pub hl: String,
}

/// Search hotels matching a free-text query over a date range.
pub struct HotelSearchTool {
    client: Arc<SerpApiClient>,
}

impl HotelSearchTool {
    pub const NAME: &'static str = "hotel_search";
    pub const DESCRIPTION: &'static str =
        "Search for hotels matching a query for the given check-in and check-out dates";

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
                FieldSpec::required("q", FieldKind::String)
                    .description("Search query (e.g., 'hotels in Lisbon')"),
            )
            .field(
                FieldSpec::required("check_in_date", FieldKind::String)
                    .description("Check-in date, YYYY-MM-DD"),
            )
            .field(
                FieldSpec::required("check_out_date", FieldKind::String)
                    .description("Check-out date, YYYY-MM-DD"),
            )
            .field(
                FieldSpec::optional("adults", FieldKind::Integer)
                    .description("Number of adult guests"),
            )
            .field(
                FieldSpec::optional("children", FieldKind::Integer)
                    .description("Number of child guests"),
            )
            .field(FieldSpec::optional("rooms", FieldKind::Integer).description("Number of rooms"))
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

    /// Build the SerpApi query. Optional occupancy fields that were not
    /// provided are omitted entirely rather than sent as empty values.
    fn query(params: &HotelSearchParams) -> Vec<(String, String)> {
        let mut query = vec![
            ("q".to_string(), params.q.clone()),
            ("check_in_date".to_string(), params.check_in_date.clone()),
            ("check_out_date".to_string(), params.check_out_date.clone()),
            ("currency".to_string(), params.currency.clone()),
            ("hl".to_string(), params.hl.clone()),
        ];

        if let Some(adults) = params.adults {
            query.push(("adults".to_string(), adults.to_string()));
        }
        if let Some(children) = params.children {
            query.push(("children".to_string(), children.to_string()));
        }
        if let Some(rooms) = params.rooms {
            query.push(("rooms".to_string(), rooms.to_string()));
        }

        query
    }
}

#[async_trait::async_trait]
impl ToolHandler for HotelSearchTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: HotelSearchParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        info!(
            "Searching hotels: '{}' ({} -> {})",
            params.q, params.check_in_date, params.check_out_date
        );

        let results = self.client.search(ENGINE, Self::query(&params)).await?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::validate;

    fn base_params() -> HotelSearchParams {
        HotelSearchParams {
            q: "hotels in Lisbon".to_string(),
            check_in_date: "2026-09-10".to_string(),
            check_out_date: "2026-09-12".to_string(),
            adults: None,
            children: None,
            rooms: None,
            currency: "USD".to_string(),
            hl: "en".to_string(),
        }
    }

    #[test]
    fn test_absent_occupancy_fields_omitted_from_query() {
        let query = HotelSearchTool::query(&base_params());
        assert!(!query.iter().any(|(k, _)| k == "adults"));
        assert!(!query.iter().any(|(k, _)| k == "children"));
        assert!(!query.iter().any(|(k, _)| k == "rooms"));
    }

    #[test]
    fn test_present_occupancy_fields_included() {
        let mut params = base_params();
        params.adults = Some(2);
        params.rooms = Some(1);

        let query = HotelSearchTool::query(&params);
        assert!(query.contains(&("adults".to_string(), "2".to_string())));
        assert!(query.contains(&("rooms".to_string(), "1".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "children"));
    }

    #[test]
    fn test_validation_fills_currency_and_language() {
        let args = validate(
            &HotelSearchTool::schema(),
            &json!({
                "q": "hotels in Porto",
                "check_in_date": "2026-09-10",
                "check_out_date": "2026-09-12",
            }),
        )
        .unwrap();

        let params: HotelSearchParams = args.deserialize().unwrap();
        assert_eq!(params.currency, "USD");
        assert_eq!(params.hl, "en");
        assert!(params.adults.is_none());
    }
}
