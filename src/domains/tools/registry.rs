//! Registry assembly - wires every tool definition into the shared registry.

use std::sync::Arc;

use tracing::info;

use crate::core::config::Config;
use crate::core::registry::{RegistryError, ToolRegistry};
use crate::domains::search::SerpApiClient;
use crate::domains::tools::definitions::{
    CloudRunServicesTool, FlightSearchOneWayTool, FlightSearchRoundTripTool, GreetFullNameTool,
    GreetTool, GroupGreetingTool, HotelSearchTool, ServerMetaTool,
};

/// Build the tool registry from the configuration.
///
/// Runs once at startup; any registration error aborts initialization.
pub fn build_registry(config: Arc<Config>) -> Result<ToolRegistry, RegistryError> {
    let client = Arc::new(SerpApiClient::new(config.credentials.serp_api_key.clone()));
    if !client.has_api_key() {
        info!("SERP_API_KEY not set; flight and hotel searches will fail until configured");
    }

    let mut registry = ToolRegistry::new();

    registry.register(FlightSearchOneWayTool::descriptor(client.clone()))?;
    registry.register(FlightSearchRoundTripTool::descriptor(client.clone()))?;
    registry.register(HotelSearchTool::descriptor(client))?;
    registry.register(ServerMetaTool::descriptor(config.clone()))?;
    registry.register(GreetTool::descriptor())?;
    registry.register(GreetFullNameTool::descriptor())?;
    registry.register(GroupGreetingTool::descriptor())?;
    registry.register(CloudRunServicesTool::descriptor(config))?;

    Ok(registry)
}
