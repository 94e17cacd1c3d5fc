//! Server metadata tool.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::config::Config;
use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{ToolSchema, ValidatedArgs};
use crate::domains::tools::ToolError;

/// Report the server's name, description, and version.
pub struct ServerMetaTool {
    config: Arc<Config>,
}

impl ServerMetaTool {
    pub const NAME: &'static str = "server_meta";
    pub const DESCRIPTION: &'static str = "Report the server's name, description, and version";

    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn descriptor(config: Arc<Config>) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ToolSchema::new(),
            Arc::new(Self::new(config)),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for ServerMetaTool {
    async fn call(&self, _args: ValidatedArgs) -> Result<Value, ToolError> {
        Ok(json!({
            "name": self.config.server.name,
            "description": self.config.server.description,
            "version": self.config.server.version,
        }))
    }
}
