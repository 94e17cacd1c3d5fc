//! Cloud Run service listing via the `gcloud` CLI.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::info;

use crate::core::config::Config;
use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::tools::ToolError;

const GCLOUD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct CloudRunParams {
    project: Option<String>,
    region: Option<String>,
}

/// List Cloud Run services in a project and region by shelling out to
/// `gcloud`. The project can come from the arguments or from
/// `GOOGLE_CLOUD_PROJECT`; without either the call fails up front.
pub struct CloudRunServicesTool {
    config: Arc<Config>,
}

impl CloudRunServicesTool {
    pub const NAME: &'static str = "cloud_run_services";
    pub const DESCRIPTION: &'static str =
        "List Cloud Run services in a Google Cloud project and region";

    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn descriptor(config: Arc<Config>) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self::new(config)),
        )
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new()
            .field(
                FieldSpec::optional("project", FieldKind::String)
                    .description("Google Cloud project ID (defaults to GOOGLE_CLOUD_PROJECT)"),
            )
            .field(
                FieldSpec::optional("region", FieldKind::String)
                    .description("Cloud Run region (defaults to the configured region)"),
            )
    }

    /// Arguments passed to the `gcloud` binary.
    fn gcloud_args(project: &str, region: &str) -> Vec<String> {
        vec![
            "run".to_string(),
            "services".to_string(),
            "list".to_string(),
            "--project".to_string(),
            project.to_string(),
            "--region".to_string(),
            region.to_string(),
            "--format".to_string(),
            "json".to_string(),
        ]
    }
}

#[async_trait::async_trait]
impl ToolHandler for CloudRunServicesTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: CloudRunParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let project = params
            .project
            .or_else(|| self.config.cloud_run.project.clone())
            .ok_or_else(|| {
                ToolError::invalid_arguments(
                    "no project given and GOOGLE_CLOUD_PROJECT is not set",
                )
            })?;
        let region = params
            .region
            .unwrap_or_else(|| self.config.cloud_run.region.clone());

        info!("Listing Cloud Run services: project={project} region={region}");

        let command = Command::new(&self.config.cloud_run.gcloud_bin)
            .args(Self::gcloud_args(&project, &region))
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(Duration::from_secs(GCLOUD_TIMEOUT_SECS), command)
            .await
            .map_err(|_| ToolError::Timeout(GCLOUD_TIMEOUT_SECS))?
            .map_err(|e| ToolError::execution_failed(format!("failed to run gcloud: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::execution_failed(format!(
                "gcloud exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let services: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| ToolError::execution_failed(format!("unparseable gcloud output: {e}")))?;
        let count = services.as_array().map(Vec::len).unwrap_or(0);

        Ok(json!({
            "project": project,
            "region": region,
            "count": count,
            "services": services,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::validate;

    #[test]
    fn test_gcloud_args_shape() {
        let args = CloudRunServicesTool::gcloud_args("demo-project", "europe-west1");
        assert_eq!(args[..3], ["run", "services", "list"]);
        assert!(args.windows(2).any(|w| w == ["--project", "demo-project"]));
        assert!(args.windows(2).any(|w| w == ["--region", "europe-west1"]));
        assert!(args.windows(2).any(|w| w == ["--format", "json"]));
    }

    #[tokio::test]
    async fn test_missing_project_rejected() {
        let mut config = Config::default();
        config.cloud_run.project = None;
        let tool = CloudRunServicesTool::new(Arc::new(config));

        let args = validate(&CloudRunServicesTool::schema(), &json!({})).unwrap();
        let err = tool.call(args).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_schema_fields_optional() {
        let rendered = CloudRunServicesTool::schema().to_json_schema();
        assert_eq!(rendered["required"], json!([]));
    }
}
