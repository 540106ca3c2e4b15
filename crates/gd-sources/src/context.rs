//! Shared state of one deployable unit
//!
//! Endpoint table, request builder and HTTP client are built once at
//! startup and shared read-only by every tool of the unit.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::UpstreamClient;
use crate::config::SourceConfig;
use crate::endpoint::EndpointTable;
use crate::envelope::{error_envelope, normalize};
use crate::error::{Result, SourceError};
use crate::request::{QueryParams, RequestBuilder};

/// Everything a tool needs to reach its endpoint
#[derive(Debug, Clone)]
pub struct SourceContext {
    endpoints: Arc<EndpointTable>,
    builder: Arc<RequestBuilder>,
    client: Arc<UpstreamClient>,
}

impl SourceContext {
    pub fn new(endpoints: EndpointTable, builder: RequestBuilder, client: UpstreamClient) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
            builder: Arc::new(builder),
            client: Arc::new(client),
        }
    }

    /// Context for the social-media unit (`TokenID` auth)
    pub fn social_media(config: &SourceConfig) -> Result<Self> {
        let credential = config.social_credential()?.clone();
        Ok(Self::new(
            EndpointTable::social_media(config),
            RequestBuilder::new(credential, config.display_name.clone()),
            UpstreamClient::new()?,
        ))
    }

    /// Context for the AI Hub unit (bearer auth)
    pub fn ai_hub(config: &SourceConfig) -> Result<Self> {
        let credential = config.aihub_credential()?.clone();
        Ok(Self::new(
            EndpointTable::ai_hub(config),
            RequestBuilder::new(credential, config.display_name.clone()),
            UpstreamClient::new()?,
        ))
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Call the endpoint behind `tool` and return its envelope
    ///
    /// Never fails: every error becomes `{"error": message}`.
    pub async fn invoke(&self, tool: &str, params: &QueryParams) -> Value {
        match self.try_invoke(tool, params).await {
            Ok(value) => value,
            Err(e) => {
                warn!("{} failed: {}", tool, e);
                error_envelope(&e)
            }
        }
    }

    async fn try_invoke(&self, tool: &str, params: &QueryParams) -> Result<Value> {
        let endpoint = self.endpoints.get(tool)?;
        let request = self.builder.build(endpoint, params);
        debug!(tool, url = %request.redacted_url, "Calling upstream");

        let payload = self.client.fetch(&request).await?;
        Ok(normalize(payload, endpoint.shape))
    }

    /// Envelope for a call rejected before any request was made
    pub fn rejected(tool: &str, err: &SourceError) -> Value {
        debug!("{} rejected: {}", tool, err);
        error_envelope(err)
    }
}
