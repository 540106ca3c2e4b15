//! MCP tools backed by the GlobalData APIs
//!
//! Each tool is a thin handler: decode arguments, validate dates, normalize
//! source types, then hand the call to the unit's [`SourceContext`].
//!
//! [`SourceContext`]: crate::context::SourceContext

pub mod ai_hub;
pub mod social_media;

#[cfg(test)]
pub(crate) mod test_support;

pub use ai_hub::{AiHubQuestionTool, AiHubSourceDataTool, ai_hub_registry};
pub use social_media::{InfluencerListingTool, KeywordDateRangeTool, social_media_registry};

use serde_json::{Value, json};

/// JSON Schema fragment for a `DD-MM-YYYY` date argument
pub(crate) fn date_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "pattern": "^[0-9]{2}-[0-9]{2}-[0-9]{4}$"
    })
}
