//! Social-media analytics tools
//!
//! Eight tools share the `Keyword` / `FromDate` / `ToDate` signature and
//! differ only in the endpoint they hit. `GetInfluencerListing` takes no
//! arguments.

use async_trait::async_trait;
use gd_core::Result;
use gd_tools::{Tool, ToolRegistry};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::date_schema;
use crate::context::SourceContext;
use crate::date::validate_range;
use crate::endpoint::names;
use crate::request::QueryParams;

const DATE_NOTE: &str = "FromDate and ToDate must be in DD-MM-YYYY format, e.g. 01-01-2024.";

const KEYWORD_RANGE_TOOLS: &[(&str, &str)] = &[
    (
        names::WEB_SEARCH,
        "Overall social-media coverage for a keyword over a date range: mention volume, \
         reach and sentiment summary.",
    ),
    (
        names::TIMELINE_DATA,
        "Daily timeline of social-media mentions for a keyword over a date range.",
    ),
    (
        names::TOP_CONCEPTS,
        "Top concepts discussed alongside a keyword on social media over a date range.",
    ),
    (
        names::TOP_COMPANIES,
        "Companies most mentioned alongside a keyword on social media over a date range.",
    ),
    (
        names::TOP_THEMES,
        "Top themes in social-media conversation about a keyword over a date range.",
    ),
    (
        names::TOP_HASHTAGS,
        "Most used hashtags in posts about a keyword over a date range.",
    ),
    (
        names::TOP_CONTRIBUTORS,
        "Accounts contributing most posts about a keyword over a date range.",
    ),
    (
        names::SOCIAL_MEDIA_POSTS,
        "Individual social-media posts mentioning a keyword over a date range.",
    ),
];

/// Arguments shared by the keyword/date-range tools
#[derive(Debug, Deserialize)]
struct KeywordRangeArgs {
    #[serde(rename = "Keyword")]
    keyword: String,
    #[serde(rename = "FromDate")]
    from_date: String,
    #[serde(rename = "ToDate")]
    to_date: String,
}

/// A social-media tool taking a keyword and a date range
pub struct KeywordDateRangeTool {
    name: &'static str,
    description: String,
    context: SourceContext,
}

impl KeywordDateRangeTool {
    pub fn new(name: &'static str, summary: &str, context: SourceContext) -> Self {
        Self {
            name,
            description: format!("{summary} {DATE_NOTE}"),
            context,
        }
    }
}

#[async_trait]
impl Tool for KeywordDateRangeTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let args: KeywordRangeArgs = serde_json::from_value(params)?;

        if let Err(e) = validate_range(&args.from_date, &args.to_date) {
            return Ok(SourceContext::rejected(self.name, &e));
        }

        let query = QueryParams::keyword_range(args.keyword, args.from_date, args.to_date);
        Ok(self.context.invoke(self.name, &query).await)
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "Keyword": {
                    "type": "string",
                    "description": "Keyword or phrase to search for"
                },
                "FromDate": date_schema("Start of the date range (DD-MM-YYYY)"),
                "ToDate": date_schema("End of the date range (DD-MM-YYYY)")
            },
            "required": ["Keyword", "FromDate", "ToDate"]
        })
    }
}

/// Influencers for the configured display name
pub struct InfluencerListingTool {
    context: SourceContext,
}

impl InfluencerListingTool {
    pub fn new(context: SourceContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for InfluencerListingTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        Ok(self
            .context
            .invoke(names::INFLUENCER_LISTING, &QueryParams::new())
            .await)
    }

    fn name(&self) -> &str {
        names::INFLUENCER_LISTING
    }

    fn description(&self) -> &str {
        "Fetch influencers for the configured DisplayName. Returns {\"result\": {...}}; \
         a plain list is returned under result.influencers."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
}

/// All nine social-media tools
pub fn social_media_registry(context: &SourceContext) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for &(name, summary) in KEYWORD_RANGE_TOOLS {
        registry.register(Arc::new(KeywordDateRangeTool::new(
            name,
            summary,
            context.clone(),
        )));
    }
    registry.register(Arc::new(InfluencerListingTool::new(context.clone())));
    registry
}
