//! AI Hub question-answering tools

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
use crate::error::SourceError;
use crate::request::QueryParams;
use crate::source_type::normalize_source_type;

const SOURCE_TYPES_EXPLAINED: &str = "\
Choose the most relevant source types for the question.
Source types explained:
- SocialMedia: social media data for the question
- News: news database
- Deals: transactions such as M&A, investments, partnerships and mergers
- Filings: company disclosures such as annual reports and earnings releases
- Companies: business descriptions of companies
Also accepted: Jobs, Events, Reports, Patents, Research, Financials.
For multiple types use a comma separator, e.g. Deals,News,Filings.";

fn source_type_schema() -> Value {
    json!({
        "type": "string",
        "description": "Comma-separated source types, e.g. News,Deals"
    })
}

fn question_schema() -> Value {
    json!({
        "type": "string",
        "description": "Natural-language question, e.g. What is walmart doing in sustainability?"
    })
}

#[derive(Debug, Deserialize)]
struct QuestionArgs {
    question: String,
    source_type: String,
}

/// `GetAIHubApi`: answer a question from the selected source types
pub struct AiHubQuestionTool {
    context: SourceContext,
    description: String,
}

impl AiHubQuestionTool {
    pub fn new(context: SourceContext) -> Self {
        Self {
            context,
            description: format!(
                "Query the GlobalData AI Hub with a question over the chosen source types. \
                 Use this for background information on factual questions, e.g. \
                 \"What is walmart doing in sustainability\".\n{SOURCE_TYPES_EXPLAINED}"
            ),
        }
    }
}

#[async_trait]
impl Tool for AiHubQuestionTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let args: QuestionArgs = serde_json::from_value(params)?;
        let query = QueryParams::question(args.question, normalize_source_type(&args.source_type));
        Ok(self.context.invoke(names::AI_HUB, &query).await)
    }

    fn name(&self) -> &str {
        names::AI_HUB
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": question_schema(),
                "source_type": source_type_schema()
            },
            "required": ["question", "source_type"]
        })
    }
}

#[derive(Debug, Deserialize)]
struct SourceDataArgs {
    question: String,
    source_type: String,
    chunk_size: i64,
    date_start: String,
    date_end: String,
}

/// `GetAIHubAPISourceData`: source passages for a question within a date range
pub struct AiHubSourceDataTool {
    context: SourceContext,
    description: String,
}

impl AiHubSourceDataTool {
    pub fn new(context: SourceContext) -> Self {
        Self {
            context,
            description: format!(
                "Fetch source passages from the GlobalData AI Hub for a question, limited to \
                 a date range. date_start and date_end must be in DD-MM-YYYY format. \
                 chunk_size is the number of chunks of background information to load \
                 (typically 30).\n{SOURCE_TYPES_EXPLAINED}"
            ),
        }
    }

    fn query(args: SourceDataArgs) -> std::result::Result<QueryParams, SourceError> {
        validate_range(&args.date_start, &args.date_end)?;
        let chunk_size = u32::try_from(args.chunk_size)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(SourceError::InvalidChunkSize(args.chunk_size))?;

        Ok(
            QueryParams::question(args.question, normalize_source_type(&args.source_type))
                .with_chunk_size(chunk_size)
                .with_dates(args.date_start, args.date_end),
        )
    }
}

#[async_trait]
impl Tool for AiHubSourceDataTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let args: SourceDataArgs = serde_json::from_value(params)?;

        match Self::query(args) {
            Ok(query) => Ok(self.context.invoke(names::AI_HUB_SOURCE_DATA, &query).await),
            Err(e) => Ok(SourceContext::rejected(names::AI_HUB_SOURCE_DATA, &e)),
        }
    }

    fn name(&self) -> &str {
        names::AI_HUB_SOURCE_DATA
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": question_schema(),
                "source_type": source_type_schema(),
                "chunk_size": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Number of chunks of background information to load (typically 30)"
                },
                "date_start": date_schema("Start date (DD-MM-YYYY)"),
                "date_end": date_schema("End date (DD-MM-YYYY)")
            },
            "required": ["question", "source_type", "chunk_size", "date_start", "date_end"]
        })
    }
}

/// Both AI Hub tools
pub fn ai_hub_registry(context: &SourceContext) -> ToolRegistry {
    ToolRegistry::new()
        .with_tool(Arc::new(AiHubQuestionTool::new(context.clone())))
        .with_tool(Arc::new(AiHubSourceDataTool::new(context.clone())))
}
