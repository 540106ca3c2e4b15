//! Static tool → upstream endpoint table
//!
//! Which URL a tool hits, how its query string is composed, how it
//! authenticates and how its response is shaped are properties of the
//! endpoint, fixed at startup. Nothing here depends on call input.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::error::{Result, SourceError};

/// Path prefix of the social-media analytics API
pub const SOCIAL_MEDIA_PATH: &str = "/GlobalDataSocialMedia/api/Content";

/// Path prefix of the AI Hub API
pub const AI_HUB_PATH: &str = "/GlobalDataAIHub/api/Content";

/// Tool names exposed to the invoking agent
pub mod names {
    pub const WEB_SEARCH: &str = "web_search";
    pub const TIMELINE_DATA: &str = "GetTimelineData";
    pub const TOP_CONCEPTS: &str = "GetTopConcepts";
    pub const TOP_COMPANIES: &str = "GetTopCompanies";
    pub const TOP_THEMES: &str = "GetTopThemes";
    pub const TOP_HASHTAGS: &str = "GetTopHashtags";
    pub const TOP_CONTRIBUTORS: &str = "GetTopContributors";
    pub const SOCIAL_MEDIA_POSTS: &str = "GetSocialMediaPosts";
    pub const INFLUENCER_LISTING: &str = "GetInfluencerListing";
    pub const AI_HUB: &str = "GetAIHubApi";
    pub const AI_HUB_SOURCE_DATA: &str = "GetAIHubAPISourceData";
}

/// How the credential travels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `TokenID=<token>` as the first query parameter
    TokenQuery,
    /// `Authorization: bearer <token>` header
    BearerHeader,
}

/// How the query string is composed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryComposition {
    /// Fixed literal order expected by the social-media API
    Ordered {
        /// Append `Frequency=Day`
        add_frequency: bool,
        /// Emit the keyword before the date range instead of after it
        keyword_before_dates: bool,
    },
    /// Plain key-value encoding, in insertion order
    KeyValue,
}

/// How a successful response is turned into the tool result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Return the parsed JSON unchanged
    Passthrough,
    /// Wrap under `result`; sequences go under `list_key`
    Wrapped { list_key: &'static str },
}

/// One upstream operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Tool name exposed to the agent
    pub tool: &'static str,
    /// Upstream operation name (last path segment)
    pub operation: &'static str,
    /// Full URL without query string
    pub url: String,
    pub composition: QueryComposition,
    pub auth: AuthScheme,
    pub shape: ResponseShape,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

const ORDERED: QueryComposition = QueryComposition::Ordered {
    add_frequency: false,
    keyword_before_dates: false,
};

const SOCIAL_MEDIA_ENDPOINTS: &[(&str, &str, QueryComposition, ResponseShape)] = &[
    (names::WEB_SEARCH, "GetOverallData", ORDERED, ResponseShape::Passthrough),
    (
        names::TIMELINE_DATA,
        "GetTimelineData",
        QueryComposition::Ordered {
            add_frequency: true,
            keyword_before_dates: false,
        },
        ResponseShape::Passthrough,
    ),
    (
        names::TOP_CONCEPTS,
        "GetTopConcepts",
        QueryComposition::Ordered {
            add_frequency: false,
            keyword_before_dates: true,
        },
        ResponseShape::Passthrough,
    ),
    (names::TOP_COMPANIES, "GetTopCompanies", ORDERED, ResponseShape::Passthrough),
    (names::TOP_THEMES, "GetTopThemes", ORDERED, ResponseShape::Passthrough),
    (names::TOP_HASHTAGS, "GetTopHashtags", ORDERED, ResponseShape::Passthrough),
    (names::TOP_CONTRIBUTORS, "GetTopContributors", ORDERED, ResponseShape::Passthrough),
    (names::SOCIAL_MEDIA_POSTS, "GetSocialMediaPosts", ORDERED, ResponseShape::Passthrough),
    (
        names::INFLUENCER_LISTING,
        "GetInfluencerListing",
        ORDERED,
        ResponseShape::Wrapped {
            list_key: "influencers",
        },
    ),
];

const AI_HUB_ENDPOINTS: &[(&str, &str)] = &[
    (names::AI_HUB, "GetAIHubAPI"),
    (names::AI_HUB_SOURCE_DATA, "GetAIHubAPISourceData"),
];

/// Read-only table of the endpoints served by one unit
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    endpoints: BTreeMap<&'static str, EndpointDescriptor>,
}

impl EndpointTable {
    /// Endpoints of the social-media analytics unit
    pub fn social_media(config: &SourceConfig) -> Self {
        let prefix = format!("{}{SOCIAL_MEDIA_PATH}", config.base_url());
        let timeout = config.social_timeout();

        SOCIAL_MEDIA_ENDPOINTS
            .iter()
            .map(|&(tool, operation, composition, shape)| EndpointDescriptor {
                tool,
                operation,
                url: format!("{prefix}/{operation}"),
                composition,
                auth: AuthScheme::TokenQuery,
                shape,
                timeout,
            })
            .collect()
    }

    /// Endpoints of the AI Hub unit
    pub fn ai_hub(config: &SourceConfig) -> Self {
        let prefix = format!("{}{AI_HUB_PATH}", config.base_url());
        let timeout = config.aihub_timeout();

        AI_HUB_ENDPOINTS
            .iter()
            .map(|&(tool, operation)| EndpointDescriptor {
                tool,
                operation,
                url: format!("{prefix}/{operation}"),
                composition: QueryComposition::KeyValue,
                auth: AuthScheme::BearerHeader,
                shape: ResponseShape::Passthrough,
                timeout,
            })
            .collect()
    }

    /// Look up the endpoint behind a tool
    pub fn get(&self, tool: &str) -> Result<&EndpointDescriptor> {
        self.endpoints
            .get(tool)
            .ok_or_else(|| SourceError::UnknownEndpoint(tool.to_string()))
    }

    /// Iterate endpoints in tool-name order
    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.values()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl FromIterator<EndpointDescriptor> for EndpointTable {
    fn from_iter<I: IntoIterator<Item = EndpointDescriptor>>(iter: I) -> Self {
        Self {
            endpoints: iter.into_iter().map(|e| (e.tool, e)).collect(),
        }
    }
}
