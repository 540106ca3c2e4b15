//! Upstream URL composition
//!
//! Every value is percent-encoded the same way: RFC 3986 unreserved
//! characters and `/` pass through, everything else (space included) becomes
//! `%XX`. Output depends only on the endpoint and the parameters.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::time::Duration;

use crate::config::Credential;
use crate::endpoint::{AuthScheme, EndpointDescriptor, QueryComposition};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

const REDACTED: &str = "***";

/// Logical parameters of one tool call
///
/// Only the fields an endpoint understands are emitted; unset fields are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub keyword: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub question: Option<String>,
    pub source_type: Option<String>,
    pub chunk_size: Option<u32>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyword plus date range, as taken by the social-media tools
    pub fn keyword_range(
        keyword: impl Into<String>,
        from_date: impl Into<String>,
        to_date: impl Into<String>,
    ) -> Self {
        Self {
            keyword: Some(keyword.into()),
            from_date: Some(from_date.into()),
            to_date: Some(to_date.into()),
            ..Self::default()
        }
    }

    /// Question plus normalized source types, as taken by the AI Hub tools
    pub fn question(question: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            source_type: Some(source_type.into()),
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_dates(mut self, from_date: impl Into<String>, to_date: impl Into<String>) -> Self {
        self.from_date = Some(from_date.into());
        self.to_date = Some(to_date.into());
        self
    }
}

/// A fully built upstream request
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// URL with encoded query string, credential included when query-borne
    pub url: String,
    /// Same URL with the credential masked, for logs and error messages
    pub redacted_url: String,
    /// Bearer credential for the `Authorization` header
    pub bearer: Option<Credential>,
    pub timeout: Option<Duration>,
}

/// Composes upstream requests for one unit
///
/// Holds the unit's static credential and display name.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credential: Credential,
    display_name: String,
}

impl RequestBuilder {
    pub fn new(credential: Credential, display_name: impl Into<String>) -> Self {
        Self {
            credential,
            display_name: display_name.into(),
        }
    }

    /// Build the request for `endpoint` with `params`
    pub fn build(&self, endpoint: &EndpointDescriptor, params: &QueryParams) -> UpstreamRequest {
        let pairs = match endpoint.composition {
            QueryComposition::Ordered {
                add_frequency,
                keyword_before_dates,
            } => self.ordered_pairs(params, add_frequency, keyword_before_dates),
            QueryComposition::KeyValue => key_value_pairs(params),
        };

        let (url, redacted_url, bearer) = match endpoint.auth {
            AuthScheme::TokenQuery => {
                let token = ("TokenID", self.credential.expose().to_string());
                let masked = ("TokenID", REDACTED.to_string());
                (
                    compose(&endpoint.url, std::iter::once(&token).chain(&pairs)),
                    compose(&endpoint.url, std::iter::once(&masked).chain(&pairs)),
                    None,
                )
            }
            AuthScheme::BearerHeader => {
                let url = compose(&endpoint.url, &pairs);
                (url.clone(), url, Some(self.credential.clone()))
            }
        };

        UpstreamRequest {
            url,
            redacted_url,
            bearer,
            timeout: endpoint.timeout,
        }
    }

    fn ordered_pairs(
        &self,
        params: &QueryParams,
        add_frequency: bool,
        keyword_before_dates: bool,
    ) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("DisplayName", self.display_name.clone())];

        if add_frequency {
            pairs.push(("Frequency", "Day".to_string()));
        }

        if let Some(keyword) = &params.keyword {
            pairs.push(("SiteName", "Disruptor".to_string()));
            pairs.push(("Source", "All".to_string()));
            pairs.push(("Sentiment", "All".to_string()));

            // The keyword block is only meaningful with a complete date range.
            if let (Some(from), Some(to)) = (&params.from_date, &params.to_date) {
                let keyword = ("Keyword", keyword.clone());
                let from = ("FromDate", from.clone());
                let to = ("ToDate", to.clone());
                if keyword_before_dates {
                    pairs.extend([keyword, from, to]);
                } else {
                    pairs.extend([from, to, keyword]);
                }
            }
        }

        pairs
    }
}

fn key_value_pairs(params: &QueryParams) -> Vec<(&'static str, String)> {
    [
        ("SourceType", params.source_type.clone()),
        ("Question", params.question.clone()),
        ("ChunkSize", params.chunk_size.map(|n| n.to_string())),
        ("DateStart", params.from_date.clone()),
        ("DateEnd", params.to_date.clone()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v)))
    .collect()
}

fn compose<'a, I>(base: &str, pairs: I) -> String
where
    I: IntoIterator<Item = &'a (&'static str, String)>,
{
    let query = pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_VALUE),
                utf8_percent_encode(value, QUERY_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}
