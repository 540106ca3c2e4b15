//! GlobalData data-provider APIs exposed as MCP tools
//!
//! This crate turns a handful of logical parameters (keyword, date range,
//! source types, chunk size) into correctly encoded GlobalData requests and
//! folds the heterogeneous responses into one envelope shape:
//!
//! - `source_type`: canonicalizes comma-separated source-type tags
//! - `date`: strict `DD-MM-YYYY` validation
//! - `endpoint`: the static tool → upstream endpoint table
//! - `request`: URL composition (ordered or key-value) with percent-encoding
//! - `client`: the single upstream GET per call
//! - `envelope`: `{result: ...}` / `{error: ...}` shaping
//! - `tools`: one MCP tool per upstream operation
//!
//! Two deployable units are built from it: `social-server` (social media
//! analytics, `TokenID` auth) and `aihub-server` (AI Hub, bearer auth).
//!
//! # Example
//!
//! ```rust,ignore
//! use gd_sources::{SourceConfig, SourceContext, tools};
//!
//! let config = SourceConfig::load(None)?;
//! let context = SourceContext::social_media(&config)?;
//! let registry = tools::social_media_registry(&context);
//! assert_eq!(registry.len(), 9);
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod date;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod request;
pub mod source_type;
pub mod tools;

pub use client::UpstreamClient;
pub use config::{Credential, SourceConfig};
pub use context::SourceContext;
pub use endpoint::{AuthScheme, EndpointDescriptor, EndpointTable, QueryComposition, ResponseShape};
pub use envelope::UpstreamPayload;
pub use error::{Result, SourceError};
pub use request::{QueryParams, RequestBuilder, UpstreamRequest};
