//! Source-type canonicalization
//!
//! Callers pass a comma-separated list of content categories in whatever
//! case they like. The AI Hub expects only known categories, capitalized.

use std::fmt;

/// Content category queried by the AI Hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    News,
    Deals,
    Filings,
    Jobs,
    SocialMedia,
    Companies,
    Events,
    Reports,
    Patents,
    Research,
    Financials,
}

impl SourceType {
    /// Every accepted source type
    pub const ALL: [SourceType; 11] = [
        Self::News,
        Self::Deals,
        Self::Filings,
        Self::Jobs,
        Self::SocialMedia,
        Self::Companies,
        Self::Events,
        Self::Reports,
        Self::Patents,
        Self::Research,
        Self::Financials,
    ];

    /// Parse a single tag, ignoring case and surrounding whitespace
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Lowercase tag used for matching
    pub fn tag(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Deals => "deals",
            Self::Filings => "filings",
            Self::Jobs => "jobs",
            Self::SocialMedia => "socialmedia",
            Self::Companies => "companies",
            Self::Events => "events",
            Self::Reports => "reports",
            Self::Patents => "patents",
            Self::Research => "research",
            Self::Financials => "financials",
        }
    }

    /// Form sent upstream: first letter upper, rest lower
    pub fn canonical(self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Deals => "Deals",
            Self::Filings => "Filings",
            Self::Jobs => "Jobs",
            Self::SocialMedia => "Socialmedia",
            Self::Companies => "Companies",
            Self::Events => "Events",
            Self::Reports => "Reports",
            Self::Patents => "Patents",
            Self::Research => "Research",
            Self::Financials => "Financials",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Canonicalize a comma-separated list of source-type tags
///
/// Unknown tags are dropped without error; order and duplicates are kept.
///
/// ```
/// use gd_sources::source_type::normalize_source_type;
///
/// assert_eq!(normalize_source_type("news, XYZ, Deals"), "News,Deals");
/// assert_eq!(normalize_source_type(""), "");
/// ```
pub fn normalize_source_type(input: &str) -> String {
    input
        .split(',')
        .filter_map(SourceType::from_tag)
        .map(SourceType::canonical)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_valid_and_unknown() {
        assert_eq!(normalize_source_type("news, XYZ, Deals"), "News,Deals");
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            normalize_source_type("  FILINGS ,socialMedia,  companies  "),
            "Filings,Socialmedia,Companies"
        );
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(
            normalize_source_type("deals,news,deals"),
            "Deals,News,Deals"
        );
    }

    #[test]
    fn test_all_invalid_or_empty_yields_empty() {
        assert_eq!(normalize_source_type("foo,bar"), "");
        assert_eq!(normalize_source_type(""), "");
        assert_eq!(normalize_source_type(" , ,"), "");
    }

    #[test]
    fn test_every_allowed_tag_is_accepted() {
        let input = SourceType::ALL
            .iter()
            .map(|t| t.tag().to_uppercase())
            .collect::<Vec<_>>()
            .join(",");
        let output = normalize_source_type(&input);

        let parts: Vec<&str> = output.split(',').collect();
        assert_eq!(parts.len(), SourceType::ALL.len());
        for (part, source_type) in parts.iter().zip(SourceType::ALL) {
            assert_eq!(*part, source_type.canonical());
            let mut chars = part.chars();
            assert!(chars.next().is_some_and(|c| c.is_ascii_uppercase()));
            assert!(chars.all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(SourceType::from_tag(" Patents "), Some(SourceType::Patents));
        assert_eq!(SourceType::from_tag("social media"), None);
        assert_eq!(SourceType::Research.to_string(), "Research");
    }
}
