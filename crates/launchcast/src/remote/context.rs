//! Request-scoped context for a run
//!
//! Carries who asked for the run and where the invocation came from. It is
//! created once per invocation and passed explicitly to the collaborators
//! that need it.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Base URL that bare query strings are resolved against
const QUERY_BASE: &str = "http://localhost/";

/// Traffic-attribution tags captured from the invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
}

impl Attribution {
    /// Extract `utm_source`, `utm_medium` and `utm_campaign` from a link.
    ///
    /// Accepts a full URL or a bare query string with or without the leading
    /// `?`. Values are percent-decoded. Unknown keys are ignored.
    pub fn from_query(link: &str) -> Self {
        let link = link.trim();
        let url = Url::parse(link).or_else(|_| {
            let query = link.strip_prefix('?').unwrap_or(link);
            Url::parse(&format!("{QUERY_BASE}?{query}"))
        });
        let Ok(url) = url else {
            return Self::default();
        };

        let mut attribution = Self::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "utm_source" => &mut attribution.source,
                "utm_medium" => &mut attribution.medium,
                "utm_campaign" => &mut attribution.campaign,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        attribution
    }

    /// Fill unset tags from `other`
    pub fn or(self, other: Attribution) -> Self {
        Self {
            source: self.source.or(other.source),
            medium: self.medium.or(other.medium),
            campaign: self.campaign.or(other.campaign),
        }
    }
}

/// Who submitted the run and how they reached the tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub submitter: Option<String>,
    pub profile_url: Option<String>,
    pub attribution: Attribution,
}
