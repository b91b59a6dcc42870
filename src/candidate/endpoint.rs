//! Candidate base URLs and probe endpoint derivation.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A URL considered as a possible live API base address.
///
/// Identity is the exact string: two candidates are equal only if their
/// URLs are byte-for-byte identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Wrap a URL string without normalizing it.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Build `scheme://host:port{api_path}`.
    pub fn from_parts(scheme: &str, host: &str, port: u16, api_path: &str) -> Self {
        Self(format!("{}://{}:{}{}", scheme, host, port, api_path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Host component, if the candidate parses as a URL.
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.0)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Derive a probe endpoint by replacing the trailing API path segment.
    ///
    /// `http://10.0.0.5/api` with api path `/api` and probe path `/ping`
    /// becomes `http://10.0.0.5/ping`. Candidates without the API suffix
    /// get the probe path appended.
    pub fn probe_url(&self, api_path: &str, probe_path: &str) -> String {
        let trimmed = self.0.trim_end_matches('/');
        let api_path = api_path.trim_end_matches('/');
        let base = if api_path.is_empty() {
            trimmed
        } else {
            trimmed.strip_suffix(api_path).unwrap_or(trimmed)
        };
        format!("{}{}", base, probe_path)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Candidate {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
