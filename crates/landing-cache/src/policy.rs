//! Route-level cache policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cache scope determining who can cache the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
    /// Cacheable by CDN and browser.
    Public,
    /// Cacheable by browser only.
    Private,
    /// No caching.
    #[default]
    None,
}

impl CacheScope {
    /// Get the Cache-Control directive for this scope.
    pub fn cache_control_directive(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::None => "no-store",
        }
    }
}

/// Route-level cache policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCachePolicy {
    /// Cache scope.
    pub scope: CacheScope,
    /// Time-to-live for cached responses.
    pub ttl: Duration,
    /// Stale-while-revalidate window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<Duration>,
    /// Request headers the response varies on.
    pub vary: Vec<String>,
}

impl Default for RouteCachePolicy {
    fn default() -> Self {
        Self {
            scope: CacheScope::None,
            ttl: Duration::from_secs(0),
            stale_while_revalidate: None,
            vary: Vec::new(),
        }
    }
}

impl RouteCachePolicy {
    /// Create a policy with no caching.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a public cache policy.
    pub fn public(ttl: Duration) -> Self {
        Self {
            scope: CacheScope::Public,
            ttl,
            ..Default::default()
        }
    }

    /// Public policy matching a revalidation interval: fresh for the
    /// interval, then served stale for one more interval while refreshed.
    pub fn revalidate_every(interval: Duration) -> Self {
        Self::public(interval).with_swr(interval)
    }

    /// Set stale-while-revalidate window.
    pub fn with_swr(mut self, duration: Duration) -> Self {
        self.stale_while_revalidate = Some(duration);
        self
    }

    /// Vary on a request header.
    pub fn vary_on(mut self, header: impl Into<String>) -> Self {
        self.vary.push(header.into());
        self
    }

    /// Generate Cache-Control header value.
    pub fn cache_control_header(&self) -> String {
        if self.scope == CacheScope::None {
            return "no-store".to_string();
        }

        let mut parts = vec![
            self.scope.cache_control_directive().to_string(),
            format!("max-age={}", self.ttl.as_secs()),
        ];

        if let Some(swr) = self.stale_while_revalidate {
            parts.push(format!("stale-while-revalidate={}", swr.as_secs()));
        }

        parts.join(", ")
    }

    /// Generate Vary header value.
    pub fn vary_header(&self) -> Option<String> {
        if self.vary.is_empty() {
            None
        } else {
            Some(self.vary.join(", "))
        }
    }
}
