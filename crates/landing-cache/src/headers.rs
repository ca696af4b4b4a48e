//! Response cache headers.

use crate::policy::RouteCachePolicy;
use crate::revalidate::CacheStatus;

/// Header names emitted by the landing page.
pub mod header_names {
    /// Whether the product document came from the cache (HIT, MISS).
    pub const X_CACHE_STATUS: &str = "x-cache-status";
    /// Age of the cached product document in seconds.
    pub const X_CACHE_AGE: &str = "x-cache-age";
    /// Request ID for log correlation.
    pub const X_REQUEST_ID: &str = "x-request-id";
}

/// Builder for cache response headers.
#[derive(Debug, Default)]
pub struct CacheHeadersBuilder {
    cache_control: Option<String>,
    vary: Option<String>,
    etag: Option<String>,
    status: Option<CacheStatus>,
    age: Option<u64>,
}

impl CacheHeadersBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Cache-Control and Vary from a policy.
    pub fn from_policy(mut self, policy: &RouteCachePolicy) -> Self {
        self.cache_control = Some(policy.cache_control_header());
        self.vary = policy.vary_header();
        self
    }

    /// Set an ETag computed from the given content.
    pub fn etag_for(mut self, content: &str) -> Self {
        self.etag = Some(generate_etag(content));
        self
    }

    /// Report how the product document was obtained.
    pub fn cache_status(mut self, status: CacheStatus, age_secs: u64) -> Self {
        self.status = Some(status);
        self.age = Some(age_secs);
        self
    }

    /// Build the headers.
    pub fn build(self) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        if let Some(cc) = self.cache_control {
            headers.push(("cache-control".to_string(), cc));
        }
        if let Some(vary) = self.vary {
            headers.push(("vary".to_string(), vary));
        }
        if let Some(etag) = self.etag {
            headers.push(("etag".to_string(), format!("\"{}\"", etag)));
        }
        if let Some(status) = self.status {
            headers.push((header_names::X_CACHE_STATUS.to_string(), status.to_string()));
        }
        if let Some(age) = self.age {
            headers.push((header_names::X_CACHE_AGE.to_string(), age.to_string()));
        }

        headers
    }
}

/// Generate a weak-collision ETag from content (FNV-1a, 64 bit).
///
/// Stable across processes, unlike `DefaultHasher`.
pub fn generate_etag(content: &str) -> String {
    let hash = content
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
        });
    format!("{:016x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_all_headers() {
        let policy = RouteCachePolicy::revalidate_every(Duration::from_secs(60));
        let headers = CacheHeadersBuilder::new()
            .from_policy(&policy)
            .etag_for("{}")
            .cache_status(CacheStatus::Hit, 12)
            .build();

        let get = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };

        assert_eq!(
            get("cache-control").as_deref(),
            Some("public, max-age=60, stale-while-revalidate=60")
        );
        assert_eq!(get("vary"), None);
        assert_eq!(get("x-cache-status").as_deref(), Some("HIT"));
        assert_eq!(get("x-cache-age").as_deref(), Some("12"));
        let etag = get("etag").unwrap();
        assert!(etag.starts_with('"') && etag.ends_with('"'));
    }

    #[test]
    fn test_etag_is_stable_and_content_sensitive() {
        assert_eq!(generate_etag("IELTS"), generate_etag("IELTS"));
        assert_ne!(generate_etag("IELTS"), generate_etag("IELTS Course"));
        assert_eq!(generate_etag("").len(), 16);
    }
}
