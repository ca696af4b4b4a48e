//! Per-request timing metrics.

use std::time::{Duration, Instant};

use landing_core::RequestId;
use serde::{Deserialize, Serialize};

/// Metrics for a single page request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestMetrics {
    /// Request ID for correlation.
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Time to shell flush (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_shell_us: Option<u64>,
    /// Time to first region (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_section_us: Option<u64>,
    /// Regions in the order they were sent.
    pub sections: Vec<SectionMetrics>,
    /// The upstream product fetch, if one happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchMetrics>,
    /// Total request duration (microseconds).
    pub total_duration_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Metrics for a single page region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionMetrics {
    pub name: String,
    /// Time from request start to region sent (microseconds).
    pub sent_us: u64,
    /// Render duration (microseconds).
    pub duration_us: u64,
    pub bytes: usize,
}

/// Metrics for the product document lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchMetrics {
    pub url: String,
    pub duration_us: u64,
    /// `HIT` or `MISS` when the lookup succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchMetrics {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Collector for request metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    request_id: RequestId,
    route: Option<String>,
    start: Instant,
    shell_sent: Option<Instant>,
    first_section_sent: Option<Instant>,
    pending: Vec<(String, Instant)>,
    sections: Vec<SectionMetrics>,
    fetch: Option<FetchMetrics>,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            route: None,
            start: Instant::now(),
            shell_sent: None,
            first_section_sent: None,
            pending: Vec::new(),
            sections: Vec::new(),
            fetch: None,
        }
    }

    /// Set route path.
    pub fn set_route(&mut self, route: impl Into<String>) {
        self.route = Some(route.into());
    }

    /// Record shell sent.
    pub fn record_shell_sent(&mut self) {
        self.shell_sent = Some(Instant::now());
    }

    /// Record that a region started rendering.
    pub fn record_section_start(&mut self, name: &str) {
        self.pending.push((name.to_string(), Instant::now()));
    }

    /// Record that a region was written.
    pub fn record_section_sent(&mut self, name: &str, bytes: usize) {
        let now = Instant::now();
        if self.first_section_sent.is_none() {
            self.first_section_sent = Some(now);
        }

        let started = match self.pending.iter().position(|(n, _)| n == name) {
            Some(index) => self.pending.remove(index).1,
            // Not started explicitly
            None => now,
        };

        self.sections.push(SectionMetrics {
            name: name.to_string(),
            sent_us: micros(now.duration_since(self.start)),
            duration_us: micros(now.duration_since(started)),
            bytes,
        });
    }

    /// Record a successful product lookup.
    pub fn record_fetch(
        &mut self,
        url: &str,
        duration: Duration,
        cache_status: impl Into<String>,
        response_bytes: usize,
    ) {
        self.fetch = Some(FetchMetrics {
            url: url.to_string(),
            duration_us: micros(duration),
            cache_status: Some(cache_status.into()),
            response_bytes: Some(response_bytes),
            error: None,
        });
    }

    /// Record a failed product lookup.
    pub fn record_fetch_error(&mut self, url: &str, duration: Duration, error: impl Into<String>) {
        self.fetch = Some(FetchMetrics {
            url: url.to_string(),
            duration_us: micros(duration),
            cache_status: None,
            response_bytes: None,
            error: Some(error.into()),
        });
    }

    /// Get time-to-shell so far.
    pub fn time_to_shell(&self) -> Option<Duration> {
        self.shell_sent.map(|t| t.duration_since(self.start))
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the metrics.
    pub fn finalize(self, status_code: Option<u16>) -> RequestMetrics {
        let start = self.start;

        RequestMetrics {
            request_id: self.request_id.to_string(),
            route: self.route,
            time_to_shell_us: self.shell_sent.map(|t| micros(t.duration_since(start))),
            time_to_first_section_us: self
                .first_section_sent
                .map(|t| micros(t.duration_since(start))),
            sections: self.sections,
            fetch: self.fetch,
            total_duration_us: micros(start.elapsed()),
            status_code,
        }
    }
}

impl RequestMetrics {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        match self.status_code {
            Some(status) => lines.push(format!("Request: {} [{}]", self.request_id, status)),
            None => lines.push(format!("Request: {}", self.request_id)),
        }

        if let Some(fetch) = &self.fetch {
            let outcome = match (&fetch.cache_status, &fetch.error) {
                (_, Some(error)) => format!("FAILED: {}", error),
                (Some(status), None) => status.clone(),
                (None, None) => "OK".to_string(),
            };
            lines.push(format!(
                "  Fetch [{}]: {}us ({:.2}ms) - {}",
                outcome,
                fetch.duration_us,
                fetch.duration_us as f64 / 1000.0,
                fetch.url
            ));
        }

        if let Some(tts) = self.time_to_shell_us {
            lines.push(format!("  Time to shell: {}us ({:.2}ms)", tts, tts as f64 / 1000.0));
        }

        if let Some(ttfs) = self.time_to_first_section_us {
            lines.push(format!(
                "  Time to first section: {}us ({:.2}ms)",
                ttfs,
                ttfs as f64 / 1000.0
            ));
        }

        if !self.sections.is_empty() {
            lines.push("  Sections:".to_string());
            for section in &self.sections {
                lines.push(format!(
                    "    {}: {}us, {} bytes",
                    section.name, section.duration_us, section.bytes
                ));
            }
        }

        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        lines.join("\n")
    }
}

fn micros(duration: Duration) -> u64 {
    duration.as_micros() as u64
}
