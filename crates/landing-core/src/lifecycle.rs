//! Request lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifecycle phases for a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Request received, processing started.
    Start,
    /// Shell HTML has been written.
    ShellSent,
    /// A named page region has been written.
    SectionSent(String),
    /// Response completed.
    Completion,
}

/// Named timing marks relative to the start of a request.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Mark section start.
    pub fn mark_section_start(&mut self, section: &str) {
        self.mark(&format!("section_{}_start", section));
    }

    /// Mark section sent.
    pub fn mark_section_sent(&mut self, section: &str) {
        self.mark(&format!("section_{}_sent", section));
    }

    /// Mark the upstream product fetch as started.
    pub fn mark_fetch_start(&mut self) {
        self.mark("fetch_start");
    }

    /// Mark the upstream product fetch as finished.
    pub fn mark_fetch_done(&mut self) {
        self.mark("fetch_done");
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time spent waiting on the upstream fetch (or the cache).
    pub fn fetch_duration(&self) -> Option<Duration> {
        let start = self.marks.get("fetch_start")?;
        let done = self.marks.get("fetch_done")?;
        Some(done.duration_since(*start))
    }

    /// Get time to shell flush.
    pub fn time_to_shell(&self) -> Option<Duration> {
        self.marks
            .get("shell_sent")
            .map(|t| t.duration_since(self.start))
    }

    /// Get time to first section.
    pub fn time_to_first_section(&self) -> Option<Duration> {
        self.marks
            .iter()
            .filter(|(k, _)| k.starts_with("section_") && k.ends_with("_sent"))
            .map(|(_, t)| t.duration_since(self.start))
            .min()
    }

    /// Get timing for a specific section.
    pub fn section_timing(&self, section: &str) -> Option<SectionTiming> {
        let start = self.marks.get(&format!("section_{}_start", section))?;
        let sent = self.marks.get(&format!("section_{}_sent", section))?;

        Some(SectionTiming {
            name: section.to_string(),
            start: start.duration_since(self.start),
            sent: sent.duration_since(self.start),
            duration: sent.duration_since(*start),
        })
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing information for a section.
#[derive(Debug, Clone)]
pub struct SectionTiming {
    /// Section name.
    pub name: String,
    /// Time from request start to section start.
    pub start: Duration,
    /// Time from request start to section sent.
    pub sent: Duration,
    /// Duration of section rendering.
    pub duration: Duration,
}
