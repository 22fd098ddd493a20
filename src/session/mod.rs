//! Session orchestration: rounds of generate, sanitize, dedup, probe, confirm
//!
//! A round takes a raw batch of names through the whole pipeline, strictly one
//! domain at a time so output order follows candidate order. The session loops
//! over rounds until the user declines to continue.

mod output;
mod state;

pub use output::append_available;
pub use state::SessionState;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{sanitize, DnsProber, RegistryResolver};
use crate::error::{DomainScoutError, Result};
use crate::types::{CandidateDomain, DomainCheck, LookupOutcome, RoundReport, SessionConfig};

/// Where new candidate names come from after the first round
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Produce a batch of raw names for `prompt`, avoiding everything in `exclude`
    async fn next_batch(&self, prompt: &str, exclude: &[String]) -> Result<Vec<String>>;
}

/// Receives progress of a session, e.g. to render it on a terminal
pub trait Reporter: Send + Sync {
    fn generating(&self, _prompt: &str) {}
    fn generation_failed(&self, _error: &DomainScoutError) {}
    fn candidates(&self, _round: usize, _names: &[String]) {}
    fn checking(&self, _domain: &CandidateDomain) {}
    fn checked(&self, _check: &DomainCheck) {}
    fn output_failed(&self, _path: &Path, _error: &DomainScoutError) {}
    fn round_finished(&self, _report: &RoundReport, _state: &SessionState) {}
}

/// Reporter that ignores everything
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Decides whether another round should run
pub trait Continuation {
    fn should_continue(&mut self, state: &SessionState) -> bool;
}

impl<F> Continuation for F
where
    F: FnMut(&SessionState) -> bool,
{
    fn should_continue(&mut self, state: &SessionState) -> bool {
        self(state)
    }
}

/// One interactive session over a target TLD
pub struct Session {
    config: SessionConfig,
    source: Option<Arc<dyn CandidateSource>>,
    prober: DnsProber,
    resolver: RegistryResolver,
    reporter: Arc<dyn Reporter>,
}

impl Session {
    pub fn new(config: SessionConfig, prober: DnsProber, resolver: RegistryResolver) -> Self {
        Self {
            config,
            source: None,
            prober,
            resolver,
            reporter: Arc::new(SilentReporter),
        }
    }

    /// Use a generator for every round after an explicit first batch
    pub fn with_source(mut self, source: Arc<dyn CandidateSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run rounds until `continuation` declines or no candidates can be produced.
    ///
    /// `explicit` names, when given, feed only the first round. Without a
    /// candidate source the session ends after that round.
    pub async fn run(
        &self,
        state: &mut SessionState,
        explicit: Option<Vec<String>>,
        continuation: &mut dyn Continuation,
    ) {
        let mut explicit = explicit;

        loop {
            let raw = match (explicit.take(), &self.source) {
                (Some(names), _) => names,
                (None, Some(source)) => self.request_batch(source.as_ref(), state).await,
                (None, None) => break,
            };

            self.run_round(state, raw).await;

            if self.source.is_none() || !continuation.should_continue(state) {
                break;
            }
        }

        tracing::info!(
            rounds = state.rounds(),
            seen = state.seen().len(),
            available = state.available().len(),
            elapsed_secs = state.elapsed().num_seconds(),
            "Session finished"
        );
    }

    /// Ask the generator for fresh names, treating a failure as an empty batch
    async fn request_batch(&self, source: &dyn CandidateSource, state: &SessionState) -> Vec<String> {
        self.reporter.generating(&self.config.prompt);
        match source.next_batch(&self.config.prompt, state.seen()).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "Candidate generation failed");
                self.reporter.generation_failed(&e);
                Vec::new()
            }
        }
    }

    /// Run one round over a raw batch of names
    pub async fn run_round(&self, state: &mut SessionState, raw: Vec<String>) -> RoundReport {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let round = state.begin_round();

        self.reporter.candidates(round, &raw);

        // Sanitize, then drop anything this session already looked at. Survivors
        // are marked seen before probing so no later round re-checks them.
        let mut fresh = Vec::new();
        let mut duplicates = Vec::new();
        for label in raw.iter().map(|name| sanitize(name)).filter(|label| !label.is_empty()) {
            if state.mark_seen(&label) {
                fresh.push(label);
            } else {
                duplicates.push(label);
            }
        }

        let mut checks = Vec::with_capacity(fresh.len());
        for label in fresh {
            let domain = CandidateDomain::new(label, &self.config.tld);
            checks.push(self.check(domain).await);
        }

        let report = RoundReport {
            round,
            candidates: raw,
            duplicates,
            checks,
            started_at,
            duration: start_time.elapsed(),
        };

        let available = report.available();
        state.add_available(&available);

        if let Some(path) = &self.config.output {
            if let Err(e) = append_available(path, &available).await {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write available domains");
                self.reporter.output_failed(path, &e);
            }
        }

        tracing::info!(
            round,
            candidates = report.candidates.len(),
            duplicates = report.duplicates.len(),
            checked = report.checks.len(),
            available = available.len(),
            duration_ms = %report.duration.as_millis(),
            "Round completed"
        );

        self.reporter.round_finished(&report, state);
        report
    }

    /// Probe one domain and confirm NXDOMAIN answers with the registry
    async fn check(&self, domain: CandidateDomain) -> DomainCheck {
        self.reporter.checking(&domain);

        let outcome = self.prober.probe(&domain).await;
        let verdict = match outcome {
            LookupOutcome::NotFound => Some(self.resolver.confirm(&domain).await),
            _ => None,
        };

        let check = DomainCheck {
            domain,
            outcome,
            verdict,
        };

        tracing::debug!(
            domain = %check.domain,
            outcome = %check.outcome,
            available = check.is_available(),
            "Domain checked"
        );

        self.reporter.checked(&check);
        check
    }
}
