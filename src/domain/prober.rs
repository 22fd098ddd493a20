//! DNS availability prober

use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hickory_resolver::{
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::{rr::Name, rr::RecordType, ProtoErrorKind},
    ResolveError, TokioResolver,
};
use thiserror::Error;
use tokio::time::timeout;

use super::retry::{RetryDecision, RetryPolicy};
use super::sanitizer::is_valid_label;
use crate::types::{CandidateDomain, LookupOutcome, ProbeConfig};

/// Ways a DNS resolution can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsFailure {
    #[error("domain does not exist")]
    NxDomain,

    #[error("no answer for the query")]
    NoAnswer,

    #[error("no nameservers reachable: {0}")]
    NoNameservers(String),

    #[error("invalid domain name: {0}")]
    InvalidName(String),

    #[error("{0}")]
    Transient(String),
}

/// DNS boundary: resolve a domain and count the answer records
#[async_trait]
pub trait DnsBackend: Send + Sync {
    async fn resolve(&self, domain: &str) -> std::result::Result<usize, DnsFailure>;
}

/// [`DnsBackend`] backed by hickory, querying explicit nameservers
pub struct HickoryBackend {
    resolver: TokioResolver,
    lifetime: Duration,
}

impl HickoryBackend {
    pub fn new(nameservers: &[IpAddr], query_timeout: Duration, lifetime: Duration) -> Self {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(nameservers, 53, true),
        );
        let mut opts = ResolverOpts::default();
        opts.timeout = query_timeout;
        // Retries are driven by the prober's policy
        opts.attempts = 1;

        let resolver = TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();

        Self { resolver, lifetime }
    }

    fn classify_error(err: &ResolveError) -> DnsFailure {
        if err.is_nx_domain() {
            return DnsFailure::NxDomain;
        }
        if err.is_no_records_found() {
            return DnsFailure::NoAnswer;
        }
        match err.proto().map(|p| p.kind()) {
            Some(ProtoErrorKind::NoConnections) => DnsFailure::NoNameservers(err.to_string()),
            _ => DnsFailure::Transient(err.to_string()),
        }
    }
}

#[async_trait]
impl DnsBackend for HickoryBackend {
    async fn resolve(&self, domain: &str) -> std::result::Result<usize, DnsFailure> {
        let name = Name::from_ascii(domain).map_err(|e| DnsFailure::InvalidName(e.to_string()))?;

        let lookup = timeout(self.lifetime, self.resolver.lookup(name, RecordType::A))
            .await
            .map_err(|_| {
                DnsFailure::Transient(format!(
                    "resolution lifetime of {}s exceeded",
                    self.lifetime.as_secs_f32()
                ))
            })?
            .map_err(|e| Self::classify_error(&e))?;

        Ok(lookup.record_iter().count())
    }
}

/// Probes candidate domains over DNS with a bounded retry policy
pub struct DnsProber {
    backend: Arc<dyn DnsBackend>,
    policy: RetryPolicy,
}

impl DnsProber {
    /// Create a prober using hickory and the configured nameservers
    pub fn new(config: &ProbeConfig) -> Self {
        let backend = HickoryBackend::new(&config.nameservers, config.timeout, config.lifetime);
        Self::with_backend(Arc::new(backend), config.retry)
    }

    /// Create a prober on top of any DNS backend
    pub fn with_backend(backend: Arc<dyn DnsBackend>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Probe one domain.
    ///
    /// NXDOMAIN ends the probe at once; every other resolution failure is
    /// retried per policy. An empty answer or unreachable nameservers end up
    /// `Indeterminate` once attempts run out.
    pub async fn probe(&self, domain: &CandidateDomain) -> LookupOutcome {
        if !is_valid_label(domain.label()) {
            tracing::debug!(domain = %domain, "Skipping malformed label");
            return LookupOutcome::Indeterminate(format!("invalid domain label '{}'", domain.label()));
        }

        let full_domain = domain.full_domain();
        let start_time = Instant::now();

        let result = self
            .policy
            .run(|_attempt| self.backend.resolve(&full_domain), classify)
            .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(failure @ (DnsFailure::NoAnswer | DnsFailure::NoNameservers(_))) => {
                LookupOutcome::Indeterminate(failure.to_string())
            }
            Err(failure) => LookupOutcome::Error(failure.to_string()),
        };

        tracing::debug!(
            domain = %full_domain,
            outcome = %outcome,
            duration_ms = %start_time.elapsed().as_millis(),
            "DNS probe completed"
        );

        outcome
    }
}

fn classify(result: std::result::Result<usize, DnsFailure>) -> RetryDecision<LookupOutcome, DnsFailure> {
    match result {
        Ok(0) => RetryDecision::Done(LookupOutcome::Indeterminate("empty answer".to_string())),
        Ok(records) => RetryDecision::Done(LookupOutcome::Resolved { records }),
        Err(DnsFailure::NxDomain) => RetryDecision::Done(LookupOutcome::NotFound),
        Err(failure @ DnsFailure::InvalidName(_)) => {
            RetryDecision::Done(LookupOutcome::Indeterminate(failure.to_string()))
        }
        Err(failure) => RetryDecision::Retry(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::op::{Query, ResponseCode};
    use hickory_resolver::proto::ProtoError;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Backend answering from a script, then repeating the last answer
    struct ScriptedBackend {
        answers: Mutex<VecDeque<std::result::Result<usize, DnsFailure>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(answers: Vec<std::result::Result<usize, DnsFailure>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl DnsBackend for ScriptedBackend {
        async fn resolve(&self, domain: &str) -> std::result::Result<usize, DnsFailure> {
            self.calls.lock().push(domain.to_string());
            let mut answers = self.answers.lock();
            if answers.len() > 1 {
                answers.pop_front().unwrap()
            } else {
                answers.front().cloned().unwrap()
            }
        }
    }

    fn prober(backend: Arc<ScriptedBackend>) -> DnsProber {
        DnsProber::with_backend(backend, RetryPolicy::new(3, Duration::ZERO))
    }

    fn domain(label: &str) -> CandidateDomain {
        CandidateDomain::new(label, "com")
    }

    #[tokio::test]
    async fn test_records_mean_resolved() {
        let backend = ScriptedBackend::new(vec![Ok(2)]);
        let outcome = prober(backend.clone()).probe(&domain("google")).await;
        assert_eq!(outcome, LookupOutcome::Resolved { records: 2 });
        assert_eq!(backend.calls.lock().as_slice(), ["google.com"]);
    }

    #[tokio::test]
    async fn test_nxdomain_is_not_retried() {
        let backend = ScriptedBackend::new(vec![Err(DnsFailure::NxDomain)]);
        let outcome = prober(backend.clone()).probe(&domain("zqxv-unused")).await;
        assert_eq!(outcome, LookupOutcome::NotFound);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried_then_error() {
        let backend = ScriptedBackend::new(vec![Err(DnsFailure::Transient("timed out".to_string()))]);
        let outcome = prober(backend.clone()).probe(&domain("slow")).await;
        assert_eq!(outcome, LookupOutcome::Error("timed out".to_string()));
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_transient_failure_then_nxdomain() {
        let backend = ScriptedBackend::new(vec![
            Err(DnsFailure::Transient("timed out".to_string())),
            Err(DnsFailure::NxDomain),
        ]);
        let outcome = prober(backend.clone()).probe(&domain("flaky")).await;
        assert_eq!(outcome, LookupOutcome::NotFound);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_no_answer_is_retried_then_indeterminate() {
        let backend = ScriptedBackend::new(vec![Err(DnsFailure::NoAnswer)]);
        let outcome = prober(backend.clone()).probe(&domain("mx-only")).await;
        assert_eq!(outcome, LookupOutcome::Indeterminate("no answer for the query".to_string()));
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_no_answer_then_records() {
        let backend = ScriptedBackend::new(vec![Err(DnsFailure::NoAnswer), Ok(1)]);
        let outcome = prober(backend.clone()).probe(&domain("late")).await;
        assert_eq!(outcome, LookupOutcome::Resolved { records: 1 });
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_nameservers_are_indeterminate() {
        let backend = ScriptedBackend::new(vec![Err(DnsFailure::NoNameservers("refused".to_string()))]);
        let outcome = prober(backend.clone()).probe(&domain("offline")).await;
        assert_eq!(outcome, LookupOutcome::Indeterminate("no nameservers reachable: refused".to_string()));
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_label_never_reaches_the_network() {
        let backend = ScriptedBackend::new(vec![Ok(1)]);
        let prober = prober(backend.clone());

        assert!(matches!(prober.probe(&domain("")).await, LookupOutcome::Indeterminate(_)));
        assert!(matches!(prober.probe(&domain("-bad")).await, LookupOutcome::Indeterminate(_)));
        assert_eq!(backend.calls(), 0);
    }

    fn no_records(response_code: ResponseCode) -> ResolveError {
        let query = Query::query(Name::from_ascii("zqxv-unused.com.").unwrap(), RecordType::A);
        ProtoError::nx_error(Box::new(query), None, None, None, response_code, true, None).into()
    }

    fn proto_error(kind: ProtoErrorKind) -> ResolveError {
        ProtoError::from(kind).into()
    }

    #[test]
    fn test_resolver_errors_are_classified() {
        assert_eq!(
            HickoryBackend::classify_error(&no_records(ResponseCode::NXDomain)),
            DnsFailure::NxDomain
        );
        assert_eq!(
            HickoryBackend::classify_error(&no_records(ResponseCode::NoError)),
            DnsFailure::NoAnswer
        );
        assert!(matches!(
            HickoryBackend::classify_error(&proto_error(ProtoErrorKind::NoConnections)),
            DnsFailure::NoNameservers(_)
        ));
        assert!(matches!(
            HickoryBackend::classify_error(&proto_error(ProtoErrorKind::Timeout)),
            DnsFailure::Transient(_)
        ));
    }

    #[tokio::test]
    async fn test_hickory_backend_rejects_malformed_names() {
        let ips: Vec<IpAddr> = vec!["127.0.0.1".parse().unwrap()];
        let backend = HickoryBackend::new(&ips, Duration::from_millis(100), Duration::from_millis(200));
        let err = backend.resolve(&format!("{}.com", "a".repeat(64))).await.unwrap_err();
        assert!(matches!(err, DnsFailure::InvalidName(_)));
    }
}
