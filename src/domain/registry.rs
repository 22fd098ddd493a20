//! Registry confirmation for domains DNS reported as non-existent

use std::sync::Arc;
use std::time::Instant;

use super::RegistryLookup;
use crate::types::{CandidateDomain, RegistryVerdict};
use crate::whois::WhoisClient;

/// Turns registry answers into availability verdicts.
///
/// Registries report an unregistered domain either as a record without status
/// or as a "no match" failure; both mean available. Any other failure is an
/// unknown, never an available.
pub struct RegistryResolver {
    lookup: Arc<dyn RegistryLookup>,
}

impl RegistryResolver {
    /// Create a resolver using the built-in WHOIS client
    pub fn new() -> Self {
        Self::with_lookup(Arc::new(WhoisClient::new()))
    }

    pub fn with_lookup(lookup: Arc<dyn RegistryLookup>) -> Self {
        Self { lookup }
    }

    /// Confirm the registration state of a domain
    pub async fn confirm(&self, domain: &CandidateDomain) -> RegistryVerdict {
        let full_domain = domain.full_domain();
        let start_time = Instant::now();

        let verdict = match self.lookup.lookup(&full_domain).await {
            Ok(record) if record.status.is_empty() => RegistryVerdict::ConfirmedAvailable,
            // Statuses are not interpreted, any status means taken
            Ok(record) => RegistryVerdict::ConfirmedTaken { status: record.status },
            Err(e) if e.is_no_match() => RegistryVerdict::ConfirmedAvailable,
            Err(e) => {
                tracing::warn!(domain = %full_domain, error = %e, "WHOIS check failed");
                RegistryVerdict::RegistryError(e.to_string())
            }
        };

        tracing::debug!(
            domain = %full_domain,
            verdict = %verdict,
            duration_ms = %start_time.elapsed().as_millis(),
            "Registry confirmation completed"
        );

        verdict
    }
}

impl Default for RegistryResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainScoutError, Result};
    use crate::types::WhoisRecord;
    use async_trait::async_trait;

    struct FixedLookup(Result<WhoisRecord>);

    #[async_trait]
    impl RegistryLookup for FixedLookup {
        async fn lookup(&self, _domain: &str) -> Result<WhoisRecord> {
            self.0.clone()
        }
    }

    async fn confirm_with(answer: Result<WhoisRecord>) -> RegistryVerdict {
        RegistryResolver::with_lookup(Arc::new(FixedLookup(answer)))
            .confirm(&CandidateDomain::new("flyfinder", "com"))
            .await
    }

    fn record(status: &[&str]) -> WhoisRecord {
        WhoisRecord {
            domain: "flyfinder.com".to_string(),
            status: status.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_status_is_available() {
        assert_eq!(confirm_with(Ok(record(&[]))).await, RegistryVerdict::ConfirmedAvailable);
    }

    #[tokio::test]
    async fn test_status_means_taken() {
        let verdict = confirm_with(Ok(record(&["clientTransferProhibited"]))).await;
        assert_eq!(
            verdict,
            RegistryVerdict::ConfirmedTaken {
                status: vec!["clientTransferProhibited".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_free_looking_status_is_still_taken() {
        let verdict = confirm_with(Ok(record(&["free"]))).await;
        assert!(matches!(verdict, RegistryVerdict::ConfirmedTaken { .. }));
    }

    #[tokio::test]
    async fn test_no_match_error_is_available() {
        let err = DomainScoutError::registry("flyfinder.com", "No match for \"FLYFINDER.COM\".");
        assert_eq!(confirm_with(Err(err)).await, RegistryVerdict::ConfirmedAvailable);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_available() {
        let err = DomainScoutError::timeout("WHOIS read", 10);
        assert!(matches!(confirm_with(Err(err)).await, RegistryVerdict::RegistryError(_)));
    }
}
