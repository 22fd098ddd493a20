//! Core types and structures for domain-scout

use chrono::{DateTime, Utc};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::retry::RetryPolicy;

/// Default generation prompt
pub const DEFAULT_PROMPT: &str = "Startup that helps people find the best deals on flights";

/// Default top-level domain
pub const DEFAULT_TLD: &str = "com";

/// Public resolvers used when no nameservers are configured
pub const DEFAULT_NAMESERVERS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
];

/// A sanitized label joined with the configured top-level domain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateDomain {
    label: String,
    tld: String,
}

impl CandidateDomain {
    pub fn new(label: impl Into<String>, tld: &str) -> Self {
        Self {
            label: label.into(),
            tld: normalize_tld(tld),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// Get the full domain name (`label.tld`)
    pub fn full_domain(&self) -> String {
        format!("{}.{}", self.label, self.tld)
    }
}

impl std::fmt::Display for CandidateDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.label, self.tld)
    }
}

/// Normalize a TLD as typed by the user (`.COM ` -> `com`)
pub fn normalize_tld(tld: &str) -> String {
    tld.trim().trim_start_matches('.').to_lowercase()
}

/// Result of probing one candidate domain over DNS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// DNS returned records, the domain is taken
    Resolved { records: usize },
    /// NXDOMAIN, needs registry confirmation
    NotFound,
    /// Malformed label, empty answer or no reachable nameserver
    Indeterminate(String),
    /// Transport failure after all retries
    Error(String),
}

impl std::fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupOutcome::Resolved { records } => write!(f, "resolved ({} records)", records),
            LookupOutcome::NotFound => write!(f, "nxdomain"),
            LookupOutcome::Indeterminate(reason) => write!(f, "indeterminate: {}", reason),
            LookupOutcome::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Result of a registry (WHOIS) confirmation query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryVerdict {
    ConfirmedAvailable,
    ConfirmedTaken { status: Vec<String> },
    RegistryError(String),
}

impl std::fmt::Display for RegistryVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryVerdict::ConfirmedAvailable => write!(f, "available"),
            RegistryVerdict::ConfirmedTaken { status } => write!(f, "taken ({})", status.join(", ")),
            RegistryVerdict::RegistryError(reason) => write!(f, "registry error: {}", reason),
        }
    }
}

/// Structured registry record for a domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisRecord {
    pub domain: String,
    pub registrar: Option<String>,
    pub status: Vec<String>,
    pub name_servers: Vec<String>,
}

/// Everything learned about one domain during a round
#[derive(Debug, Clone)]
pub struct DomainCheck {
    pub domain: CandidateDomain,
    pub outcome: LookupOutcome,
    pub verdict: Option<RegistryVerdict>,
}

impl DomainCheck {
    /// A domain is available only when DNS said NXDOMAIN and the registry agreed
    pub fn is_available(&self) -> bool {
        matches!(self.outcome, LookupOutcome::NotFound)
            && matches!(self.verdict, Some(RegistryVerdict::ConfirmedAvailable))
    }
}

/// Summary of one round of the session
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round: usize,
    /// Raw candidates as received from the generator or the user
    pub candidates: Vec<String>,
    /// Labels dropped because they were already checked in this session
    pub duplicates: Vec<String>,
    pub checks: Vec<DomainCheck>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl RoundReport {
    /// Available domains of this round, in probe order
    pub fn available(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| c.is_available())
            .map(|c| c.domain.full_domain())
            .collect()
    }
}

/// Configuration for DNS probing
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub nameservers: Vec<IpAddr>,
    /// Per-query timeout
    pub timeout: Duration,
    /// Upper bound for one resolution attempt, all nameservers included
    pub lifetime: Duration,
    pub retry: RetryPolicy,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            nameservers: DEFAULT_NAMESERVERS.to_vec(),
            timeout: Duration::from_secs(2),
            lifetime: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

/// Configuration for one interactive session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub tld: String,
    pub prompt: String,
    pub output: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tld: DEFAULT_TLD.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            output: None,
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.7,
        }
    }
}
