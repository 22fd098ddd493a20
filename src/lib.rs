//! Domain Scout - find unregistered domains for AI-generated project names
//!
//! Names are sanitized into DNS labels, probed over DNS, and NXDOMAIN answers
//! are confirmed with the registry over WHOIS before a domain is reported available.

pub mod domain;
pub mod error;
pub mod llm;
pub mod session;
pub mod types;
pub mod whois;

// Re-export commonly used types
pub use error::{DomainScoutError, Result};
pub use types::{
    CandidateDomain, DomainCheck, LlmConfig, LookupOutcome, ProbeConfig, RegistryVerdict,
    RoundReport, SessionConfig, WhoisRecord,
};

// Re-export main functionality
pub use domain::{sanitize, DnsProber, RegistryResolver};
pub use llm::NameGenerator;
pub use session::{Session, SessionState};

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
