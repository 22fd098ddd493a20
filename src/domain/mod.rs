//! Domain availability resolution: sanitize, probe DNS, confirm with the registry

pub mod prober;
pub mod registry;
pub mod retry;
pub mod sanitizer;

// Re-export main functionality
pub use prober::{DnsBackend, DnsFailure, DnsProber, HickoryBackend};
pub use registry::RegistryResolver;
pub use retry::{RetryDecision, RetryPolicy};
pub use sanitizer::{is_valid_label, sanitize};

use crate::error::Result;
use crate::types::WhoisRecord;
use async_trait::async_trait;

/// Registry boundary: fetch the registration record of a domain
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Look up `domain`; an unregistered domain may surface as a "no match" error
    async fn lookup(&self, domain: &str) -> Result<WhoisRecord>;
}
