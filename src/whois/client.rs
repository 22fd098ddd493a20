//! Pure Rust WHOIS client over TCP/43

use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::servers::{parse_iana_referral, whois_server, IANA_WHOIS, WHOIS_PORT};
use crate::domain::RegistryLookup;
use crate::error::{DomainScoutError, Result};
use crate::types::WhoisRecord;

const NO_MATCH_LINE: &str = r"(?im)^.*no match for.*$";
const STATUS_LINE: &str = r"(?im)^\s*(?:domain\s+)?status:\s*(\S+)";
const REGISTRAR_LINE: &str = r"(?im)^\s*registrar:\s*(.+)$";
const NAME_SERVER_LINE: &str = r"(?im)^\s*(?:name server|nserver):\s*(\S+)";
const DOMAIN_NAME_LINE: &str = r"(?im)^\s*domain(?:\s+name)?:\s*\S+";

/// Body markers of registries that answer an unknown domain without a record
const NOT_FOUND_MARKERS: [&str; 4] = ["not found", "no data found", "no entries found", "no object found"];

/// WHOIS client querying the registry of a domain's TLD
pub struct WhoisClient {
    io_timeout: Duration,
}

impl WhoisClient {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(io_timeout: Duration) -> Self {
        Self { io_timeout }
    }

    async fn query(&self, server: &str, query: &str) -> Result<String> {
        let secs = self.io_timeout.as_secs();
        let addr = format!("{}:{}", server, WHOIS_PORT);

        let mut stream = timeout(self.io_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| DomainScoutError::timeout("WHOIS connect", secs))?
            .map_err(|e| DomainScoutError::network(format!("WHOIS connect failed: {}", e), None, Some(addr.clone())))?;

        timeout(self.io_timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| DomainScoutError::timeout("WHOIS write", secs))?
            .map_err(|e| DomainScoutError::network(format!("WHOIS write failed: {}", e), None, Some(addr.clone())))?;

        let mut buf = Vec::new();
        timeout(self.io_timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| DomainScoutError::timeout("WHOIS read", secs))?
            .map_err(|e| DomainScoutError::network(format!("WHOIS read failed: {}", e), None, Some(addr)))?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Find the WHOIS server for a TLD, asking IANA when it is not in the table
    async fn server_for(&self, domain: &str, tld: &str) -> Result<String> {
        if let Some(server) = whois_server(tld) {
            return Ok(server.to_string());
        }

        let iana = self.query(IANA_WHOIS, tld).await?;
        parse_iana_referral(&iana).ok_or_else(|| {
            DomainScoutError::registry(domain, format!("No WHOIS server found for TLD: {}", tld))
        })
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|tld| !tld.is_empty() && *tld != domain)
            .ok_or_else(|| DomainScoutError::validation(format!("'{}' has no TLD", domain)))?
            .to_lowercase();

        let start_time = Instant::now();
        let server = self.server_for(domain, &tld).await?;
        let raw = self.query(&server, domain).await?;

        tracing::debug!(
            domain = %domain,
            server = %server,
            bytes = raw.len(),
            duration_ms = %start_time.elapsed().as_millis(),
            "WHOIS query completed"
        );

        parse_whois_response(domain, &raw)
    }
}

/// Parse a raw WHOIS body.
///
/// A "No match for" body is returned as a registry error carrying that line,
/// which is how thin registries report an unregistered domain. A body with
/// neither a record field nor a not-found marker is an error as well.
pub(crate) fn parse_whois_response(domain: &str, raw: &str) -> Result<WhoisRecord> {
    if raw.trim().is_empty() {
        return Err(DomainScoutError::registry(domain, "empty WHOIS response"));
    }

    if let Some(line) = Regex::new(NO_MATCH_LINE).ok().and_then(|re| re.find(raw)) {
        return Err(DomainScoutError::registry(domain, line.as_str().trim()));
    }

    if raw.to_lowercase().contains("limit exceeded") {
        return Err(DomainScoutError::registry(domain, "WHOIS query rate limit exceeded"));
    }

    let status = collect_unique(STATUS_LINE, raw, false);
    let has_domain_line = Regex::new(DOMAIN_NAME_LINE).is_ok_and(|re| re.is_match(raw));
    let lower = raw.to_lowercase();
    let not_found = NOT_FOUND_MARKERS.iter().any(|marker| lower.contains(marker));

    if status.is_empty() && !has_domain_line && !not_found {
        tracing::debug!(domain = %domain, bytes = raw.len(), "Unrecognised WHOIS body");
        return Err(DomainScoutError::registry(domain, "unparseable WHOIS response"));
    }

    Ok(WhoisRecord {
        domain: domain.to_string(),
        registrar: collect_unique(REGISTRAR_LINE, raw, false).into_iter().next(),
        status,
        name_servers: collect_unique(NAME_SERVER_LINE, raw, true),
    })
}

/// First capture group of every match, trimmed and deduplicated
fn collect_unique(pattern: &str, text: &str, lowercase: bool) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    let Ok(re) = Regex::new(pattern) else {
        return values;
    };
    for caps in re.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            let value = if lowercase {
                m.as_str().trim().to_lowercase()
            } else {
                m.as_str().trim().to_string()
            };
            if !value.is_empty() && !values.contains(&value) {
                values.push(value);
            }
        }
    }
    values
}
