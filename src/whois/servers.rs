//! Central WHOIS server table.
//!
//! A small static mapping for high-usage TLDs; anything else is discovered
//! through IANA at query time.

/// IANA root WHOIS server, used to discover the server of unknown TLDs
pub const IANA_WHOIS: &str = "whois.iana.org";

/// Port every WHOIS server listens on
pub const WHOIS_PORT: u16 = 43;

/// Get the WHOIS server for a TLD (lowercase, without leading dot).
pub fn whois_server(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "ai" => Some("whois.nic.ai"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        "app" | "dev" => Some("whois.nic.google"),
        _ => None,
    }
}

/// Extract the authoritative server from an IANA TLD record.
///
/// IANA lists it on a `whois:` line, older records use `refer:`.
pub fn parse_iana_referral(iana: &str) -> Option<String> {
    find_value(iana, "whois:").or_else(|| find_value(iana, "refer:"))
}

fn find_value(text: &str, key: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| {
            if line.to_lowercase().starts_with(key) {
                Some(line.splitn(2, ':').nth(1)?.trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_known() {
        assert_eq!(whois_server("com"), Some("whois.verisign-grs.com"));
        assert_eq!(whois_server("net"), whois_server("com"));
        assert!(whois_server("io").is_some());
        assert!(whois_server("unknown").is_none());
    }

    #[test]
    fn test_iana_whois_parsing() {
        let sample = r#"
domain:       COM
organisation: Verisign Global Registry Services
whois:        whois.verisign-grs.com
status:       ACTIVE
"#;
        assert_eq!(parse_iana_referral(sample).as_deref(), Some("whois.verisign-grs.com"));
    }

    #[test]
    fn test_iana_refer_parsing() {
        let sample = "refer: whois.nic.io\n";
        assert_eq!(parse_iana_referral(sample).as_deref(), Some("whois.nic.io"));
    }

    #[test]
    fn test_iana_without_server() {
        let sample = "domain: EXAMPLE\nwhois:\n";
        assert_eq!(parse_iana_referral(sample), None);
    }
}
