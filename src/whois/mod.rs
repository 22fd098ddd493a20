//! WHOIS utilities: the registry boundary used to confirm NXDOMAIN results.
//!
//! Server knowledge lives in [`servers`] so the client and its tests agree on
//! which registry answers for which TLD.

mod client;
pub mod servers;

pub use client::WhoisClient;
