//! Client address validation.
//!
//! # Responsibilities
//! - Strip the port from a transport-level endpoint string
//! - Syntactically validate the remaining host as an IP address
//!
//! # Design Decisions
//! - Pure function, no I/O, safe to call from any request task
//! - IPv4-style endpoints (containing a `.`) are split at the last `:`
//! - Anything else is validated as a whole; bracketed IPv6 endpoints with a
//!   port are reported as `Unsupported` instead of being guessed at

use std::net::IpAddr;

/// Outcome of validating a raw remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAddress<'a> {
    /// A bare IP, borrowed from the input without the port suffix.
    Ip(&'a str),
    /// The host portion is not an IP address.
    Invalid,
    /// IPv6 literal with brackets and/or port. Not handled.
    Unsupported,
}

impl<'a> ValidatedAddress<'a> {
    /// The bare IP, if validation succeeded.
    pub fn bare_ip(&self) -> Option<&'a str> {
        match *self {
            ValidatedAddress::Ip(ip) => Some(ip),
            ValidatedAddress::Invalid | ValidatedAddress::Unsupported => None,
        }
    }
}

/// Validate a raw endpoint such as `"127.0.0.1:54321"`.
pub fn validate_address(endpoint: &str) -> ValidatedAddress<'_> {
    if endpoint.contains('.') {
        let host = match endpoint.rfind(':') {
            Some(idx) => &endpoint[..idx],
            None => endpoint,
        };
        return if is_ip(host) {
            ValidatedAddress::Ip(host)
        } else {
            ValidatedAddress::Invalid
        };
    }

    if is_ip(endpoint) {
        ValidatedAddress::Ip(endpoint)
    } else if endpoint.starts_with('[') {
        ValidatedAddress::Unsupported
    } else {
        ValidatedAddress::Invalid
    }
}

fn is_ip(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok()
}
