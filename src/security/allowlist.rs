//! Immutable set of permitted client addresses.

use std::collections::HashSet;

/// Separator between addresses in an allow spec.
pub const ALLOW_SEPARATOR: char = ' ';

/// Bare IP strings allowed to reach the file server.
///
/// Built once during startup and only readable afterwards, so request
/// tasks can share it behind an `Arc` without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    addresses: HashSet<String>,
}

impl Allowlist {
    /// Build from a space-separated spec. Empty tokens are skipped.
    pub fn from_spec(spec: &str) -> Self {
        let addresses = spec
            .split(ALLOW_SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();
        Self { addresses }
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.addresses.contains(ip)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Addresses in sorted order, for display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.addresses.iter().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
}

impl<'a> FromIterator<&'a str> for Allowlist {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            addresses: iter
                .into_iter()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}
