// Domain blocklist membership check.
//
// The list ships inside the binary (data/blocklist.txt) and is parsed
// once into a read-only set on first use. Lookups walk parent domains
// too, so a hit on `bad.example.com` also catches `login.bad.example.com`.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::scoring::Signal;

const BLOCKLIST_RAW: &str = include_str!("../../data/blocklist.txt");

fn blocklist() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        BLOCKLIST_RAW
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect()
    })
}

/// Number of domains in the shipped blocklist.
pub fn blocklist_size() -> usize {
    blocklist().len()
}

/// Check a domain (and its parent domains) against the blocklist.
/// Returns the matched entry on a hit.
pub fn is_domain_blocked(domain: &str) -> Option<&'static str> {
    let clean = domain.to_lowercase();
    let clean = clean.strip_prefix("www.").unwrap_or(&clean);

    let set = blocklist();
    if let Some(&hit) = set.get(clean) {
        return Some(hit);
    }

    // Walk parents: a.b.example.com -> b.example.com -> example.com
    let parts: Vec<&str> = clean.split('.').collect();
    for i in 1..parts.len().saturating_sub(1) {
        let parent = parts[i..].join(".");
        if let Some(&hit) = set.get(parent.as_str()) {
            return Some(hit);
        }
    }

    None
}

/// Blocklist membership expressed as Signals for the aggregator.
pub fn check(domain: &str) -> Vec<Signal> {
    match is_domain_blocked(domain) {
        Some(hit) => vec![Signal::new(
            format!(
                "This domain ({hit}) is on a blocklist of known phishing and malware sites. \
                 Do not enter any information there."
            ),
            50.0,
        )],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_domain_is_blocked() {
        assert_eq!(
            is_domain_blocked("cra-refund-portal.com"),
            Some("cra-refund-portal.com")
        );
    }

    #[test]
    fn subdomain_of_listed_domain_is_blocked() {
        assert_eq!(
            is_domain_blocked("login.cra-refund-portal.com"),
            Some("cra-refund-portal.com")
        );
    }

    #[test]
    fn www_prefix_stripped() {
        assert!(is_domain_blocked("www.paypal-limited-access.com").is_some());
    }

    #[test]
    fn unlisted_domain_passes() {
        assert_eq!(is_domain_blocked("example.com"), None);
        assert!(check("example.com").is_empty());
    }

    #[test]
    fn comments_and_blanks_skipped() {
        assert!(blocklist_size() > 20);
        assert!(is_domain_blocked("#").is_none());
    }

    #[test]
    fn hit_produces_high_weight_signal() {
        let signals = check("sin-suspension-notice.com");
        assert_eq!(signals.len(), 1);
        assert!(signals[0].weight >= 45.0);
    }
}
