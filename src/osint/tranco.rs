// Tranco ranking — the only source that can vouch for a site.
//
// Tranco is a research-oriented ranking of the most-visited domains,
// hardened against the manipulation the old Alexa list suffered from.
// A high rank is strong evidence a domain is not a throwaway scam host.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::OsintSource;
use crate::scoring::Signal;

const TRANCO_BASE: &str = "https://tranco-list.eu/api/ranks/domain";

const TIER_TOP_10K: u64 = 10_000;
const TIER_TOP_100K: u64 = 100_000;
const TIER_TOP_1M: u64 = 1_000_000;

pub struct TrancoSource {
    client: Client,
}

impl TrancoSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OsintSource for TrancoSource {
    fn name(&self) -> &'static str {
        "tranco"
    }

    async fn lookup(&self, url: &str) -> Result<Vec<Signal>> {
        let domain = crate::detect::url_features::extract_domain(url);
        if domain.is_empty() {
            return Ok(vec![]);
        }

        let response = self
            .client
            .get(format!("{TRANCO_BASE}/{domain}"))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to call Tranco")?;

        if !response.status().is_success() {
            // Unranked domains 404 — that is not an error, just no signal
            return Ok(vec![]);
        }

        let body: TrancoResponse = response
            .json()
            .await
            .context("Failed to parse Tranco response")?;

        let rank = body.ranks.first().map(|entry| entry.rank);
        Ok(rank.map(signals_for_rank).unwrap_or_default())
    }
}

/// Group separators for readability, e.g. 10000 -> "10,000".
fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub(crate) fn signals_for_rank(rank: u64) -> Vec<Signal> {
    if rank <= TIER_TOP_10K {
        vec![Signal::new(
            format!(
                "This is one of the {} most visited websites in the world \
                 (Tranco rank #{})",
                with_commas(TIER_TOP_10K),
                with_commas(rank)
            ),
            -15.0,
        )]
    } else if rank <= TIER_TOP_100K {
        vec![Signal::new(
            format!(
                "This website ranks in the top {} globally (Tranco rank #{})",
                with_commas(TIER_TOP_100K),
                with_commas(rank)
            ),
            -10.0,
        )]
    } else if rank <= TIER_TOP_1M {
        vec![Signal::new(
            format!(
                "This website has moderate global traffic (Tranco rank #{})",
                with_commas(rank)
            ),
            -5.0,
        )]
    } else {
        vec![]
    }
}

#[derive(Deserialize)]
struct TrancoResponse {
    #[serde(default)]
    ranks: Vec<TrancoEntry>,
}

#[derive(Deserialize)]
struct TrancoEntry {
    rank: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_tier_earns_most_trust() {
        let signals = signals_for_rank(87);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].weight, -15.0);
        assert!(signals[0].text.contains("#87"));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(signals_for_rank(10_000)[0].weight, -15.0);
        assert_eq!(signals_for_rank(10_001)[0].weight, -10.0);
        assert_eq!(signals_for_rank(100_000)[0].weight, -10.0);
        assert_eq!(signals_for_rank(100_001)[0].weight, -5.0);
        assert_eq!(signals_for_rank(1_000_000)[0].weight, -5.0);
        assert!(signals_for_rank(1_000_001).is_empty());
    }

    #[test]
    fn test_comma_grouping() {
        assert_eq!(with_commas(87), "87");
        assert_eq!(with_commas(10_000), "10,000");
        assert_eq!(with_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn test_rank_list_parsing() {
        let json = r#"{"ranks": [{"date": "2026-08-01", "rank": 512}, {"date": "2026-07-31", "rank": 523}]}"#;
        let parsed: TrancoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.ranks.first().unwrap().rank, 512);
    }
}
