// Signal aggregation: dedup, sum, classify, build display list.
//
// Detectors overlap — the pattern matcher and an OSINT source will often
// describe the same finding in slightly different words. Dedup is by
// token-set similarity on the explanation text: first-seen wins, so the
// orchestrator's fixed detector order makes output reproducible.

use std::collections::HashSet;

use super::signal::{AggregatedResult, RiskLevel, Signal};

/// Words shorter than this are ignored when comparing explanations.
/// Fixed design constant — treated as part of the API contract.
const DEDUP_MIN_TOKEN_LEN: usize = 5;

/// Two explanations sharing more than this fraction of their longer
/// token set are considered duplicates. Fixed design constant.
const DEDUP_SIMILARITY: f64 = 0.6;

/// Risk signals shown to the user, strongest first. Trust signals are
/// never capped.
const MAX_DISPLAY_RISK_SIGNALS: usize = 5;

/// Merge signals from all detectors into one classified result.
///
/// Total given any input, including the empty list. Pure: same signals in
/// the same order always produce the same result.
pub fn aggregate(signals: &[Signal]) -> AggregatedResult {
    let deduped = dedup_signals(signals);

    let total_weight: f64 = deduped.iter().map(|s| s.weight).sum();
    let risk_level = RiskLevel::from_total_weight(total_weight);

    let mut risk: Vec<&Signal> = deduped.iter().filter(|s| s.weight > 0.0).collect();
    let trust: Vec<&Signal> = deduped.iter().filter(|s| s.weight < 0.0).collect();

    // Sort before truncating so the concurrent-completion order of OSINT
    // sources can never affect what the user sees.
    risk.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));

    let mut display_signals: Vec<String> = Vec::new();
    if risk.is_empty() {
        display_signals
            .push("We didn't find any obvious warning signs in what you shared.".to_string());
    } else {
        display_signals.extend(
            risk.iter()
                .take(MAX_DISPLAY_RISK_SIGNALS)
                .map(|s| s.text.clone()),
        );
    }
    display_signals.extend(trust.iter().map(|s| s.text.clone()));

    AggregatedResult {
        total_weight,
        risk_level,
        display_signals,
    }
}

/// Keep the first signal of each near-duplicate cluster, in input order.
fn dedup_signals(signals: &[Signal]) -> Vec<Signal> {
    let mut accepted: Vec<(Signal, HashSet<String>)> = Vec::new();

    for signal in signals {
        let tokens = token_set(&signal.text);
        let is_dupe = accepted
            .iter()
            .any(|(_, existing)| similar(&tokens, existing));
        if !is_dupe {
            accepted.push((signal.clone(), tokens));
        }
    }

    accepted.into_iter().map(|(s, _)| s).collect()
}

fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() >= DEDUP_MIN_TOKEN_LEN)
        .map(|w| w.to_string())
        .collect()
}

fn similar(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return false;
    }
    let overlap = a.intersection(b).count();
    overlap as f64 / max_len as f64 > DEDUP_SIMILARITY
}
