// Detectors — independent evaluators that inspect raw input and emit
// zero or more Signals. All of these are local, synchronous, and cheap:
// they run inline on the request path with no I/O. Network-bound
// detection lives in `osint`.

pub mod ai_text;
pub mod blocklist;
pub mod patterns;
pub mod phishing;
pub mod phone_campaigns;
pub mod spam;
pub mod url_features;

/// The output of a trained heuristic scorer.
///
/// The score is a bounded 0-100 value, not a Signal: the orchestrator
/// decides how to translate it into a weighted Signal per call site.
#[derive(Debug, Clone, Default)]
pub struct ScorerOutput {
    pub score: u32,
    pub matched_keywords: Vec<String>,
    pub matched_phrases: Vec<String>,
}

impl ScorerOutput {
    /// The strongest single piece of evidence, phrases preferred.
    pub fn top_match(&self) -> Option<&str> {
        self.matched_phrases
            .first()
            .or_else(|| self.matched_keywords.first())
            .map(|s| s.as_str())
    }
}

/// Compress an unbounded evidence weight sum into 0-100.
///
/// `100 * w / (w + k)` approaches 100 asymptotically, so no single weak
/// keyword can max the score. `k` is the per-scorer saturation constant.
pub(crate) fn saturate(weight_sum: f64, k: f64) -> u32 {
    if weight_sum <= 0.0 {
        return 0;
    }
    (100.0 * weight_sum / (weight_sum + k)).round().min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_never_reaches_100() {
        assert_eq!(saturate(0.0, 15.0), 0);
        assert!(saturate(6.9, 15.0) > 0);
        assert!(saturate(6.9, 15.0) < 100);
        // Even absurd evidence rounds up to at most 100
        assert!(saturate(100_000.0, 15.0) <= 100);
    }

    #[test]
    fn saturate_is_monotonic() {
        let a = saturate(5.0, 15.0);
        let b = saturate(10.0, 15.0);
        let c = saturate(30.0, 15.0);
        assert!(a <= b && b <= c);
    }
}
