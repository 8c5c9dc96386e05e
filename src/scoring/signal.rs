// Core signal types — the atomic unit of evidence and the classified result.
//
// A Signal is a human-readable explanation plus a signed weight. Positive
// weight is risk, negative weight is trust. The sign is the only part of
// the weight callers may rely on; magnitudes are calibrated by convention
// to roughly [-50, 60].

use serde::{Deserialize, Serialize};

/// One unit of evidence produced by a detector.
///
/// This is a closed struct on purpose: per-call-site enrichment (source
/// tags, provenance) lives in wrapper types like `osint::SourceOutcome`,
/// never in optional fields here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub text: String,
    pub weight: f64,
}

impl Signal {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// True when this signal indicates risk rather than trust.
    pub fn is_risk(&self) -> bool {
        self.weight > 0.0
    }
}

/// Four-way classification of an aggregated weight sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Safe,
    Suspicious,
    HighRisk,
    VeryLikelyScam,
}

impl RiskLevel {
    /// Classify a total signal weight. Thresholds are fixed, not
    /// configurable per call.
    pub fn from_total_weight(total: f64) -> Self {
        if total <= 0.0 {
            RiskLevel::Safe
        } else if total <= 30.0 {
            RiskLevel::Suspicious
        } else if total <= 60.0 {
            RiskLevel::HighRisk
        } else {
            RiskLevel::VeryLikelyScam
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Suspicious => "Suspicious",
            RiskLevel::HighRisk => "High Risk",
            RiskLevel::VeryLikelyScam => "Very Likely Scam",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The output of aggregation: one classified result per scan invocation.
/// Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub total_weight: f64,
    pub risk_level: RiskLevel,
    /// Explanations in display order: strongest risk signals first (capped),
    /// then every trust signal.
    pub display_signals: Vec<String>,
}
