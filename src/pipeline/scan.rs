// The scan orchestrator.
//
// Pipeline order is fixed: pattern detectors, then trained scorers, then the
// AI-authorship detector (messages only), then OSINT fan-out (websites only),
// then the entity graph. The only user-visible error is empty input; every
// other failure is logged and degrades to zero signals from that stage.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::detect::ai_text::{self, AiDetectionResult, AiLabel};
use crate::detect::{blocklist, patterns, phishing, phone_campaigns, spam, url_features};
use crate::graph::{self, GraphScanResult, GraphStore, NetworkRiskLabel};
use crate::osint::OsintCoordinator;
use crate::scoring::{aggregate, RiskLevel, Signal};

use super::InputType;

/// Weight multipliers translating a 0-100 scorer output into signal weight.
/// The scorers overlap with the pattern detectors, so they contribute at a
/// discount rather than full strength.
const PHISHING_SCORE_FACTOR: f64 = 0.3;
const SPAM_SCORE_FACTOR: f64 = 0.25;
const URL_FEATURES_SCORE_FACTOR: f64 = 0.2;

/// Weight of the "likely AI-written" signal.
const AI_GENERATED_WEIGHT: f64 = 15.0;

/// Weights for graph-derived network risk.
const NETWORK_RISK_HIGH_WEIGHT: f64 = 25.0;
const NETWORK_RISK_MEDIUM_WEIGHT: f64 = 10.0;

/// External dependencies a scan may use. Both are optional: without a store
/// the graph stage is skipped, without a coordinator OSINT is skipped
/// (`--offline`).
pub struct ScanOptions<'a> {
    pub store: Option<&'a dyn GraphStore>,
    pub osint: Option<&'a OsintCoordinator>,
}

impl Default for ScanOptions<'_> {
    fn default() -> Self {
        Self {
            store: None,
            osint: None,
        }
    }
}

/// Everything one scan produced, ready for terminal or JSON rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub input_type: InputType,
    pub input_value: String,
    pub risk_level: RiskLevel,
    pub total_weight: f64,
    /// Human-readable explanations in display order.
    pub why_bullets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphScanResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_detection: Option<AiDetectionResult>,
    pub scanned_at: String,
}

/// Run the full pipeline over one input.
pub async fn scan(
    input_type: InputType,
    raw_input: &str,
    options: ScanOptions<'_>,
) -> Result<ScanReport> {
    let input = raw_input.trim();
    if input.is_empty() {
        anyhow::bail!("Nothing to scan: the input is empty");
    }

    info!(input_type = %input_type, "starting scan");

    // 1. Pattern detectors + trained scorers, routed by input type
    let mut signals = local_signals(input_type, input);
    debug!(count = signals.len(), "local signals collected");

    // 2. AI-authorship detection (messages only)
    let ai_detection = if input_type == InputType::Message {
        let result = ai_text::detect(input);
        if result.label == AiLabel::AiGenerated {
            let pct = (result.ai_probability * 100.0).round() as u32;
            signals.push(Signal::new(
                format!(
                    "This message appears to be AI-generated ({pct}% likelihood). Scammers \
                     increasingly use AI tools to write polished messages at scale."
                ),
                AI_GENERATED_WEIGHT,
            ));
        }
        Some(result)
    } else {
        None
    };

    // 3. OSINT fan-out (websites only, skipped offline)
    if input_type == InputType::Website {
        if let Some(coordinator) = options.osint {
            let outcomes = coordinator.batch_lookup(input).await;
            let unavailable = outcomes.iter().filter(|o| !o.is_available()).count();
            if unavailable > 0 {
                debug!(unavailable, total = outcomes.len(), "some OSINT sources unavailable");
            }
            for outcome in outcomes {
                signals.extend(outcome.signals.unwrap_or_default());
            }
        }
    }

    // 4. Entity graph
    let graph = match options.store {
        Some(store) => {
            let entities = super::extract_entities(input_type, input);
            if entities.is_empty() {
                None
            } else {
                match graph::run_full_scan_graph(store, &entities).await {
                    Ok(result) => {
                        signals.extend(network_risk_signal(&result));
                        Some(result)
                    }
                    Err(err) => {
                        warn!(error = %err, "graph scoring failed, continuing without it");
                        None
                    }
                }
            }
        }
        None => None,
    };

    // 5. Aggregate
    let aggregated = aggregate(&signals);
    info!(
        risk_level = %aggregated.risk_level,
        total_weight = aggregated.total_weight,
        "scan complete"
    );

    Ok(ScanReport {
        input_type,
        input_value: input.to_string(),
        risk_level: aggregated.risk_level,
        total_weight: aggregated.total_weight,
        why_bullets: aggregated.display_signals,
        graph,
        ai_detection,
        scanned_at: Utc::now().to_rfc3339(),
    })
}

/// Pattern detectors and trained scorers for one input type. Synchronous
/// and infallible.
fn local_signals(input_type: InputType, input: &str) -> Vec<Signal> {
    let mut signals = Vec::new();

    match input_type {
        InputType::Website => {
            signals.extend(patterns::analyze_url(input));
            let domain = url_features::extract_domain(input);
            if !domain.is_empty() {
                signals.extend(blocklist::check(&domain));
            }
            signals.extend(url_features_signal(input));
        }
        InputType::Message => {
            signals.extend(patterns::analyze_message(input));
            if patterns::detect_romance_context(input) {
                signals.extend(patterns::analyze_romance(input));
            }
            signals.extend(phishing_signal(input));
            signals.extend(spam_signal(input));
        }
        InputType::Phone => {
            signals.extend(patterns::analyze_phone(input));
            signals.extend(phone_campaigns::check(input));
        }
        InputType::Email => {
            signals.extend(patterns::analyze_email(input));
            if let Some(domain) = input.to_lowercase().split('@').nth(1) {
                signals.extend(blocklist::check(domain));
            }
        }
        InputType::Crypto => {
            signals.extend(patterns::analyze_crypto(input));
        }
        InputType::Other => {
            signals.extend(patterns::analyze_other(input));
        }
    }

    signals
}

fn phishing_signal(input: &str) -> Option<Signal> {
    let output = phishing::score(input);
    if output.score == 0 {
        return None;
    }
    let weight = (output.score as f64 * PHISHING_SCORE_FACTOR).round();
    let text = match output.top_match() {
        Some(m) => format!(
            "The wording closely matches known phishing messages (strongest match: \"{m}\")."
        ),
        None => "The wording closely matches known phishing messages.".to_string(),
    };
    Some(Signal::new(text, weight))
}

fn spam_signal(input: &str) -> Option<Signal> {
    let output = spam::score(input);
    if output.score == 0 {
        return None;
    }
    let weight = (output.score as f64 * SPAM_SCORE_FACTOR).round();
    let matched = output.matched_keywords.join(", ");
    Some(Signal::new(
        format!("The wording resembles bulk spam campaigns (matched terms: {matched})."),
        weight,
    ))
}

fn url_features_signal(input: &str) -> Option<Signal> {
    let output = url_features::score(input);
    if output.score == 0 {
        return None;
    }
    let weight = (output.score as f64 * URL_FEATURES_SCORE_FACTOR).round();
    let features = output.matched_keywords.join(", ");
    Some(Signal::new(
        format!("The URL's structure resembles known phishing links ({features})."),
        weight,
    ))
}

fn network_risk_signal(result: &GraphScanResult) -> Option<Signal> {
    let weight = match result.network_risk_label {
        NetworkRiskLabel::High => NETWORK_RISK_HIGH_WEIGHT,
        NetworkRiskLabel::Medium => NETWORK_RISK_MEDIUM_WEIGHT,
        NetworkRiskLabel::Low => return None,
    };
    Some(Signal::new(
        format!(
            "This has appeared alongside known scam activity in previous reports \
             (network risk score {:.3}).",
            result.network_risk_score
        ),
        weight,
    ))
}
