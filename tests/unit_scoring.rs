// Scoring and detection tests through the public API.
//
// Everything here is pure: no network, no database, no filesystem.

use grift::detect::ai_text::{self, AiLabel};
use grift::detect::{blocklist, patterns, phishing, spam, url_features};
use grift::scoring::{aggregate, RiskLevel, Signal};

// ============================================================
// Aggregation
// ============================================================

#[test]
fn risk_level_thresholds_are_inclusive_below() {
    assert_eq!(RiskLevel::from_total_weight(0.0), RiskLevel::Safe);
    assert_eq!(RiskLevel::from_total_weight(30.0), RiskLevel::Suspicious);
    assert_eq!(RiskLevel::from_total_weight(30.1), RiskLevel::HighRisk);
    assert_eq!(RiskLevel::from_total_weight(60.0), RiskLevel::HighRisk);
    assert_eq!(RiskLevel::from_total_weight(60.1), RiskLevel::VeryLikelyScam);
}

#[test]
fn aggregation_is_deterministic() {
    let signals = vec![
        Signal::new("The message uses urgent threatening language to pressure you", 30.0),
        Signal::new("This website was created only 3 days ago which is suspicious", 30.0),
        Signal::new("This domain ranks among the most visited websites globally", -15.0),
    ];
    let first = aggregate(&signals);
    let second = aggregate(&signals);
    assert_eq!(first.total_weight, second.total_weight);
    assert_eq!(first.display_signals, second.display_signals);
}

#[test]
fn near_duplicate_signals_count_once() {
    let signals = vec![
        Signal::new(
            "This website address contains suspicious hyphenated brand words today",
            25.0,
        ),
        Signal::new(
            "This website address contains suspicious hyphenated brand words overall",
            20.0,
        ),
    ];
    let result = aggregate(&signals);
    // First seen wins, second is dropped as a near-duplicate
    assert_eq!(result.total_weight, 25.0);
    assert_eq!(result.display_signals.len(), 1);
}

#[test]
fn zero_risk_signals_yield_reassurance_line() {
    let result = aggregate(&[Signal::new("Registered for over 10 years, a positive sign", -10.0)]);
    assert_eq!(result.risk_level, RiskLevel::Safe);
    assert!(result.display_signals[0].contains("warning signs"));
}

#[test]
fn display_caps_risk_signals_at_five() {
    let signals = vec![
        Signal::new("The domain ending is commonly associated with scam websites", 20.0),
        Signal::new("This message threatens arrest unless payment happens immediately", 35.0),
        Signal::new("The sender requests untraceable gift card payments upfront", 30.0),
        Signal::new("Claims about winning unclaimed lottery prizes are classic bait", 25.0),
        Signal::new("Generic greetings suggest bulk-sent correspondence rather than personal", 10.0),
        Signal::new("Embedded links resolve through anonymous shortener services", 15.0),
        Signal::new("Unrealistic daily earnings promises indicate recruitment fraud", 22.0),
    ];
    let result = aggregate(&signals);
    assert_eq!(result.display_signals.len(), 5);
    // Strongest first
    assert!(result.display_signals[0].contains("arrest"));
}

// ============================================================
// Trained scorers
// ============================================================

#[test]
fn single_strong_keyword_scores_between_bounds() {
    let output = phishing::score("ask about our mortgage offers");
    assert!(output.score > 0);
    assert!(output.score < 100);
    assert!(output.matched_keywords.iter().any(|k| k == "mortgage"));
}

#[test]
fn clean_text_scores_zero_everywhere() {
    let text = "the quarterly engineering sync moved to thursday afternoon";
    assert_eq!(phishing::score(text).score, 0);
    assert_eq!(spam::score(text).score, 0);
}

#[test]
fn spam_scorer_needs_two_matches() {
    // One spam keyword alone is not enough evidence
    let output = spam::score("please reply when you can");
    assert_eq!(output.score, 0);

    let output = spam::score("reply now to claim your free prize");
    assert!(output.score > 0);
}

#[test]
fn url_features_flag_structurally_phishy_links() {
    let phishy = url_features::score("http://192.168.12.33/secure-login-verify-account-update");
    assert!(phishy.score > 0);

    let plain = url_features::score("https://example.com/about");
    assert!(plain.score < phishy.score);
}

// ============================================================
// Pattern detectors
// ============================================================

#[test]
fn lookalike_domain_is_flagged() {
    let signals = patterns::analyze_url("https://paypal-account-verify.tk/login");
    assert!(!signals.is_empty());
    let total: f64 = signals.iter().map(|s| s.weight).sum();
    assert!(total >= 30.0);
}

#[test]
fn blocklisted_domain_and_subdomain_hit() {
    assert!(blocklist::is_domain_blocked("cra-refund-portal.com").is_some());
    assert!(blocklist::is_domain_blocked("login.cra-refund-portal.com").is_some());
    assert!(blocklist::is_domain_blocked("example.com").is_none());
}

// ============================================================
// AI authorship
// ============================================================

#[test]
fn ten_char_input_is_too_short() {
    let result = ai_text::detect("hello you!");
    assert_eq!(result.label, AiLabel::TooShort);
    assert_eq!(result.ai_probability, 0.0);
}

#[test]
fn ai_probability_is_bounded() {
    let text = "Furthermore, it is important to note that our comprehensive solution \
                leverages cutting-edge technology. Additionally, we delve into robust \
                frameworks. Moreover, the seamless integration fosters a pivotal \
                transformation. In conclusion, this underscores our commitment.";
    let result = ai_text::detect(text);
    assert!(result.ai_probability >= 0.0 && result.ai_probability <= 1.0);
    assert_ne!(result.label, AiLabel::TooShort);
}
