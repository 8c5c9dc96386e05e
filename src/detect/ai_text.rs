// Heuristic AI-authorship detector — stylometric signals only, no model.
//
// Seven independent sub-signals, each normalized to [0,1] by fixed
// empirical breakpoints. The final probability is a weighted average of
// the sub-signals that were actually computable for this text; weights
// of skipped sub-signals are excluded entirely, not treated as zero.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Texts with fewer characters than this fail closed as TooShort rather
/// than guessing.
const MIN_TEXT_CHARS: usize = 50;

/// Connectives AI models favor far more than human writers.
const AI_TRANSITIONS: &[&str] = &[
    "furthermore", "moreover", "additionally", "in conclusion", "consequently",
    "nevertheless", "it is important to note", "it is worth noting", "in summary",
    "in essence", "to summarize", "that being said", "having said that",
    "it's important to", "it's worth mentioning", "on the other hand", "in other words",
    "as a result", "for instance", "in particular", "specifically", "notably",
    "significantly", "essentially", "fundamentally",
];

/// Vocabulary AI models reach for constantly.
const AI_BUZZWORDS: &[&str] = &[
    "delve into", "delve deeper", "it's crucial", "landscape", "comprehensive",
    "multifaceted", "robust", "leverage", "cutting-edge", "groundbreaking", "game-changer",
    "paradigm", "holistic", "synergy", "ecosystem", "streamline", "empower", "innovative",
    "transformative", "dynamic", "pivotal", "nuanced", "realm", "tapestry", "navigating",
    "ever-evolving", "foster", "harness",
];

/// Modal and qualifying words, matched as whole words.
const HEDGE_WORDS: &[&str] = &[
    "may", "might", "could", "potentially", "possibly", "generally", "typically", "often",
    "usually", "tends to",
];

/// Fixed contribution weight per sub-signal name.
const SIGNAL_WEIGHTS: &[(&str, f64)] = &[
    ("sentence_uniformity", 0.2),
    ("transition_density", 0.2),
    ("ai_buzzwords", 0.2),
    ("vocabulary_diversity", 0.15),
    ("paragraph_regularity", 0.1),
    ("list_formatting", 0.05),
    ("hedging_language", 0.1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiLabel {
    AiGenerated,
    Uncertain,
    LikelyHuman,
    TooShort,
}

/// One stylometric sub-signal with its normalized score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSignal {
    pub name: String,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiDetectionResult {
    pub ai_probability: f64,
    pub label: AiLabel,
    pub signals: Vec<AiSignal>,
}

/// Analyze text for AI-authorship markers.
pub fn detect(text: &str) -> AiDetectionResult {
    // chars, not bytes, so multibyte text doesn't dodge the gate
    if text.chars().count() < MIN_TEXT_CHARS {
        return AiDetectionResult {
            ai_probability: 0.0,
            label: AiLabel::TooShort,
            signals: Vec::new(),
        };
    }

    let lower = text.to_lowercase();
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .filter(|s| s.trim().len() > 5)
        .collect();
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut signals = Vec::new();

    // 1. Sentence length uniformity — needs at least 3 sentences.
    if sentences.len() >= 3 {
        let lengths: Vec<f64> = sentences
            .iter()
            .map(|s| s.split_whitespace().count() as f64)
            .collect();
        let cv = coefficient_of_variation(&lengths);
        // Human writing: CV > 0.5. AI: CV < 0.35.
        let score = breakpoints(cv, &[(0.25, 0.9), (0.35, 0.6), (0.5, 0.3)], 0.05);
        signals.push(AiSignal {
            name: "sentence_uniformity".into(),
            score,
            description: format!(
                "Sentence length variation: {cv:.2} (AI tends toward uniformity)"
            ),
        });
    }

    // 2. Transition phrase density per sentence.
    let transition_count = AI_TRANSITIONS.iter().filter(|t| lower.contains(*t)).count();
    let transition_density = transition_count as f64 / sentences.len().max(1) as f64;
    let score = breakpoints_desc(
        transition_density,
        &[(0.4, 0.85), (0.25, 0.6), (0.1, 0.3)],
        0.05,
    );
    signals.push(AiSignal {
        name: "transition_density".into(),
        score,
        description: format!("{transition_count} AI-typical transition phrases found"),
    });

    // 3. Buzzword count.
    let buzzword_count = AI_BUZZWORDS.iter().filter(|b| lower.contains(*b)).count();
    let score = match buzzword_count {
        c if c >= 5 => 0.9,
        c if c >= 3 => 0.65,
        c if c >= 1 => 0.3,
        _ => 0.0,
    };
    signals.push(AiSignal {
        name: "ai_buzzwords".into(),
        score,
        description: format!("{buzzword_count} AI-typical buzzwords detected"),
    });

    // 4. Vocabulary diversity (type-token ratio).
    let unique: HashSet<String> = words
        .iter()
        .map(|w| {
            w.to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase())
                .collect()
        })
        .collect();
    let ttr = unique.len() as f64 / words.len().max(1) as f64;
    let score = breakpoints(ttr, &[(0.35, 0.8), (0.45, 0.5), (0.55, 0.2)], 0.05);
    signals.push(AiSignal {
        name: "vocabulary_diversity".into(),
        score,
        description: format!("Type-token ratio: {ttr:.2} (AI tends toward lower diversity)"),
    });

    // 5. Paragraph regularity — skipped under 3 paragraphs; its weight is
    // then excluded from the average entirely.
    let paragraphs: Vec<&str> = split_paragraphs(text)
        .into_iter()
        .filter(|p| p.trim().len() > 20)
        .collect();
    if paragraphs.len() >= 3 {
        let lengths: Vec<f64> = paragraphs.iter().map(|p| p.len() as f64).collect();
        let cv = coefficient_of_variation(&lengths);
        let score = breakpoints(cv, &[(0.2, 0.8), (0.35, 0.5)], 0.1);
        signals.push(AiSignal {
            name: "paragraph_regularity".into(),
            score,
            description: format!("Paragraph length variation: {cv:.2}"),
        });
    }

    // 6. Bullet/list density — only reported when lists are present.
    let list_items = list_item_re()
        .find_iter(text)
        .count();
    if list_items > 0 {
        let score = if list_items > 5 {
            0.7
        } else if list_items > 2 {
            0.4
        } else {
            0.05
        };
        signals.push(AiSignal {
            name: "list_formatting".into(),
            score,
            description: format!("{list_items} list items detected (AI overuses structured lists)"),
        });
    }

    // 7. Hedging language, whole-word matches.
    let word_set: HashSet<String> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect();
    let hedge_count = HEDGE_WORDS
        .iter()
        .filter(|h| {
            if h.contains(' ') {
                lower.contains(*h)
            } else {
                word_set.contains(**h)
            }
        })
        .count();
    let score = match hedge_count {
        c if c >= 6 => 0.7,
        c if c >= 4 => 0.45,
        c if c >= 2 => 0.15,
        _ => 0.0,
    };
    signals.push(AiSignal {
        name: "hedging_language".into(),
        score,
        description: format!("{hedge_count} hedging/qualifying phrases detected"),
    });

    // Weighted average over computable sub-signals only.
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for signal in &signals {
        let weight = SIGNAL_WEIGHTS
            .iter()
            .find(|(n, _)| *n == signal.name)
            .map(|&(_, w)| w)
            .unwrap_or(0.1);
        weighted_sum += signal.score * weight;
        weight_total += weight;
    }
    let ai_probability = if weight_total > 0.0 {
        (weighted_sum / weight_total * 1000.0).round() / 1000.0
    } else {
        0.0
    };

    let label = if ai_probability > 0.7 {
        AiLabel::AiGenerated
    } else if ai_probability > 0.4 {
        AiLabel::Uncertain
    } else {
        AiLabel::LikelyHuman
    };

    AiDetectionResult {
        ai_probability,
        label,
        signals,
    }
}

/// Standard deviation over mean; 0 for degenerate input.
fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt() / mean
}

/// Map a value through ascending breakpoints: the first `(limit, score)`
/// with `value < limit` wins, else the default.
fn breakpoints(value: f64, table: &[(f64, f64)], default: f64) -> f64 {
    for &(limit, score) in table {
        if value < limit {
            return score;
        }
    }
    default
}

/// Same, but for descending thresholds: first `(limit, score)` with
/// `value > limit` wins.
fn breakpoints_desc(value: f64, table: &[(f64, f64)], default: f64) -> f64 {
    for &(limit, score) in table {
        if value > limit {
            return score;
        }
    }
    default
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").flat_map(|p| p.split("\r\n\r\n")).collect()
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:[-•*]|\d+\.)\s").unwrap())
}
