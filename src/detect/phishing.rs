// Phishing email/message scorer.
//
// Keyword weights were derived offline from a labeled corpus of ~5,100
// emails (2,036 phishing, 3,064 legitimate): each weight is
// log2(frequency_in_phishing / frequency_in_legitimate), so a weight of
// 6.9 means the word appears over 100x more often in phishing mail.
// This is a fixed table, deliberately not a runtime model.

use std::collections::HashSet;

use super::{saturate, ScorerOutput};

/// Saturation constant: the raw weight sum at which the score reaches 50.
const SATURATION_K: f64 = 15.0;

/// Single-word keywords and their log-odds weights. Entries containing a
/// space are matched as substrings instead of against the word set.
const KEYWORDS: &[(&str, f64)] = &[
    // Extreme signals (>20x corpus ratio)
    ("mortgage", 6.9),
    ("cialis", 6.8),
    ("uncertainties", 6.4),
    ("viagra", 6.2),
    ("pills", 6.0),
    ("mailings", 5.8),
    ("lottery", 5.0),
    ("prescription", 5.0),
    // Strong signals (10-20x)
    ("statements", 3.5),
    ("advertisement", 3.4),
    ("investing", 3.3),
    ("guaranteed", 3.3),
    // Medium signals (5-10x)
    ("remove", 3.1),
    ("orders", 2.7),
    ("bulk", 2.6),
    ("shipping", 2.5),
    ("subscribers", 2.5),
    ("sites", 2.4),
    ("bonus", 2.3),
    ("dollars", 2.3),
    ("save", 2.2),
    ("lose", 2.2),
    ("invest", 2.2),
    ("money", 2.1),
    ("advertising", 2.1),
    ("links", 2.0),
    ("thousands", 2.0),
    // Moderate signals (3-5x)
    ("hundreds", 1.9),
    ("addresses", 1.8),
    ("receiving", 1.8),
    ("insurance", 1.8),
    ("absolutely", 1.8),
    // Hand-weighted additions targeting current scam campaigns
    ("interac", 5.0),
    ("etransfer", 5.0),
    ("e-transfer", 5.0),
    ("congratulations", 3.0),
    ("inheritance", 4.5),
    ("beneficiary", 4.0),
    ("moneygram", 5.0),
    ("canada revenue", 4.5),
    ("tax refund", 4.5),
    ("arrest warrant", 6.0),
    ("suspended account", 4.0),
    ("verify your identity", 4.0),
    ("click immediately", 4.5),
    ("act now", 3.5),
    ("limited time", 3.0),
    ("you have been selected", 4.0),
    ("unclaimed funds", 5.0),
    ("nigerian prince", 6.5),
    ("western union", 5.0),
    ("gift card", 4.5),
    ("bitcoin payment", 4.5),
    ("crypto wallet", 4.0),
];

/// Multi-word phishing phrases, always matched by substring scan.
const PHRASES: &[(&str, f64)] = &[
    ("verify your account", 4.0),
    ("confirm your identity", 4.0),
    ("unusual activity", 3.5),
    ("suspicious activity", 3.5),
    ("account will be suspended", 4.5),
    ("account will be closed", 4.5),
    ("click the link below", 3.5),
    ("click here to verify", 4.0),
    ("update your payment", 3.5),
    ("failed delivery", 3.0),
    ("package could not be delivered", 3.5),
    ("you have won", 4.0),
    ("claim your prize", 4.5),
    ("dear valued customer", 3.0),
    ("dear account holder", 3.5),
    ("from the desk of", 3.0),
    ("act within 24 hours", 4.0),
    ("respond immediately", 3.5),
    ("failure to comply", 4.0),
    ("legal action will be taken", 4.5),
    ("your account has been compromised", 4.0),
    ("reset your password", 2.5),
    ("amazon order", 2.0),
    ("apple id", 2.5),
    ("paypal transaction", 2.5),
];

/// Score text for phishing indicators. 0 means no evidence; the score
/// saturates toward (but never trivially reaches) 100 as evidence stacks.
pub fn score(text: &str) -> ScorerOutput {
    score_with_table(text, KEYWORDS, PHRASES, SATURATION_K)
}

/// Table-parameterized scoring, used directly by tests and by `score`.
pub fn score_with_table(
    text: &str,
    keywords: &[(&str, f64)],
    phrases: &[(&str, f64)],
    k: f64,
) -> ScorerOutput {
    let lower = text.to_lowercase();
    let word_set: HashSet<&str> = lower.split_whitespace().collect();

    let mut weight_sum = 0.0;
    let mut matched_keywords = Vec::new();
    let mut matched_phrases = Vec::new();

    for &(keyword, weight) in keywords {
        // Single words hit the word set (O(1) per keyword); multi-word
        // entries fall back to a substring scan.
        let hit = if keyword.contains(' ') {
            lower.contains(keyword)
        } else {
            word_set.contains(keyword)
        };
        if hit {
            weight_sum += weight;
            matched_keywords.push(keyword.to_string());
        }
    }

    for &(phrase, weight) in phrases {
        if lower.contains(phrase) {
            weight_sum += weight;
            matched_phrases.push(phrase.to_string());
        }
    }

    ScorerOutput {
        score: saturate(weight_sum, k),
        matched_keywords,
        matched_phrases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keyword_scores_nonzero_below_100() {
        let out = score_with_table(
            "ask about our mortgage rates",
            &[("mortgage", 6.9)],
            &[],
            15.0,
        );
        assert!(out.score > 0);
        assert!(out.score < 100);
        assert_eq!(out.matched_keywords, vec!["mortgage".to_string()]);
        assert!(out.matched_phrases.is_empty());
    }

    #[test]
    fn clean_text_scores_zero() {
        let out = score("see you at the meeting tomorrow at three");
        assert_eq!(out.score, 0);
        assert!(out.matched_keywords.is_empty());
    }

    #[test]
    fn phrases_match_by_substring() {
        let out = score("please verify your account or your account will be suspended");
        assert!(out
            .matched_phrases
            .contains(&"verify your account".to_string()));
        assert!(out
            .matched_phrases
            .contains(&"account will be suspended".to_string()));
        assert!(out.score > 30);
    }

    #[test]
    fn multi_word_keywords_match_by_substring() {
        let out = score("we detected an arrest warrant in your name");
        assert!(out
            .matched_keywords
            .contains(&"arrest warrant".to_string()));
    }

    #[test]
    fn stacked_evidence_saturates() {
        let out = score(
            "congratulations you have won the lottery claim your prize \
             send a gift card via western union or moneygram immediately",
        );
        assert!(out.score > 60, "heavy phishing text scored {}", out.score);
        assert!(out.score <= 100);
    }

    #[test]
    fn top_match_prefers_phrases() {
        let out = score("claim your prize in the lottery");
        assert_eq!(out.top_match(), Some("claim your prize"));
    }
}
