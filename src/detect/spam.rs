// Spam message scorer.
//
// Keyword counts come from the UCI SMS Spam Collection (5,572 labeled
// messages). Only words distinctive to spam are kept — common English
// words ("this", "free", "call") were dropped offline because they flag
// legitimate messages. Counts are normalized against the most frequent
// spam word so each match contributes at most 1.0 to the raw sum.

use super::{saturate, ScorerOutput};

/// Raw occurrence counts in the spam half of the corpus.
const SPAM_KEYWORDS: &[(&str, f64)] = &[
    // Prize / lottery
    ("claim", 113.0),
    ("prize", 92.0),
    ("awarded", 41.0),
    ("winner", 39.0),
    ("congrats", 37.0),
    ("congratulations", 30.0),
    ("lottery", 28.0),
    ("jackpot", 15.0),
    ("sweepstakes", 10.0),
    // Urgency / pressure
    ("urgent", 62.0),
    ("guaranteed", 55.0),
    ("immediately", 25.0),
    ("expires", 20.0),
    // Money / offers
    ("cash", 58.0),
    ("offer", 57.0),
    ("voucher", 20.0),
    ("discount", 18.0),
    ("cashback", 15.0),
    // Action demands
    ("reply", 101.0),
    ("subscribe", 15.0),
    ("unsubscribe", 12.0),
    // SMS-spam vocabulary
    ("mobile", 123.0),
    ("tone", 53.0),
    ("txt", 40.0),
    ("msg", 35.0),
    ("ringtone", 30.0),
    // Financial
    ("refund", 22.0),
    ("billing", 18.0),
    ("invoice", 15.0),
    ("creditcard", 10.0),
    // Classic spam
    ("dating", 12.0),
    ("adult", 10.0),
    ("18+", 8.0),
];

/// Saturation constant. Normalized weights cap at 1.0 per keyword, so two
/// strong matches land near 50 and a pile of matches approaches 100.
const SATURATION_K: f64 = 2.0;

/// A single keyword match is too noisy to flag on its own.
const MIN_MATCHES: usize = 2;

fn max_count() -> f64 {
    SPAM_KEYWORDS
        .iter()
        .map(|&(_, c)| c)
        .fold(f64::MIN, f64::max)
}

/// Score text for spam likelihood. Returns zero unless at least two
/// distinct spam keywords appear.
pub fn score(text: &str) -> ScorerOutput {
    let max = max_count();
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() || c == '+' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut weight_sum = 0.0;
    let mut matched_keywords: Vec<String> = Vec::new();

    for word in cleaned.split_whitespace() {
        if let Some(&(keyword, count)) = SPAM_KEYWORDS.iter().find(|&&(k, _)| k == word) {
            if !matched_keywords.iter().any(|m| m == keyword) {
                weight_sum += count / max;
                matched_keywords.push(keyword.to_string());
            }
        }
    }

    if matched_keywords.len() < MIN_MATCHES {
        return ScorerOutput::default();
    }

    ScorerOutput {
        score: saturate(weight_sum, SATURATION_K),
        matched_keywords,
        matched_phrases: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_match_is_suppressed() {
        let out = score("please claim your luggage at carousel four");
        assert_eq!(out.score, 0);
        assert!(out.matched_keywords.is_empty());
    }

    #[test]
    fn two_matches_flag() {
        let out = score("urgent! claim your prize now");
        assert!(out.score > 0);
        assert!(out.matched_keywords.contains(&"urgent".to_string()));
        assert!(out.matched_keywords.contains(&"claim".to_string()));
    }

    #[test]
    fn repeated_word_counts_once() {
        let a = score("claim claim claim your prize");
        let b = score("claim your prize");
        assert_eq!(a.score, b.score);
        assert_eq!(a.matched_keywords.len(), 2);
    }

    #[test]
    fn punctuation_does_not_block_matching() {
        let out = score("URGENT: reply, claim!");
        assert!(out.matched_keywords.len() >= 3);
    }

    #[test]
    fn normal_conversation_scores_zero() {
        let out = score("running late, see you at the restaurant in twenty minutes");
        assert_eq!(out.score, 0);
    }
}
