// Graph data models — Rust structs that map to database rows.
//
// Separate from the queries so other modules can use them without
// depending on rusqlite directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The kinds of identifiers the graph tracks across scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Email,
    Phone,
    Url,
    Domain,
    CryptoWallet,
    Ip,
    Username,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Email => "email",
            EntityType::Phone => "phone",
            EntityType::Url => "url",
            EntityType::Domain => "domain",
            EntityType::CryptoWallet => "crypto_wallet",
            EntityType::Ip => "ip",
            EntityType::Username => "username",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(EntityType::Email),
            "phone" => Some(EntityType::Phone),
            "url" => Some(EntityType::Url),
            "domain" => Some(EntityType::Domain),
            "crypto_wallet" => Some(EntityType::CryptoWallet),
            "ip" => Some(EntityType::Ip),
            "username" => Some(EntityType::Username),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked entity. At most one row exists per (type, normalized value).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub entity_type: EntityType,
    /// Normalized (lowercased, trimmed) before insert.
    pub value: String,
    pub report_count: i64,
    pub confirmed_scam: bool,
    pub first_seen: String,
    pub last_seen: String,
}

/// A (type, value) pair extracted from a scan, before it touches the DB.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub value: String,
}

impl EntityRef {
    pub fn new(entity_type: EntityType, value: impl Into<String>) -> Self {
        Self {
            entity_type,
            value: value.into(),
        }
    }
}

/// Three-way label for graph-derived risk, independent of the text-derived
/// RiskLevel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkRiskLabel {
    Low,
    Medium,
    High,
}

impl NetworkRiskLabel {
    /// Fixed thresholds over the [0,1] graph score.
    pub fn from_score(score: f64) -> Self {
        if score > 0.6 {
            NetworkRiskLabel::High
        } else if score > 0.3 {
            NetworkRiskLabel::Medium
        } else {
            NetworkRiskLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkRiskLabel::Low => "LOW",
            NetworkRiskLabel::Medium => "MEDIUM",
            NetworkRiskLabel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for NetworkRiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The computed risk for one entity, also what gets cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScoreResult {
    /// 0.0 to 1.0, rounded to 3 decimals.
    pub score: f64,
    pub label: NetworkRiskLabel,
    pub degree_connections: usize,
    pub scam_neighbor_count: usize,
    pub second_degree_scams: usize,
}

impl RiskScoreResult {
    pub fn isolated() -> Self {
        Self {
            score: 0.0,
            label: NetworkRiskLabel::Low,
            degree_connections: 0,
            scam_neighbor_count: 0,
            second_degree_scams: 0,
        }
    }
}

/// The graph-side outcome of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphScanResult {
    pub network_risk_score: f64,
    pub network_risk_label: NetworkRiskLabel,
    /// Keyed by the entity's (pre-normalization) submitted value.
    pub entity_scores: HashMap<String, RiskScoreResult>,
    pub entities_created: usize,
    pub edges_created: usize,
}

impl GraphScanResult {
    pub fn empty() -> Self {
        Self {
            network_risk_score: 0.0,
            network_risk_label: NetworkRiskLabel::Low,
            entity_scores: HashMap::new(),
            entities_created: 0,
            edges_created: 0,
        }
    }
}

/// Aggregate counts for the `status` command.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStats {
    pub entity_count: i64,
    pub edge_count: i64,
    pub confirmed_scam_count: i64,
    pub cached_score_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_round_trips() {
        for t in [
            EntityType::Email,
            EntityType::Phone,
            EntityType::Url,
            EntityType::Domain,
            EntityType::CryptoWallet,
            EntityType::Ip,
            EntityType::Username,
        ] {
            assert_eq!(EntityType::parse(t.as_str()), Some(t));
        }
        assert_eq!(EntityType::parse("carrier_pigeon"), None);
    }

    #[test]
    fn network_label_boundaries() {
        assert_eq!(NetworkRiskLabel::from_score(0.0), NetworkRiskLabel::Low);
        assert_eq!(NetworkRiskLabel::from_score(0.3), NetworkRiskLabel::Low);
        assert_eq!(NetworkRiskLabel::from_score(0.31), NetworkRiskLabel::Medium);
        assert_eq!(NetworkRiskLabel::from_score(0.6), NetworkRiskLabel::Medium);
        assert_eq!(NetworkRiskLabel::from_score(0.61), NetworkRiskLabel::High);
    }
}
