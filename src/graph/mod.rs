// Entity relationship graph — persistent, append-mostly state shared by
// every scan. Entities (phones, emails, domains, wallets) accumulate
// across scans; edges record that entities were seen together; risk
// propagates over neighbors so previously seen scam infrastructure
// raises the score of anything linked to it.

pub mod models;
pub mod risk;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use models::{
    Entity, EntityRef, EntityType, GraphScanResult, GraphStats, NetworkRiskLabel, RiskScoreResult,
};
pub use risk::{calculate_risk_score, run_full_scan_graph};
pub use traits::GraphStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteGraphStore;
