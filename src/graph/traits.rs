// Storage abstraction for the entity graph.
//
// The risk propagation code and the scan pipeline only ever see this trait,
// so the SQLite backend stays swappable (and tests can run against an
// in-memory database).

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Entity, EntityType, GraphStats, RiskScoreResult};

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create tables and run migrations. Idempotent.
    async fn init(&self) -> Result<()>;

    /// Insert an entity or refresh its `last_seen`. Values are normalized
    /// (lowercased, trimmed) before storage. Returns the stored entity and
    /// whether a new row was created.
    async fn upsert_entity(&self, entity_type: EntityType, value: &str) -> Result<(Entity, bool)>;

    /// Look up an entity by (type, value).
    async fn get_entity(&self, entity_type: EntityType, value: &str) -> Result<Option<Entity>>;

    /// Link two entities symmetrically: one directed edge each way, written
    /// as a unit. Self-loops and duplicates are no-ops. Returns the number
    /// of new edge rows (0 to 2).
    async fn link_entities(
        &self,
        source_id: i64,
        target_id: i64,
        relationship: &str,
        weight: f64,
    ) -> Result<usize>;

    /// Link every pair of the given entities in both directions, in a single
    /// transaction. Returns the number of new edges.
    async fn link_all_pairs(&self, ids: &[i64], relationship: &str) -> Result<usize>;

    /// Ids of all entities the given one has an outgoing edge to.
    async fn neighbor_ids(&self, entity_id: i64) -> Result<Vec<i64>>;

    /// Load entities by id. Missing ids are skipped.
    async fn entities_by_ids(&self, ids: &[i64]) -> Result<Vec<Entity>>;

    /// Persist a computed risk score for later lookup.
    async fn cache_score(&self, entity_id: i64, score: &RiskScoreResult) -> Result<()>;

    /// Read back the last cached score, if any.
    async fn cached_score(&self, entity_id: i64) -> Result<Option<RiskScoreResult>>;

    /// Flag an entity as a confirmed scam. Returns false if it doesn't exist.
    async fn mark_confirmed_scam(&self, entity_type: EntityType, value: &str) -> Result<bool>;

    /// Bump an entity's report count. Returns false if it doesn't exist.
    async fn increment_report_count(&self, entity_type: EntityType, value: &str) -> Result<bool>;

    /// Aggregate counts for the `status` command.
    async fn stats(&self) -> Result<GraphStats>;
}
