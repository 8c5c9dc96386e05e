// SqliteGraphStore — rusqlite backend implementing the GraphStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.
//
// The free functions in queries.rs remain usable against Connection directly,
// which is how most of the unit tests exercise them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Entity, EntityType, GraphStats, RiskScoreResult};
use super::traits::GraphStore;

pub struct SqliteGraphStore {
    conn: Mutex<Connection>,
}

impl SqliteGraphStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open (or create) the database file at the given path.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {path}"))?;
        Ok(Self::new(conn))
    }

    /// In-memory store, used by tests and `--offline` dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl GraphStore for SqliteGraphStore {
    async fn init(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        super::schema::create_tables(&conn)
    }

    async fn upsert_entity(&self, entity_type: EntityType, value: &str) -> Result<(Entity, bool)> {
        let conn = self.conn.lock().await;
        super::queries::upsert_entity(&conn, entity_type, value)
    }

    async fn get_entity(&self, entity_type: EntityType, value: &str) -> Result<Option<Entity>> {
        let conn = self.conn.lock().await;
        super::queries::get_entity(&conn, entity_type, value)
    }

    async fn link_entities(
        &self,
        source_id: i64,
        target_id: i64,
        relationship: &str,
        weight: f64,
    ) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let mut created = 0;
        if super::queries::insert_edge(&tx, source_id, target_id, relationship, weight)? {
            created += 1;
        }
        if super::queries::insert_edge(&tx, target_id, source_id, relationship, weight)? {
            created += 1;
        }
        tx.commit()?;
        Ok(created)
    }

    async fn link_all_pairs(&self, ids: &[i64], relationship: &str) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let mut created = 0;
        for (i, &source) in ids.iter().enumerate() {
            for &target in &ids[i + 1..] {
                // Both directions, so neighbor queries only scan source_id
                if super::queries::insert_edge(&tx, source, target, relationship, 1.0)? {
                    created += 1;
                }
                if super::queries::insert_edge(&tx, target, source, relationship, 1.0)? {
                    created += 1;
                }
            }
        }
        tx.commit()?;
        Ok(created)
    }

    async fn neighbor_ids(&self, entity_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn.lock().await;
        super::queries::neighbor_ids(&conn, entity_id)
    }

    async fn entities_by_ids(&self, ids: &[i64]) -> Result<Vec<Entity>> {
        let conn = self.conn.lock().await;
        super::queries::entities_by_ids(&conn, ids)
    }

    async fn cache_score(&self, entity_id: i64, score: &RiskScoreResult) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::cache_score(&conn, entity_id, score)
    }

    async fn cached_score(&self, entity_id: i64) -> Result<Option<RiskScoreResult>> {
        let conn = self.conn.lock().await;
        super::queries::get_cached_score(&conn, entity_id)
    }

    async fn mark_confirmed_scam(&self, entity_type: EntityType, value: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::mark_confirmed_scam(&conn, entity_type, value)
    }

    async fn increment_report_count(&self, entity_type: EntityType, value: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::increment_report_count(&conn, entity_type, value)
    }

    async fn stats(&self) -> Result<GraphStats> {
        let conn = self.conn.lock().await;
        super::queries::graph_stats(&conn)
    }
}
