// Graph queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

use super::models::{Entity, EntityType, GraphStats, NetworkRiskLabel, RiskScoreResult};

/// Canonical form used for the UNIQUE(entity_type, value) constraint.
pub fn normalize_value(value: &str) -> String {
    value.trim().to_lowercase()
}

fn row_to_entity(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entity> {
    let type_str: String = row.get(1)?;
    let entity_type = EntityType::parse(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown entity type: {type_str}").into(),
        )
    })?;
    Ok(Entity {
        id: row.get(0)?,
        entity_type,
        value: row.get(2)?,
        report_count: row.get(3)?,
        confirmed_scam: row.get::<_, i64>(4)? != 0,
        first_seen: row.get(5)?,
        last_seen: row.get(6)?,
    })
}

const ENTITY_COLUMNS: &str =
    "id, entity_type, value, report_count, confirmed_scam, first_seen, last_seen";

// --- Entities ---

/// Look up an entity by (type, value). The value is normalized before lookup.
pub fn get_entity(
    conn: &Connection,
    entity_type: EntityType,
    value: &str,
) -> Result<Option<Entity>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTITY_COLUMNS} FROM entities WHERE entity_type = ?1 AND value = ?2"
    ))?;
    let result = stmt
        .query_row(
            params![entity_type.as_str(), normalize_value(value)],
            row_to_entity,
        )
        .optional()?;
    Ok(result)
}

/// Insert an entity or refresh `last_seen` on an existing one.
///
/// Returns the stored entity and whether a new row was created.
pub fn upsert_entity(
    conn: &Connection,
    entity_type: EntityType,
    value: &str,
) -> Result<(Entity, bool)> {
    let normalized = normalize_value(value);

    let changed = conn.execute(
        "INSERT OR IGNORE INTO entities (entity_type, value) VALUES (?1, ?2)",
        params![entity_type.as_str(), normalized],
    )?;
    let created = changed > 0;

    if !created {
        conn.execute(
            "UPDATE entities SET last_seen = datetime('now')
             WHERE entity_type = ?1 AND value = ?2",
            params![entity_type.as_str(), normalized],
        )?;
    }

    let entity = get_entity(conn, entity_type, &normalized)?
        .ok_or_else(|| anyhow!("entity vanished after upsert: {entity_type} {normalized}"))?;
    Ok((entity, created))
}

/// Load entities by id, in no particular order. Missing ids are skipped.
pub fn entities_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<Entity>> {
    let mut stmt =
        conn.prepare(&format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE id = ?1"))?;
    let mut entities = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(entity) = stmt.query_row(params![id], row_to_entity).optional()? {
            entities.push(entity);
        }
    }
    Ok(entities)
}

/// Flag an entity as a confirmed scam. Returns false if no such entity exists.
pub fn mark_confirmed_scam(conn: &Connection, entity_type: EntityType, value: &str) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE entities SET confirmed_scam = 1, last_seen = datetime('now')
         WHERE entity_type = ?1 AND value = ?2",
        params![entity_type.as_str(), normalize_value(value)],
    )?;
    Ok(changed > 0)
}

/// Bump an entity's report count by one. Returns false if no such entity exists.
pub fn increment_report_count(
    conn: &Connection,
    entity_type: EntityType,
    value: &str,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE entities SET report_count = report_count + 1, last_seen = datetime('now')
         WHERE entity_type = ?1 AND value = ?2",
        params![entity_type.as_str(), normalize_value(value)],
    )?;
    Ok(changed > 0)
}

// --- Edges ---

/// Write one directed edge row. Self-loops and duplicate links are silently
/// skipped. Callers are responsible for inserting the reverse direction;
/// the public store API only exposes symmetric linking.
pub(crate) fn insert_edge(
    conn: &Connection,
    source_id: i64,
    target_id: i64,
    relationship: &str,
    weight: f64,
) -> Result<bool> {
    if source_id == target_id {
        return Ok(false);
    }
    let changed = conn.execute(
        "INSERT OR IGNORE INTO entity_edges (source_id, target_id, relationship, weight)
         VALUES (?1, ?2, ?3, ?4)",
        params![source_id, target_id, relationship, weight],
    )?;
    Ok(changed > 0)
}

/// Ids of every entity the given one has an outgoing edge to.
pub fn neighbor_ids(conn: &Connection, entity_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT target_id FROM entity_edges WHERE source_id = ?1 ORDER BY target_id",
    )?;
    let rows = stmt.query_map(params![entity_id], |row| row.get(0))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

// --- Risk score cache ---

/// Save or refresh a computed risk score for an entity.
pub fn cache_score(conn: &Connection, entity_id: i64, score: &RiskScoreResult) -> Result<()> {
    conn.execute(
        "INSERT INTO entity_risk_scores
            (entity_id, score, label, degree_connections, scam_neighbor_count,
             second_degree_scams, computed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
         ON CONFLICT(entity_id) DO UPDATE SET
            score = ?2,
            label = ?3,
            degree_connections = ?4,
            scam_neighbor_count = ?5,
            second_degree_scams = ?6,
            computed_at = datetime('now')",
        params![
            entity_id,
            score.score,
            score.label.as_str(),
            score.degree_connections as i64,
            score.scam_neighbor_count as i64,
            score.second_degree_scams as i64,
        ],
    )?;
    Ok(())
}

/// Read back a cached score, if one has been computed for this entity.
pub fn get_cached_score(conn: &Connection, entity_id: i64) -> Result<Option<RiskScoreResult>> {
    let mut stmt = conn.prepare(
        "SELECT score, degree_connections, scam_neighbor_count, second_degree_scams
         FROM entity_risk_scores WHERE entity_id = ?1",
    )?;
    let result = stmt
        .query_row(params![entity_id], |row| {
            let score: f64 = row.get(0)?;
            Ok(RiskScoreResult {
                score,
                // Relabel from the stored score so threshold changes take
                // effect without recomputation.
                label: NetworkRiskLabel::from_score(score),
                degree_connections: row.get::<_, i64>(1)? as usize,
                scam_neighbor_count: row.get::<_, i64>(2)? as usize,
                second_degree_scams: row.get::<_, i64>(3)? as usize,
            })
        })
        .optional()?;
    Ok(result)
}

// --- Stats ---

/// Aggregate counts for the `status` command.
pub fn graph_stats(conn: &Connection) -> Result<GraphStats> {
    let entity_count: i64 = conn.query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))?;
    let edge_count: i64 = conn.query_row("SELECT COUNT(*) FROM entity_edges", [], |r| r.get(0))?;
    let confirmed_scam_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entities WHERE confirmed_scam = 1",
        [],
        |r| r.get(0),
    )?;
    let cached_score_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM entity_risk_scores", [], |r| r.get(0))?;
    Ok(GraphStats {
        entity_count,
        edge_count,
        confirmed_scam_count,
        cached_score_count,
    })
}

// rusqlite's optional() helper — converts "no rows" into None
use rusqlite::OptionalExtension;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::schema::create_tables;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_upsert_normalizes_and_dedupes() {
        let conn = test_db();

        let (first, created) = upsert_entity(&conn, EntityType::Domain, "  Example.COM ").unwrap();
        assert!(created);
        assert_eq!(first.value, "example.com");

        let (second, created) = upsert_entity(&conn, EntityType::Domain, "example.com").unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);

        let stats = graph_stats(&conn).unwrap();
        assert_eq!(stats.entity_count, 1);
    }

    #[test]
    fn test_same_value_different_type_is_distinct() {
        let conn = test_db();
        let (a, _) = upsert_entity(&conn, EntityType::Domain, "scam.example").unwrap();
        let (b, _) = upsert_entity(&conn, EntityType::Url, "scam.example").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_self_loop_is_skipped() {
        let conn = test_db();
        let (e, _) = upsert_entity(&conn, EntityType::Email, "a@example.com").unwrap();
        assert!(!insert_edge(&conn, e.id, e.id, "same_scan", 1.0).unwrap());
        assert_eq!(graph_stats(&conn).unwrap().edge_count, 0);
    }

    #[test]
    fn test_duplicate_edge_is_skipped() {
        let conn = test_db();
        let (a, _) = upsert_entity(&conn, EntityType::Email, "a@example.com").unwrap();
        let (b, _) = upsert_entity(&conn, EntityType::Phone, "15551234567").unwrap();

        assert!(insert_edge(&conn, a.id, b.id, "same_scan", 1.0).unwrap());
        assert!(!insert_edge(&conn, a.id, b.id, "same_scan", 1.0).unwrap());
        assert_eq!(graph_stats(&conn).unwrap().edge_count, 1);

        let neighbors = neighbor_ids(&conn, a.id).unwrap();
        assert_eq!(neighbors, vec![b.id]);
    }

    #[test]
    fn test_mark_confirmed_scam() {
        let conn = test_db();
        upsert_entity(&conn, EntityType::Domain, "bad.example").unwrap();

        assert!(mark_confirmed_scam(&conn, EntityType::Domain, "BAD.example").unwrap());
        assert!(!mark_confirmed_scam(&conn, EntityType::Domain, "unknown.example").unwrap());

        let entity = get_entity(&conn, EntityType::Domain, "bad.example")
            .unwrap()
            .unwrap();
        assert!(entity.confirmed_scam);
    }

    #[test]
    fn test_increment_report_count() {
        let conn = test_db();
        upsert_entity(&conn, EntityType::Phone, "18005551234").unwrap();

        assert!(increment_report_count(&conn, EntityType::Phone, "18005551234").unwrap());
        assert!(increment_report_count(&conn, EntityType::Phone, "18005551234").unwrap());

        let entity = get_entity(&conn, EntityType::Phone, "18005551234")
            .unwrap()
            .unwrap();
        assert_eq!(entity.report_count, 2);
    }

    #[test]
    fn test_score_cache_upsert() {
        let conn = test_db();
        let (e, _) = upsert_entity(&conn, EntityType::Domain, "cache.example").unwrap();
        assert!(get_cached_score(&conn, e.id).unwrap().is_none());

        let score = RiskScoreResult {
            score: 0.42,
            label: NetworkRiskLabel::Medium,
            degree_connections: 3,
            scam_neighbor_count: 1,
            second_degree_scams: 0,
        };
        cache_score(&conn, e.id, &score).unwrap();

        let loaded = get_cached_score(&conn, e.id).unwrap().unwrap();
        assert!((loaded.score - 0.42).abs() < f64::EPSILON);
        assert_eq!(loaded.label, NetworkRiskLabel::Medium);
        assert_eq!(loaded.degree_connections, 3);

        // Second write overwrites in place
        let updated = RiskScoreResult {
            score: 0.8,
            label: NetworkRiskLabel::High,
            degree_connections: 5,
            scam_neighbor_count: 2,
            second_degree_scams: 1,
        };
        cache_score(&conn, e.id, &updated).unwrap();
        let loaded = get_cached_score(&conn, e.id).unwrap().unwrap();
        assert!((loaded.score - 0.8).abs() < f64::EPSILON);
        assert_eq!(graph_stats(&conn).unwrap().cached_score_count, 1);
    }
}
