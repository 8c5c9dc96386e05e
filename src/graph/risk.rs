// Network risk propagation.
//
// Risk flows along co-occurrence edges: an identifier linked to confirmed
// scams or heavily-reported entities inherits suspicion even when its own
// text-level signals are clean. The score is a weighted sum of neighborhood
// facts, capped at 1.0.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use tracing::{debug, warn};

use super::models::{EntityRef, GraphScanResult, NetworkRiskLabel, RiskScoreResult};
use super::traits::GraphStore;

/// Weight per directly-connected confirmed scam.
const SCAM_NEIGHBOR_WEIGHT: f64 = 0.35;
/// Weight per neighbor with a heavy report history.
const HIGH_REPORT_WEIGHT: f64 = 0.15;
/// Weight per second-degree confirmed scam (capped).
const SECOND_DEGREE_WEIGHT: f64 = 0.08;
/// Weight on log-degree, so hub entities pick up mild baseline suspicion.
const DEGREE_WEIGHT: f64 = 0.05;

/// Neighbors need at least this many reports to count as high-report.
const HIGH_REPORT_THRESHOLD: i64 = 3;
/// Second-degree scam count is capped here so one dense cluster can't
/// dominate the score.
const SECOND_DEGREE_CAP: usize = 5;
/// Only this many first-degree neighbors are expanded for the second-degree
/// walk. Keeps score lookups bounded on hub entities.
const SECOND_DEGREE_SAMPLE: usize = 10;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Compute (and cache) the network risk score for one entity.
pub async fn calculate_risk_score(
    store: &dyn GraphStore,
    entity_id: i64,
) -> Result<RiskScoreResult> {
    let neighbor_ids = store.neighbor_ids(entity_id).await?;
    if neighbor_ids.is_empty() {
        let result = RiskScoreResult::isolated();
        store.cache_score(entity_id, &result).await?;
        return Ok(result);
    }

    let neighbors = store.entities_by_ids(&neighbor_ids).await?;
    let degree_connections = neighbor_ids.len();
    let scam_neighbor_count = neighbors.iter().filter(|n| n.confirmed_scam).count();
    let high_report_count = neighbors
        .iter()
        .filter(|n| n.report_count >= HIGH_REPORT_THRESHOLD)
        .count();

    // Second degree: expand a bounded sample of neighbors and count
    // confirmed scams two hops out, excluding the entity itself and its
    // direct neighbors. Ids are unioned across expansions so an entity
    // reachable through several neighbors counts once.
    let mut second_degree_ids: HashSet<i64> = HashSet::new();
    for &neighbor_id in neighbor_ids.iter().take(SECOND_DEGREE_SAMPLE) {
        let second_ids = store.neighbor_ids(neighbor_id).await?;
        second_degree_ids.extend(
            second_ids
                .into_iter()
                .filter(|id| *id != entity_id && !neighbor_ids.contains(id)),
        );
    }
    let second_ids: Vec<i64> = second_degree_ids.into_iter().collect();
    let second_entities = store.entities_by_ids(&second_ids).await?;
    let second_degree_scams = second_entities.iter().filter(|e| e.confirmed_scam).count();

    let raw = SCAM_NEIGHBOR_WEIGHT * scam_neighbor_count as f64
        + HIGH_REPORT_WEIGHT * high_report_count as f64
        + SECOND_DEGREE_WEIGHT * second_degree_scams.min(SECOND_DEGREE_CAP) as f64
        + DEGREE_WEIGHT * (1.0 + degree_connections as f64).ln();
    let score = round3(raw.min(1.0));

    let result = RiskScoreResult {
        score,
        label: NetworkRiskLabel::from_score(score),
        degree_connections,
        scam_neighbor_count,
        second_degree_scams,
    };
    store.cache_score(entity_id, &result).await?;
    Ok(result)
}

/// Record one scan's entities in the graph and score each of them.
///
/// All entities from the scan are upserted, linked pairwise (both directions)
/// with a `same_scan` relationship, then scored. A failure upserting, linking,
/// or scoring one entity is logged and that entity is skipped; the scan always
/// gets the partial result.
pub async fn run_full_scan_graph(
    store: &dyn GraphStore,
    entity_refs: &[EntityRef],
) -> Result<GraphScanResult> {
    if entity_refs.is_empty() {
        return Ok(GraphScanResult::empty());
    }

    let mut upserted: Vec<(&EntityRef, i64)> = Vec::with_capacity(entity_refs.len());
    let mut entities_created = 0;
    for entity_ref in entity_refs {
        match store
            .upsert_entity(entity_ref.entity_type, &entity_ref.value)
            .await
        {
            Ok((entity, created)) => {
                if created {
                    entities_created += 1;
                }
                upserted.push((entity_ref, entity.id));
            }
            Err(err) => {
                warn!(value = %entity_ref.value, error = %err, "entity upsert failed, skipping entity");
            }
        }
    }

    let ids: Vec<i64> = upserted.iter().map(|&(_, id)| id).collect();
    let edges_created = match store.link_all_pairs(&ids, "same_scan").await {
        Ok(created) => created,
        Err(err) => {
            warn!(error = %err, "pair linking failed, scoring entities without new edges");
            0
        }
    };
    debug!(
        entities = entity_refs.len(),
        entities_created, edges_created, "graph updated"
    );

    let mut entity_scores = HashMap::new();
    let mut score_sum = 0.0;
    let mut scored = 0usize;
    for &(entity_ref, id) in &upserted {
        match calculate_risk_score(store, id).await {
            Ok(result) => {
                score_sum += result.score;
                scored += 1;
                entity_scores.insert(entity_ref.value.clone(), result);
            }
            Err(err) => {
                warn!(value = %entity_ref.value, error = %err, "risk scoring failed, skipping entity");
            }
        }
    }

    let network_risk_score = if scored > 0 {
        round3(score_sum / scored as f64)
    } else {
        0.0
    };

    Ok(GraphScanResult {
        network_risk_score,
        network_risk_label: NetworkRiskLabel::from_score(network_risk_score),
        entity_scores,
        entities_created,
        edges_created,
    })
}

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    use super::*;
    use crate::graph::models::{Entity, EntityType, GraphStats};
    use crate::graph::sqlite::SqliteGraphStore;

    async fn test_store() -> SqliteGraphStore {
        let store = SqliteGraphStore::open_in_memory().unwrap();
        store.init().await.unwrap();
        store
    }

    /// Delegates to SQLite but fails any upsert of one poisoned value.
    struct FlakyStore {
        inner: SqliteGraphStore,
        poisoned_value: &'static str,
    }

    #[async_trait]
    impl GraphStore for FlakyStore {
        async fn init(&self) -> Result<()> {
            self.inner.init().await
        }
        async fn upsert_entity(
            &self,
            entity_type: EntityType,
            value: &str,
        ) -> Result<(Entity, bool)> {
            if value == self.poisoned_value {
                bail!("transient backend failure");
            }
            self.inner.upsert_entity(entity_type, value).await
        }
        async fn get_entity(&self, entity_type: EntityType, value: &str) -> Result<Option<Entity>> {
            self.inner.get_entity(entity_type, value).await
        }
        async fn link_entities(
            &self,
            source_id: i64,
            target_id: i64,
            relationship: &str,
            weight: f64,
        ) -> Result<usize> {
            self.inner
                .link_entities(source_id, target_id, relationship, weight)
                .await
        }
        async fn link_all_pairs(&self, ids: &[i64], relationship: &str) -> Result<usize> {
            self.inner.link_all_pairs(ids, relationship).await
        }
        async fn neighbor_ids(&self, entity_id: i64) -> Result<Vec<i64>> {
            self.inner.neighbor_ids(entity_id).await
        }
        async fn entities_by_ids(&self, ids: &[i64]) -> Result<Vec<Entity>> {
            self.inner.entities_by_ids(ids).await
        }
        async fn cache_score(&self, entity_id: i64, score: &RiskScoreResult) -> Result<()> {
            self.inner.cache_score(entity_id, score).await
        }
        async fn cached_score(&self, entity_id: i64) -> Result<Option<RiskScoreResult>> {
            self.inner.cached_score(entity_id).await
        }
        async fn mark_confirmed_scam(&self, entity_type: EntityType, value: &str) -> Result<bool> {
            self.inner.mark_confirmed_scam(entity_type, value).await
        }
        async fn increment_report_count(
            &self,
            entity_type: EntityType,
            value: &str,
        ) -> Result<bool> {
            self.inner.increment_report_count(entity_type, value).await
        }
        async fn stats(&self) -> Result<GraphStats> {
            self.inner.stats().await
        }
    }

    #[tokio::test]
    async fn test_isolated_entity_scores_zero() {
        let store = test_store().await;
        let (entity, _) = store
            .upsert_entity(EntityType::Email, "alone@example.com")
            .await
            .unwrap();

        let result = calculate_risk_score(&store, entity.id).await.unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, NetworkRiskLabel::Low);
        assert_eq!(result.degree_connections, 0);

        // Zero score is still cached
        assert!(store.cached_score(entity.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_scam_neighbor_raises_score() {
        let store = test_store().await;
        let (clean, _) = store
            .upsert_entity(EntityType::Email, "victim-contact@example.com")
            .await
            .unwrap();
        let (scam, _) = store
            .upsert_entity(EntityType::Domain, "known-bad.example")
            .await
            .unwrap();
        store
            .mark_confirmed_scam(EntityType::Domain, "known-bad.example")
            .await
            .unwrap();
        store
            .link_all_pairs(&[clean.id, scam.id], "same_scan")
            .await
            .unwrap();

        let result = calculate_risk_score(&store, clean.id).await.unwrap();
        // 0.35 for the scam neighbor + 0.05 * ln(2) for degree
        let expected = 0.35 + 0.05 * 2.0f64.ln();
        assert!((result.score - (expected * 1000.0).round() / 1000.0).abs() < 1e-9);
        assert_eq!(result.label, NetworkRiskLabel::Medium);
        assert_eq!(result.scam_neighbor_count, 1);
    }

    #[tokio::test]
    async fn test_score_is_capped_at_one() {
        let store = test_store().await;
        let (hub, _) = store
            .upsert_entity(EntityType::Phone, "18005550000")
            .await
            .unwrap();
        let mut ids = vec![hub.id];
        for i in 0..4 {
            let value = format!("scam-{i}.example");
            let (e, _) = store.upsert_entity(EntityType::Domain, &value).await.unwrap();
            store
                .mark_confirmed_scam(EntityType::Domain, &value)
                .await
                .unwrap();
            ids.push(e.id);
        }
        store.link_all_pairs(&ids, "same_scan").await.unwrap();

        let result = calculate_risk_score(&store, hub.id).await.unwrap();
        assert_eq!(result.score, 1.0);
        assert_eq!(result.label, NetworkRiskLabel::High);
        assert_eq!(result.scam_neighbor_count, 4);
    }

    #[tokio::test]
    async fn test_second_degree_scam_contributes() {
        let store = test_store().await;
        // chain: a — b — c, with c a confirmed scam
        let (a, _) = store
            .upsert_entity(EntityType::Email, "a@example.com")
            .await
            .unwrap();
        let (b, _) = store
            .upsert_entity(EntityType::Phone, "15551230001")
            .await
            .unwrap();
        let (c, _) = store
            .upsert_entity(EntityType::Domain, "chain-scam.example")
            .await
            .unwrap();
        store
            .mark_confirmed_scam(EntityType::Domain, "chain-scam.example")
            .await
            .unwrap();
        store.link_all_pairs(&[a.id, b.id], "same_scan").await.unwrap();
        store.link_all_pairs(&[b.id, c.id], "same_scan").await.unwrap();

        let result = calculate_risk_score(&store, a.id).await.unwrap();
        assert_eq!(result.second_degree_scams, 1);
        assert_eq!(result.scam_neighbor_count, 0);
        // 0.08 for the second-degree scam + 0.05 * ln(2) for degree
        let expected = 0.08 + 0.05 * 2.0f64.ln();
        assert!((result.score - (expected * 1000.0).round() / 1000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_full_scan_graph_three_entities() {
        let store = test_store().await;
        let refs = vec![
            EntityRef::new(EntityType::Url, "https://promo.example/win"),
            EntityRef::new(EntityType::Email, "claims@promo.example"),
            EntityRef::new(EntityType::Phone, "18005551234"),
        ];

        let result = run_full_scan_graph(&store, &refs).await.unwrap();
        assert_eq!(result.entities_created, 3);
        // 3 pairs, both directions
        assert_eq!(result.edges_created, 6);
        assert_eq!(result.entity_scores.len(), 3);

        // No scams anywhere, so everything stays Low
        assert_eq!(result.network_risk_label, NetworkRiskLabel::Low);

        // Rescanning the same entities creates nothing new
        let rescan = run_full_scan_graph(&store, &refs).await.unwrap();
        assert_eq!(rescan.entities_created, 0);
        assert_eq!(rescan.edges_created, 0);
    }

    #[tokio::test]
    async fn test_shared_second_degree_scam_counts_once() {
        let store = test_store().await;
        // diamond: a — b — d and a — c — d, with d a confirmed scam, so d is
        // reachable from a through both of its neighbors
        let (a, _) = store
            .upsert_entity(EntityType::Email, "a@diamond.example")
            .await
            .unwrap();
        let (b, _) = store
            .upsert_entity(EntityType::Phone, "15551230002")
            .await
            .unwrap();
        let (c, _) = store
            .upsert_entity(EntityType::Phone, "15551230003")
            .await
            .unwrap();
        let (d, _) = store
            .upsert_entity(EntityType::Domain, "diamond-scam.example")
            .await
            .unwrap();
        store
            .mark_confirmed_scam(EntityType::Domain, "diamond-scam.example")
            .await
            .unwrap();
        store.link_all_pairs(&[a.id, b.id], "same_scan").await.unwrap();
        store.link_all_pairs(&[a.id, c.id], "same_scan").await.unwrap();
        store.link_all_pairs(&[b.id, d.id], "same_scan").await.unwrap();
        store.link_all_pairs(&[c.id, d.id], "same_scan").await.unwrap();

        let result = calculate_risk_score(&store, a.id).await.unwrap();
        assert_eq!(result.second_degree_scams, 1);
        // 0.08 for the one second-degree scam + 0.05 * ln(3) for degree 2
        let expected = 0.08 + 0.05 * 3.0f64.ln();
        assert!((result.score - (expected * 1000.0).round() / 1000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failed_upsert_skips_entity_not_scan() {
        let store = FlakyStore {
            inner: test_store().await,
            poisoned_value: "broken@example.com",
        };
        let refs = vec![
            EntityRef::new(EntityType::Email, "broken@example.com"),
            EntityRef::new(EntityType::Domain, "fine.example"),
            EntityRef::new(EntityType::Phone, "18005550100"),
        ];

        let result = run_full_scan_graph(&store, &refs).await.unwrap();
        // The failing entity is dropped; the other two are stored and linked
        assert_eq!(result.entities_created, 2);
        assert_eq!(result.edges_created, 2);
        assert_eq!(result.entity_scores.len(), 2);
        assert!(!result.entity_scores.contains_key("broken@example.com"));
        assert!(store
            .get_entity(EntityType::Email, "broken@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_full_scan_graph_empty_input() {
        let store = test_store().await;
        let result = run_full_scan_graph(&store, &[]).await.unwrap();
        assert_eq!(result.entities_created, 0);
        assert_eq!(result.entity_scores.len(), 0);
        assert_eq!(result.network_risk_score, 0.0);
    }
}
