//! Conversion of accumulated traversal state into the public shape.

use crate::graph::traversal::Neighborhood;
use crate::graph::{GraphData, Relationship, DEFAULT_RELATION, DEFAULT_WEIGHT};

/// Convert a [`Neighborhood`] into the public [`GraphData`] shape.
///
/// Nodes come out in insertion order (seeds first, then breadth-first
/// discovery order) and edges in insertion order, with relation type
/// defaulting to `RELATED_TO` and weight to `1.0` where the store
/// carried no value. Pure function: assembling the same neighborhood
/// twice yields identical output.
pub fn assemble(neighborhood: &Neighborhood) -> GraphData {
    let nodes = neighborhood.nodes().to_vec();

    let edges = neighborhood
        .edges()
        .iter()
        .map(|record| Relationship {
            source: record.source.clone(),
            target: record.target.clone(),
            relation_type: record
                .relation_type
                .clone()
                .unwrap_or_else(|| DEFAULT_RELATION.to_string()),
            weight: record.weight.unwrap_or(DEFAULT_WEIGHT),
            description: record.description.clone(),
        })
        .collect();

    GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{explore, Entity, ExploreOptions, MockGraphStore};

    fn entity(id: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: id.to_string(),
            entity_type: "concept".to_string(),
            description: None,
            properties: None,
        }
    }

    async fn neighborhood() -> Neighborhood {
        let mut store = MockGraphStore::new();
        store.insert_entity(entity("A"));
        store.insert_entity(entity("B"));
        store.insert_relationship("A", "B", None, None, None);
        store.insert_relationship(
            "B",
            "A",
            Some("cites".to_string()),
            Some(0.4),
            Some("B cites A".to_string()),
        );
        explore(&store, &["A".to_string()], &ExploreOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let data = assemble(&neighborhood().await);
        let bare = data.edges.iter().find(|e| e.source == "A").unwrap();
        assert_eq!(bare.relation_type, "RELATED_TO");
        assert_eq!(bare.weight, 1.0);
        assert!(bare.description.is_none());

        let typed = data.edges.iter().find(|e| e.source == "B").unwrap();
        assert_eq!(typed.relation_type, "cites");
        assert_eq!(typed.weight, 0.4);
        assert_eq!(typed.description.as_deref(), Some("B cites A"));
    }

    #[tokio::test]
    async fn test_assembly_is_idempotent() {
        let neighborhood = neighborhood().await;
        let first = serde_json::to_string(&assemble(&neighborhood)).unwrap();
        let second = serde_json::to_string(&assemble(&neighborhood)).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_nodes_keep_discovery_order() {
        let data = assemble(&neighborhood().await);
        let ids: Vec<&str> = data.nodes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
