//! Seed resolution: keywords to starting entity ids via exact lookup.

use std::collections::HashSet;

use crate::error::Result;
use crate::graph::store::GraphStore;

/// Resolve keywords to a set of seed entity ids.
///
/// Each keyword is looked up with exact-name matching and the results
/// are unioned, preserving first-seen order (seed order determines node
/// order in the final result). An empty keyword list yields an empty
/// seed set; the engine never falls back to scanning the whole graph.
/// Keywords that match nothing simply contribute nothing.
pub async fn resolve_seeds(store: &dyn GraphStore, keywords: &[String]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for keyword in keywords {
        let matches = store.lookup_exact(keyword).await?;
        if matches.is_empty() {
            log::debug!("Keyword matched no entity: {}", keyword);
        }
        for entity in matches {
            if seen.insert(entity.id.clone()) {
                seeds.push(entity.id);
            }
        }
    }

    log::debug!("Resolved {} keywords to {} seeds", keywords.len(), seeds.len());
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Entity, MockGraphStore};

    fn entity(id: &str, name: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: name.to_string(),
            entity_type: "concept".to_string(),
            description: None,
            properties: None,
        }
    }

    fn store() -> MockGraphStore {
        let mut store = MockGraphStore::new();
        store.insert_entity(entity("a1", "alpha"));
        store.insert_entity(entity("a2", "alpha"));
        store.insert_entity(entity("b1", "beta"));
        store
    }

    #[tokio::test]
    async fn test_union_across_keywords() {
        let store = store();
        let seeds = resolve_seeds(&store, &["alpha".to_string(), "beta".to_string()])
            .await
            .unwrap();
        assert_eq!(seeds, vec!["a1", "a2", "b1"]);
    }

    #[tokio::test]
    async fn test_duplicate_keywords_dedup() {
        let store = store();
        let seeds = resolve_seeds(&store, &["beta".to_string(), "beta".to_string()])
            .await
            .unwrap();
        assert_eq!(seeds, vec!["b1"]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let store = store();
        let seeds = resolve_seeds(&store, &["gamma".to_string()]).await.unwrap();
        assert!(seeds.is_empty());
    }

    #[tokio::test]
    async fn test_empty_keywords_empty_seeds() {
        let store = store();
        let seeds = resolve_seeds(&store, &[]).await.unwrap();
        assert!(seeds.is_empty());
    }
}
