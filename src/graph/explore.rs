//! Exploration operations consumed by the HTTP layer and the CLI:
//! input validation, seed resolution, traversal, assembly.

use crate::config::ExploreConfig;
use crate::error::{KgserveError, Result};
use crate::graph::store::GraphStore;
use crate::graph::{assemble, resolve_seeds, traversal, ExploreOptions, GraphData};

/// Explore the bounded-depth neighborhood of the entities matching
/// `keywords`.
///
/// `keywords` must contain at least one non-blank entry and `depth`
/// must satisfy `1 <= depth <= max_depth`; violations surface as
/// [`KgserveError::Validation`] naming the field. Keywords that match
/// no entity produce an empty [`GraphData`], which is a well-formed
/// result, not an error.
pub async fn explore_graph(
    store: &dyn GraphStore,
    keywords: &[String],
    depth: usize,
    config: &ExploreConfig,
) -> Result<GraphData> {
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(KgserveError::validation("keywords", "keywords required"));
    }
    if depth < 1 || depth > config.max_depth {
        return Err(KgserveError::validation(
            "depth",
            format!("must be between 1 and {}", config.max_depth),
        ));
    }

    log::info!("Exploring graph: keywords={:?} depth={}", keywords, depth);

    let seeds = resolve_seeds(store, keywords).await?;
    if seeds.is_empty() {
        log::info!("No entity matched any keyword");
        return Ok(GraphData::default());
    }

    let options = ExploreOptions::from_config(config, depth);
    let neighborhood = traversal::explore(store, &seeds, &options).await?;
    let data = assemble(&neighborhood);

    log::info!(
        "Exploration complete: {} nodes, {} edges",
        data.nodes.len(),
        data.edges.len()
    );
    Ok(data)
}

/// Full properties of a single node.
///
/// A missing id is a [`KgserveError::NotFound`], distinct from the
/// valid-empty case of zero seed matches above.
pub async fn node_details(store: &dyn GraphStore, id: &str) -> Result<crate::graph::Entity> {
    if id.trim().is_empty() {
        return Err(KgserveError::validation("id", "id required"));
    }
    store
        .fetch(id)
        .await?
        .ok_or_else(|| KgserveError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MockGraphStore;

    fn config() -> ExploreConfig {
        ExploreConfig::default()
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_keywords_is_validation_error() {
        let store = MockGraphStore::with_sample_data();
        let err = explore_graph(&store, &[], 2, &config()).await.unwrap_err();
        match err {
            KgserveError::Validation { field, .. } => assert_eq!(field, "keywords"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_keywords_is_validation_error() {
        let store = MockGraphStore::with_sample_data();
        let err = explore_graph(&store, &keywords(&["  ", ""]), 2, &config())
            .await
            .unwrap_err();
        assert!(matches!(err, KgserveError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_depth_out_of_range_names_field() {
        let store = MockGraphStore::with_sample_data();
        for depth in [0, 11] {
            let err = explore_graph(&store, &keywords(&["machine learning"]), depth, &config())
                .await
                .unwrap_err();
            match err {
                KgserveError::Validation { field, message } => {
                    assert_eq!(field, "depth");
                    assert!(message.contains("between 1 and 10"));
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_no_match_is_empty_graph() {
        let store = MockGraphStore::with_sample_data();
        let data = explore_graph(&store, &keywords(&["no such entity"]), 2, &config())
            .await
            .unwrap();
        assert!(data.nodes.is_empty());
        assert!(data.edges.is_empty());
    }

    #[tokio::test]
    async fn test_explore_sample_graph() {
        let store = MockGraphStore::with_sample_data();
        let data = explore_graph(&store, &keywords(&["machine learning"]), 1, &config())
            .await
            .unwrap();
        let ids: Vec<&str> = data.nodes.iter().map(|e| e.id.as_str()).collect();
        // Seed first, then its direct neighbors in both directions
        assert_eq!(ids[0], "ml_001");
        assert!(ids.contains(&"dl_001"));
        assert!(ids.contains(&"ai_001"));
        assert!(!data.edges.is_empty());
        assert!(data.edges.iter().all(|e| e.weight > 0.0));
    }

    #[tokio::test]
    async fn test_deeper_exploration_superset() {
        let store = MockGraphStore::with_sample_data();
        let shallow = explore_graph(&store, &keywords(&["machine learning"]), 1, &config())
            .await
            .unwrap();
        let deep = explore_graph(&store, &keywords(&["machine learning"]), 3, &config())
            .await
            .unwrap();
        for node in &shallow.nodes {
            assert!(deep.nodes.iter().any(|n| n.id == node.id));
        }
        for edge in &shallow.edges {
            assert!(deep.edges.contains(edge));
        }
    }

    #[tokio::test]
    async fn test_node_details_found_and_missing() {
        let store = MockGraphStore::with_sample_data();
        let entity = node_details(&store, "ml_001").await.unwrap();
        assert_eq!(entity.name, "machine learning");

        let err = node_details(&store, "nope").await.unwrap_err();
        assert!(matches!(err, KgserveError::NotFound(_)));
    }
}
