//! Deterministic in-memory graph store for tests and database-free
//! environments.

use async_trait::async_trait;

use crate::error::Result;
use crate::graph::store::{Direction, EdgeRecord, GraphStore};
use crate::graph::Entity;

/// In-memory [`GraphStore`] variant.
///
/// Entities and edges live in insertion order, so lookup and expansion
/// results are stable across runs; traversal tests depend on that.
#[derive(Debug, Default)]
pub struct MockGraphStore {
    entities: Vec<Entity>,
    edges: Vec<EdgeRecord>,
}

impl MockGraphStore {
    /// Empty store; populate with `insert_entity` / `insert_relationship`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a small AI/ML concept graph, used when the
    /// service runs with `backend = "mock"`.
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();

        let sample_entities: &[(&str, &str, &str, &str)] = &[
            ("ai_001", "artificial intelligence", "concept", "techniques that emulate human intelligence"),
            ("ml_001", "machine learning", "technology", "systems that learn from data"),
            ("dl_001", "deep learning", "technology", "learning with multi-layer neural networks"),
            ("nn_001", "neural network", "technology", "computation model inspired by biological neurons"),
            ("nlp_001", "natural language processing", "technology", "understanding and generating human language"),
            ("cv_001", "computer vision", "technology", "understanding images and video"),
            ("rl_001", "reinforcement learning", "technology", "learning by trial and reward"),
            ("kg_001", "knowledge graph", "technology", "graph-structured representation of knowledge"),
            ("llm_001", "large language model", "technology", "large-scale pretrained language model"),
            ("tf_001", "transformer", "technology", "self-attention sequence model"),
        ];
        for (id, name, entity_type, description) in sample_entities {
            store.insert_entity(Entity {
                id: id.to_string(),
                name: name.to_string(),
                entity_type: entity_type.to_string(),
                description: Some(description.to_string()),
                properties: None,
            });
        }

        let sample_edges: &[(&str, &str, &str, f64)] = &[
            ("ai_001", "ml_001", "includes", 0.9),
            ("ml_001", "dl_001", "includes", 0.8),
            ("dl_001", "nn_001", "based_on", 0.9),
            ("ai_001", "nlp_001", "includes", 0.7),
            ("ai_001", "cv_001", "includes", 0.7),
            ("ml_001", "rl_001", "includes", 0.7),
            ("ai_001", "kg_001", "includes", 0.6),
            ("nlp_001", "llm_001", "includes", 0.9),
            ("llm_001", "tf_001", "based_on", 0.9),
            ("kg_001", "nn_001", "applies", 0.7),
        ];
        for (source, target, relation_type, weight) in sample_edges {
            store.insert_relationship(
                source,
                target,
                Some(relation_type.to_string()),
                Some(*weight),
                None,
            );
        }

        store
    }

    pub fn insert_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn insert_relationship(
        &mut self,
        source: &str,
        target: &str,
        relation_type: Option<String>,
        weight: Option<f64>,
        description: Option<String>,
    ) {
        self.edges.push(EdgeRecord {
            source: source.to_string(),
            target: target.to_string(),
            relation_type,
            weight,
            description,
        });
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn lookup_exact(&self, name: &str) -> Result<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Entity>> {
        Ok(self.entities.iter().find(|e| e.id == id).cloned())
    }

    async fn expand(&self, id: &str, direction: Direction, limit: usize) -> Result<Vec<EdgeRecord>> {
        Ok(self
            .edges
            .iter()
            .filter(|e| match direction {
                Direction::Outbound => e.source == id,
                Direction::Inbound => e.target == id,
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
