//! Knowledge graph module: store adapters, seed resolution, and
//! bounded-depth neighborhood traversal.
//!
//! The traversal engine is written against the [`GraphStore`] capability
//! trait; the live NebulaGraph adapter and the deterministic in-memory
//! mock both implement it, selected by configuration.

mod assemble;
mod explore;
mod mock;
mod nebula;
mod seeds;
mod store;
mod traversal;

pub use assemble::assemble;
pub use explore::{explore_graph, node_details};
pub use mock::MockGraphStore;
pub use nebula::NebulaStore;
pub use seeds::resolve_seeds;
pub use store::{Direction, EdgeRecord, GraphStore};
pub use traversal::{explore, ExploreOptions, Neighborhood};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{Backend, Config};
use crate::error::{KgserveError, Result};

/// Relation label applied when the store carries none.
pub const DEFAULT_RELATION: &str = "RELATED_TO";

/// Edge weight applied when the store carries none.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A graph node. Immutable once fetched within one exploration call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier, also the store's vertex key
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text category
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Optional free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque extra attributes as stored (JSON or map literal text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
}

/// A directed, typed, weighted edge in the public result shape.
///
/// Defaults for `type` and `weight` are applied by the result assembler;
/// see [`EdgeRecord`] for the raw adapter-level representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Public node/edge collection returned by one exploration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Entity>,
    pub edges: Vec<Relationship>,
}

/// Build the configured graph-store adapter.
///
/// The variant is chosen by `kgserve.backend` in config.toml; the mock
/// backend ships with the built-in sample graph so the service is
/// usable with no database at all.
pub fn build_store(config: &Config) -> Result<Arc<dyn GraphStore>> {
    match config.kgserve.backend {
        Backend::Nebula => {
            let password = config
                .nebula_password()
                .map_err(|e| KgserveError::Config(e.to_string()))?;
            let store = NebulaStore::new(&config.nebula, password)?;
            Ok(Arc::new(store))
        }
        Backend::Mock => {
            log::info!("Using in-memory mock graph store with sample data");
            Ok(Arc::new(MockGraphStore::with_sample_data()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_json_shape() {
        let entity = Entity {
            id: "ml_001".to_string(),
            name: "machine learning".to_string(),
            entity_type: "technology".to_string(),
            description: Some("systems that learn from data".to_string()),
            properties: None,
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["id"], "ml_001");
        assert_eq!(json["type"], "technology");
        // Absent optional fields are omitted, not null
        assert!(json.get("properties").is_none());
    }

    #[test]
    fn test_relationship_json_shape() {
        let rel = Relationship {
            source: "a".to_string(),
            target: "b".to_string(),
            relation_type: "knows".to_string(),
            weight: 0.8,
            description: None,
        };
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["source"], "a");
        assert_eq!(json["target"], "b");
        assert_eq!(json["type"], "knows");
        assert_eq!(json["weight"], 0.8);
    }
}
