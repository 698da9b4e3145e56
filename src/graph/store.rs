//! Capability interface between the traversal engine and the concrete
//! graph storage backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::graph::Entity;

/// Which way to follow edges from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges whose source is the given node
    Outbound,
    /// Edges whose target is the given node
    Inbound,
}

/// Raw edge as returned by an adapter.
///
/// Relation type, weight and description are optional here; the result
/// assembler applies the public defaults. Dedup happens in the engine,
/// not in adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub relation_type: Option<String>,
    pub weight: Option<f64>,
    pub description: Option<String>,
}

impl EdgeRecord {
    /// Relation label with the store default applied; also the third
    /// component of the engine's edge-dedup key.
    pub fn effective_type(&self) -> &str {
        self.relation_type
            .as_deref()
            .unwrap_or(crate::graph::DEFAULT_RELATION)
    }

    /// The endpoint on the far side of `id`. For a self-loop this is
    /// `id` itself.
    pub fn far_endpoint<'a>(&'a self, id: &str) -> &'a str {
        if self.source == id {
            &self.target
        } else {
            &self.source
        }
    }
}

/// Read-only capability interface over a property-graph store.
///
/// Every call is self-contained: no method relies on a prior call
/// having selected a namespace or opened a session, and concurrent
/// calls from in-flight explorations must not interfere. No method may
/// mutate store state.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Entities whose name equals `name` exactly (not substring or
    /// fuzzy). Zero matches is an empty list, never an error.
    async fn lookup_exact(&self, name: &str) -> Result<Vec<Entity>>;

    /// Full properties of a single entity, or `None` if the id does
    /// not exist.
    async fn fetch(&self, id: &str) -> Result<Option<Entity>>;

    /// Up to `limit` relationships incident on `id` in the given
    /// direction. Ordering is adapter-defined; callers must not rely
    /// on it.
    async fn expand(&self, id: &str, direction: Direction, limit: usize) -> Result<Vec<EdgeRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, target: &str, relation_type: Option<&str>) -> EdgeRecord {
        EdgeRecord {
            source: source.to_string(),
            target: target.to_string(),
            relation_type: relation_type.map(String::from),
            weight: None,
            description: None,
        }
    }

    #[test]
    fn test_effective_type_default() {
        assert_eq!(record("a", "b", None).effective_type(), "RELATED_TO");
        assert_eq!(record("a", "b", Some("knows")).effective_type(), "knows");
    }

    #[test]
    fn test_far_endpoint() {
        let edge = record("a", "b", None);
        assert_eq!(edge.far_endpoint("a"), "b");
        assert_eq!(edge.far_endpoint("b"), "a");
        let self_loop = record("a", "a", None);
        assert_eq!(self_loop.far_endpoint("a"), "a");
    }
}
