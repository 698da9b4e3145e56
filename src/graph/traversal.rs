//! Bounded-depth, bidirectional BFS over the graph store.
//!
//! Expansion advances level by level from the frontier of newly
//! discovered nodes, never re-expanding the original seeds, so a depth
//! of `d` yields true d-hop reach. Nodes are recorded at most once per
//! id and edges at most once per `(source, target, type)` triple.

use std::collections::HashSet;
use std::time::Duration;

use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::config::ExploreConfig;
use crate::error::{KgserveError, Result};
use crate::graph::store::{Direction, EdgeRecord, GraphStore};
use crate::graph::Entity;

/// Per-call traversal parameters.
#[derive(Debug, Clone)]
pub struct ExploreOptions {
    /// Maximum hop distance from any seed
    pub depth: usize,
    /// Max relationships fetched per node per direction per hop
    pub limit_per_hop: usize,
    /// Concurrent frontier-node expansions within one level
    pub parallelism: usize,
    /// Whole-call deadline; `None` disables it
    pub timeout: Option<Duration>,
}

impl ExploreOptions {
    pub fn from_config(config: &ExploreConfig, depth: usize) -> Self {
        Self {
            depth,
            limit_per_hop: config.limit_per_hop,
            parallelism: config.parallelism,
            timeout: if config.timeout_ms == 0 {
                None
            } else {
                Some(Duration::from_millis(config.timeout_ms))
            },
        }
    }
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            limit_per_hop: 50,
            parallelism: 8,
            timeout: None,
        }
    }
}

/// Accumulated nodes and edges of one exploration call.
///
/// Nodes keep discovery order (seeds first, then breadth-first);
/// edges keep insertion order. Owned exclusively by one call, never
/// shared across requests.
#[derive(Debug, Default)]
pub struct Neighborhood {
    nodes: Vec<Entity>,
    node_ids: HashSet<String>,
    edges: Vec<EdgeRecord>,
    edge_keys: HashSet<(String, String, String)>,
}

impl Neighborhood {
    /// Record an entity unless its id is already present.
    fn add_node(&mut self, entity: Entity) -> bool {
        if self.node_ids.contains(&entity.id) {
            return false;
        }
        self.node_ids.insert(entity.id.clone());
        self.nodes.push(entity);
        true
    }

    /// Record an edge unless its `(source, target, type)` triple is
    /// already present. Same endpoints with a different type are a
    /// distinct edge (multigraph semantics).
    fn add_edge(&mut self, record: EdgeRecord) -> bool {
        let key = (
            record.source.clone(),
            record.target.clone(),
            record.effective_type().to_string(),
        );
        if !self.edge_keys.insert(key) {
            return false;
        }
        self.edges.push(record);
        true
    }

    pub fn nodes(&self) -> &[Entity] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }
}

/// Explore the neighborhood of `seeds` out to `opts.depth` hops.
///
/// Fetch misses are tolerated: a seed or edge endpoint with no
/// fetchable entity contributes no node but stays in the frontier, so
/// its edges are still explored (consumers must tolerate edges whose
/// endpoint has no node). Adapter errors are strict: the first one
/// aborts the whole call and no partial graph is returned. The
/// optional deadline aborts with [`KgserveError::Timeout`] rather than
/// ever returning a silently truncated level.
pub async fn explore(
    store: &dyn GraphStore,
    seeds: &[String],
    opts: &ExploreOptions,
) -> Result<Neighborhood> {
    match opts.timeout {
        Some(deadline) => tokio::time::timeout(deadline, explore_inner(store, seeds, opts))
            .await
            .map_err(|_| KgserveError::Timeout)?,
        None => explore_inner(store, seeds, opts).await,
    }
}

async fn explore_inner(
    store: &dyn GraphStore,
    seeds: &[String],
    opts: &ExploreOptions,
) -> Result<Neighborhood> {
    let mut neighborhood = Neighborhood::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut frontier: Vec<String> = Vec::new();

    for seed in seeds {
        if visited.insert(seed.clone()) {
            frontier.push(seed.clone());
        }
    }

    for seed in &frontier {
        match store.fetch(seed).await? {
            Some(entity) => {
                neighborhood.add_node(entity);
            }
            None => log::warn!("Seed entity not fetchable, exploring its edges anyway: {}", seed),
        }
    }

    for level in 1..=opts.depth {
        if frontier.is_empty() {
            log::debug!("Frontier exhausted at level {}", level);
            break;
        }

        // Fan out the whole level with bounded parallelism; `buffered`
        // keeps frontier order and the collect is the per-level barrier.
        let limit = opts.limit_per_hop;
        let expansions: Vec<(String, Vec<EdgeRecord>, Vec<EdgeRecord>)> =
            stream::iter(frontier.iter().cloned())
                .map(|id| async move {
                    let outbound = store.expand(&id, Direction::Outbound, limit).await?;
                    let inbound = store.expand(&id, Direction::Inbound, limit).await?;
                    Ok::<_, KgserveError>((id, outbound, inbound))
                })
                .buffered(opts.parallelism)
                .try_collect()
                .await?;

        let mut next_frontier = Vec::new();
        for (id, outbound, inbound) in expansions {
            for record in outbound.into_iter().chain(inbound) {
                let far = record.far_endpoint(&id).to_string();
                neighborhood.add_edge(record);

                if visited.insert(far.clone()) {
                    match store.fetch(&far).await? {
                        Some(entity) => {
                            neighborhood.add_node(entity);
                        }
                        None => log::warn!("Edge endpoint not fetchable: {}", far),
                    }
                    next_frontier.push(far);
                }
            }
        }

        log::debug!(
            "Level {}: {} nodes, {} edges, next frontier {}",
            level,
            neighborhood.nodes.len(),
            neighborhood.edges.len(),
            next_frontier.len()
        );
        frontier = next_frontier;
    }

    Ok(neighborhood)
}
