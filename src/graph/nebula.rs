//! Live graph-store adapter speaking nGQL to a NebulaGraph cluster
//! through its HTTP gateway.
//!
//! Every statement is self-contained: credentials ride along with each
//! request and the target space is threaded in as a `USE` prefix, so
//! the adapter holds no mutable "current space" state and concurrent
//! explorations against different spaces cannot interfere. All caller
//! input reaches query text only through [`escape_literal`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::NebulaConfig;
use crate::error::{KgserveError, Result};
use crate::graph::store::{Direction, EdgeRecord, GraphStore};
use crate::graph::Entity;

/// Longest vertex id the schema accepts (FIXED_STRING(256)).
const MAX_VID_LEN: usize = 256;

/// [`GraphStore`] variant backed by a remote NebulaGraph store.
pub struct NebulaStore {
    client: reqwest::Client,
    exec_url: String,
    host: String,
    port: u16,
    user: String,
    password: String,
    space: String,
}

/// Gateway execution response envelope.
#[derive(Debug, Deserialize)]
struct GatewayResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<GatewayData>,
}

/// Result set: rows keyed by their YIELD alias.
#[derive(Debug, Default, Deserialize)]
struct GatewayData {
    #[serde(default)]
    tables: Vec<Map<String, Value>>,
}

impl NebulaStore {
    pub fn new(config: &NebulaConfig, password: String) -> Result<Self> {
        // The space name lands in query text unquoted, so only plain
        // identifiers are accepted.
        validate_identifier(&config.space)
            .map_err(|m| KgserveError::Config(format!("nebula.space: {}", m)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            exec_url: format!("{}/api/db/exec", config.gateway_url.trim_end_matches('/')),
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
            password,
            space: config.space.clone(),
        })
    }

    /// Execute one self-contained statement in the configured space.
    async fn exec(&self, gql: &str) -> Result<Vec<Map<String, Value>>> {
        let statement = format!("USE {}; {}", self.space, gql);
        log::debug!("nGQL: {}", statement);

        let response = self
            .client
            .post(&self.exec_url)
            .json(&json!({
                "username": self.user,
                "password": self.password,
                "address": self.host,
                "port": self.port,
                "gql": statement,
            }))
            .send()
            .await
            .map_err(|e| KgserveError::StoreUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(KgserveError::StoreUnavailable(format!(
                "gateway returned HTTP {}",
                response.status()
            )));
        }

        let envelope: GatewayResponse = response
            .json()
            .await
            .map_err(|e| KgserveError::Adapter(format!("malformed gateway response: {}", e)))?;

        if envelope.code != 0 {
            return Err(KgserveError::Adapter(envelope.message));
        }

        Ok(envelope.data.unwrap_or_default().tables)
    }

    /// One-time schema setup (space, tag, edge type, name index).
    /// Invoked only by the explicit `init` subcommand; normal adapter
    /// calls never mutate store state.
    pub async fn init_schema(&self) -> Result<()> {
        // CREATE SPACE cannot be prefixed with USE of the space it creates
        let create_space = format!(
            "CREATE SPACE IF NOT EXISTS {} (partition_num=10, replica_factor=1, vid_type=FIXED_STRING({}));",
            self.space, MAX_VID_LEN
        );
        let response = self
            .client
            .post(&self.exec_url)
            .json(&json!({
                "username": self.user,
                "password": self.password,
                "address": self.host,
                "port": self.port,
                "gql": create_space,
            }))
            .send()
            .await
            .map_err(|e| KgserveError::StoreUnavailable(e.to_string()))?;
        let envelope: GatewayResponse = response
            .json()
            .await
            .map_err(|e| KgserveError::Adapter(format!("malformed gateway response: {}", e)))?;
        if envelope.code != 0 {
            return Err(KgserveError::Adapter(envelope.message));
        }

        let schema_statements = [
            "CREATE TAG IF NOT EXISTS entity(name string, type string, description string, properties string);",
            "CREATE EDGE IF NOT EXISTS relationship(relation string, weight double, description string);",
            "CREATE TAG INDEX IF NOT EXISTS entity_name_index ON entity(name(64));",
        ];
        for statement in schema_statements {
            self.exec(statement).await?;
        }

        log::info!("Nebula schema initialized for space {}", self.space);
        Ok(())
    }

    fn parse_entity_row(row: &Map<String, Value>) -> Option<Entity> {
        let id = row_string(row, "vid")?;
        Some(Entity {
            id,
            name: row_string(row, "name").unwrap_or_default(),
            entity_type: row_string(row, "type").unwrap_or_default(),
            description: row_string(row, "description").filter(|s| !s.is_empty()),
            properties: row_string(row, "props").filter(|s| !s.is_empty()),
        })
    }

    fn parse_edge_row(row: &Map<String, Value>) -> Option<EdgeRecord> {
        let source = row_string(row, "src")?;
        let target = row_string(row, "dst")?;
        Some(EdgeRecord {
            source,
            target,
            relation_type: row_string(row, "relation").filter(|s| !s.is_empty()),
            weight: row.get("weight").and_then(Value::as_f64),
            description: row_string(row, "description").filter(|s| !s.is_empty()),
        })
    }
}

#[async_trait]
impl GraphStore for NebulaStore {
    async fn lookup_exact(&self, name: &str) -> Result<Vec<Entity>> {
        // Native index lookup supports exact match only, which is the
        // contract anyway
        let gql = format!(
            "LOOKUP ON entity WHERE entity.name == \"{}\" YIELD id(vertex) AS vid, \
             properties(vertex).name AS name, properties(vertex).type AS type, \
             properties(vertex).description AS description, properties(vertex).properties AS props;",
            escape_literal(name)
        );
        let rows = self.exec(&gql).await?;
        Ok(rows.iter().filter_map(Self::parse_entity_row).collect())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Entity>> {
        validate_vid(id)?;
        let gql = format!(
            "FETCH PROP ON entity \"{}\" YIELD id(vertex) AS vid, \
             properties(vertex).name AS name, properties(vertex).type AS type, \
             properties(vertex).description AS description, properties(vertex).properties AS props;",
            escape_literal(id)
        );
        let rows = self.exec(&gql).await?;
        Ok(rows.first().and_then(Self::parse_entity_row))
    }

    async fn expand(&self, id: &str, direction: Direction, limit: usize) -> Result<Vec<EdgeRecord>> {
        validate_vid(id)?;
        let reversely = match direction {
            Direction::Outbound => "",
            Direction::Inbound => " REVERSELY",
        };
        let gql = format!(
            "GO FROM \"{}\" OVER relationship{} YIELD src(edge) AS src, dst(edge) AS dst, \
             properties(edge).relation AS relation, properties(edge).weight AS weight, \
             properties(edge).description AS description | LIMIT {};",
            escape_literal(id),
            reversely,
            limit
        );
        let rows = self.exec(&gql).await?;
        Ok(rows.iter().filter_map(Self::parse_edge_row).collect())
    }
}

fn row_string(row: &Map<String, Value>, key: &str) -> Option<String> {
    match row.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Escape a value for inclusion inside a double-quoted nGQL string
/// literal. Quotes and backslashes are escaped and control characters
/// are replaced with their escape sequences, so no input can terminate
/// the literal or inject statements.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Vertex ids additionally get a length/emptiness check before being
/// embedded in FETCH/GO statements.
fn validate_vid(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(KgserveError::validation("id", "must not be empty"));
    }
    if id.len() > MAX_VID_LEN {
        return Err(KgserveError::validation(
            "id",
            format!("must be at most {} bytes", MAX_VID_LEN),
        ));
    }
    Ok(())
}

fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("must not be empty".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("must contain only ASCII letters, digits and underscores".to_string());
    }
    Ok(())
}
