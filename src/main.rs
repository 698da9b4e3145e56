use anyhow::Result;
use kgserve::api::ApiServer;
use kgserve::config::Backend;
use kgserve::graph::{build_store, NebulaStore};
use kgserve::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("serve");

    match command {
        "init" => {
            run_schema_init().await?;
        }
        "verify" => {
            run_verify().await?;
        }
        "serve" | _ => {
            run_server().await?;
        }
    }

    Ok(())
}

/// Run the HTTP API server
async fn run_server() -> Result<()> {
    log::info!("Starting kgserve v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let store = build_store(&config)?;

    let server = ApiServer::new(store, config.clone());
    server.run(config.http_server.port).await?;

    Ok(())
}

/// One-time schema initialization against the live store
async fn run_schema_init() -> Result<()> {
    let config = Config::load()?;

    match config.kgserve.backend {
        Backend::Nebula => {
            let store = NebulaStore::new(&config.nebula, config.nebula_password()?)?;
            store.init_schema().await?;
            log::info!("Schema initialized in space {}", config.nebula.space);
        }
        Backend::Mock => {
            log::info!("Mock backend needs no schema initialization");
        }
    }

    Ok(())
}

/// Check configuration and store connectivity
async fn run_verify() -> Result<()> {
    let config = Config::load()?;
    log::info!("Configuration loaded successfully");
    log::info!("Backend: {:?}", config.kgserve.backend);
    log::info!(
        "Explore defaults: depth={} max_depth={} limit_per_hop={}",
        config.explore.default_depth,
        config.explore.max_depth,
        config.explore.limit_per_hop
    );

    let store = build_store(&config)?;

    // A lookup for a name that should not exist exercises the full
    // query path without depending on stored data
    store.lookup_exact("__kgserve_connectivity_probe__").await?;
    log::info!("Graph store reachable and answering queries");

    Ok(())
}
