use kgserve::graph::{build_store, explore_graph};
use kgserve::Config;
use std::time::Instant;

/// Parse CLI args: optional --depth <n>; every other positional is a keyword.
fn parse_explore_args(default_depth: usize) -> anyhow::Result<(Vec<String>, usize)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut keywords = Vec::new();
    let mut depth = default_depth;
    let mut next_depth = false;
    for arg in &args {
        if next_depth {
            depth = arg
                .parse()
                .map_err(|_| anyhow::anyhow!("--depth expects a number, got '{}'", arg))?;
            next_depth = false;
            continue;
        }
        if arg == "--depth" {
            next_depth = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        keywords.push(arg.clone());
    }
    if keywords.is_empty() {
        anyhow::bail!(
            "Usage: explore <keyword>... [--depth <n>]\nExample: explore \"machine learning\" --depth 2"
        );
    }
    Ok((keywords, depth))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    // Load configuration and build the configured store backend
    let config = Config::load()?;
    let store = build_store(&config)?;

    let (keywords, depth) = parse_explore_args(config.explore.default_depth)?;

    // Measure exploration latency
    let start = Instant::now();
    let data = explore_graph(store.as_ref(), &keywords, depth, &config.explore).await?;
    let duration = start.elapsed();

    println!("\n╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║ kgserve Graph Exploration                                                    ║");
    println!("╚══════════════════════════════════════════════════════════════════════════════╝");
    println!("\nKeywords: {:?}  Depth: {}\n", keywords, depth);

    if data.nodes.is_empty() {
        println!("No entities matched.");
    } else {
        println!("Nodes ({}):", data.nodes.len());
        for node in &data.nodes {
            println!("  {} ({}) - {}", node.id, node.entity_type, node.name);
            if let Some(ref description) = node.description {
                println!("      {}", description);
            }
        }

        println!("\nEdges ({}):", data.edges.len());
        for edge in &data.edges {
            println!(
                "  {} -[{} w={:.2}]-> {}",
                edge.source, edge.relation_type, edge.weight, edge.target
            );
            if let Some(ref description) = edge.description {
                println!("      {}", description);
            }
        }
    }

    println!("\nLatency: {:?}", duration);

    Ok(())
}
