use anyhow::{bail, Result};
use datalyst::{Agent, AgentConfig};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1).peekable();

    let mut config_path: Option<PathBuf> = None;
    if args.peek().map(String::as_str) == Some("--config") {
        args.next();
        match args.next() {
            Some(path) => config_path = Some(PathBuf::from(path)),
            None => bail!("--config requires a path"),
        }
    }

    let Some(request) = args.next() else {
        println!("datalyst - analytical request agent");
        println!();
        println!("Usage: datalyst [--config <file.json>] <request> [dataset.csv ...]");
        println!();
        println!("Example:");
        println!("  datalyst \"show the columns\" sales.csv");
        bail!("missing request");
    };
    let paths: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let config = match config_path {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::default(),
    };

    let agent = Agent::new(config);
    if !agent.health_check().await {
        warn!("ollama is unreachable; classification will use the keyword fallback");
    }

    let response = agent.handle(&request, &paths).await;
    println!("{}", response.report);
    if let Some(chart) = &response.chart {
        println!("[chart] {}", chart.describe());
    }

    Ok(())
}
