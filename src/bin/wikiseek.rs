

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wikiseek::content::ContentBackend;
use wikiseek::search::{ExhaustionReason, SearchStats};
use wikiseek::{
    EmbeddingProviderFactory, HeuristicEvaluator, LinkDiscovery, SearchEngine, SearchOutcome,
    SearchStrategy, WikipediaClient, WikiseekConfig,
};


#[derive(Debug, Parser)]
#[command(name = "wikiseek", version, about = "Find a link path between two Wikipedia pages")]
struct Cli {
    /// Starting page (prompted when omitted).
    #[arg(long)]
    source: Option<String>,

    /// Destination page (prompted when omitted).
    #[arg(long)]
    destination: Option<String>,

    /// TOML configuration file; WIKISEEK_* variables override it.
    #[arg(long, env = "WIKISEEK_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    strategy: Option<SearchStrategy>,

    /// Stop once this many pages have been discovered.
    #[arg(long)]
    max_discovered: Option<usize>,
}


fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}


fn print_path(outcome: &SearchOutcome, source: &str, destination: &str) {
    let Some(path) = outcome.path() else {
        return;
    };
    println!(
        "Path from {} to {} found in {:.2}s.",
        source,
        destination,
        outcome.stats().elapsed.as_secs_f64()
    );
    for step in path {
        match step.score {
            Some(score) => println!("{} {:.4}", step.node, score),
            None => println!("{} -", step.node),
        }
    }
}


fn print_summary(stats: &SearchStats) {
    println!(
        "Expanded {} pages, discovered {}, {} embedding batches, {:.2}s.",
        stats.expanded,
        stats.discovered,
        stats.embedding_batches,
        stats.elapsed.as_secs_f64()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,wikiseek=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let mut config =
        WikiseekConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.max_discovered.is_some() {
        config.max_discovered = cli.max_discovered;
    }

    let source = match cli.source {
        Some(source) => source,
        None => prompt("Starting Wikipedia page")?,
    };
    let destination = match cli.destination {
        Some(destination) => destination,
        None => prompt("Destination Wikipedia page")?,
    };

    let content: Arc<dyn ContentBackend> =
        Arc::new(WikipediaClient::from_config(&config).context("building Wikipedia client")?);
    let links = LinkDiscovery::new(content);

    let evaluator = match config.strategy {
        SearchStrategy::Guided => {
            let backend = EmbeddingProviderFactory::from_config(&config)
                .context("building embedding client")?;
            Some(HeuristicEvaluator::from_config(backend, &config)?)
        }
        SearchStrategy::BreadthFirst => None,
    };
    let engine = SearchEngine::new(links, evaluator, config.search_config())?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping search");
            on_interrupt.cancel();
        }
    });

    let outcome = engine
        .search_with_cancel(&source, &destination, &cancel)
        .await
        .with_context(|| format!("searching from '{source}' to '{destination}'"))?;

    let code = match &outcome {
        SearchOutcome::Found { path, .. } => {
            let first = path.first().map_or(source.as_str(), |s| s.node.as_str());
            let last = path.last().map_or(destination.as_str(), |s| s.node.as_str());
            print_path(&outcome, first, last);
            ExitCode::SUCCESS
        }
        SearchOutcome::Exhausted { reason, stats } => {
            match reason {
                ExhaustionReason::FrontierEmpty => println!(
                    "No path from {source} to {destination}: every reachable page was explored."
                ),
                ExhaustionReason::DiscoveryLimit => println!(
                    "No path from {source} to {destination} within the discovery limit."
                ),
            }
            print_summary(stats);
            ExitCode::from(2)
        }
        SearchOutcome::Cancelled { stats } => {
            println!("Search cancelled.");
            print_summary(stats);
            ExitCode::from(130)
        }
    };

    Ok(code)
}
