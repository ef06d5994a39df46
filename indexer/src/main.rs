use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use linkrank_core::ingest::load_corpus;
use linkrank_core::{rank, LinkGraph, RankConfig, SearchEngine, ZeroInflow};
use serde::Serialize;
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Rank and search a linked document corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    /// Number of rank passes to run
    #[arg(long, default_value_t = 10)]
    iterations: usize,
    /// Probability of following a link rather than jumping to a random page
    #[arg(long, default_value_t = 0.85)]
    damping: f64,
    /// Keep the teleport floor for nodes nothing links to instead of dropping them
    #[arg(long, default_value_t = false)]
    floor_unreached: bool,
}

impl RankArgs {
    fn config(&self) -> Result<RankConfig> {
        let config = RankConfig {
            iterations: self.iterations,
            damping: self.damping,
            zero_inflow: if self.floor_unreached { ZeroInflow::Floor } else { ZeroInflow::Drop },
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the score of every ranked node
    Rank {
        /// Corpus path (JSON/JSONL file or directory)
        #[arg(long)]
        input: String,
        #[command(flatten)]
        rank: RankArgs,
    },
    /// Run one keyword query against the corpus
    Search {
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
        /// Maximum number of hits to print
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        rank: RankArgs,
    },
    /// Print corpus, graph and index counts
    Stats {
        #[arg(long)]
        input: String,
        #[command(flatten)]
        rank: RankArgs,
    },
}

#[derive(Serialize)]
struct NodeScore<'a> {
    node: &'a str,
    score: f64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { input, rank: args } => {
            let config = args.config()?;
            let graph = LinkGraph::build(&load_corpus(&input)?);
            let table = rank(&graph, &config);
            let scores: Vec<NodeScore> = table.iter().map(|(node, score)| NodeScore { node, score }).collect();
            print_json(&scores)
        }
        Commands::Search { input, query, limit, rank: args } => {
            let engine = SearchEngine::build(load_corpus(&input)?, &args.config()?);
            let hits = match limit {
                Some(k) => engine.search_top(&query, k),
                None => engine.search(&query),
            };
            tracing::info!(query = %query, hits = hits.len(), "search complete");
            print_json(&hits)
        }
        Commands::Stats { input, rank: args } => {
            let engine = SearchEngine::build(load_corpus(&input)?, &args.config()?);
            print_json(&engine.stats())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
