//! weaklabel CLI - weak labeling of social-media posts.
//!
//! Ranks each post's caption, comments, user tags and hashtags against
//! fashion vocabularies (items, styles, materials, brands) and writes one
//! labeled record per post.
//!
//! # Usage
//!
//! ```bash
//! # Label a JSONL file of tokenized posts
//! weaklabel label posts.jsonl --output labels.jsonl
//!
//! # Rank one ad-hoc post against a topic
//! weaklabel rank items --caption "new denim jeans" --hashtags "ootd"
//!
//! # Check vocabulary files
//! weaklabel vocab check
//!
//! # View configuration
//! weaklabel config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// weaklabel - Weak labeling of social-media posts against a closed vocabulary.
#[derive(Parser, Debug)]
#[command(name = "weaklabel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Label posts from a JSON Lines file
    Label(cli::label::LabelArgs),

    /// Rank a single ad-hoc post against one topic
    Rank(cli::rank::RankArgs),

    /// Inspect vocabulary files
    Vocab(cli::vocab::VocabArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match weaklabel_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `weaklabel config path`."
            );
            weaklabel_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("weaklabel v{}", weaklabel_core::VERSION);

    match cli.command {
        Commands::Label(args) => cli::label::execute(args, config).await,
        Commands::Rank(args) => cli::rank::execute(args, config).await,
        Commands::Vocab(args) => cli::vocab::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
