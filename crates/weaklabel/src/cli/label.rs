//! The `weaklabel label` command for labeling a file of posts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use weaklabel_core::pipeline::read_posts;
use weaklabel_core::tagging::{CandidateProvider, JsonCandidateProvider};
use weaklabel_core::{
    Config, LabelResult, LabelingPipeline, OutputFormat as CoreOutputFormat, OutputWriter,
    PostLabeler, Strategy,
};

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Arguments for the `label` command.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// JSON Lines file of tokenized posts
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to `output.format` from config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of posts labeled concurrently
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Labels kept per token and per ranking
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Use edit distance only, even when word vectors are available
    #[arg(long)]
    pub syntactic: bool,

    /// Skip mapping external candidates onto the item hierarchy
    #[arg(long)]
    pub no_candidates: bool,
}

type SharedWriter = Arc<Mutex<OutputWriter<Box<dyn Write + Send>>>>;

/// Execute the label command.
pub async fn execute(args: LabelArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!(
            "Input file does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }

    apply_overrides(&mut config, &args);
    let format = match args.format {
        Some(format) => CoreOutputFormat::from(format),
        None => CoreOutputFormat::parse(&config.output.format)
            .ok_or_else(|| anyhow::anyhow!("Unknown output format {:?}", config.output.format))?,
    };

    let mut labeler = PostLabeler::from_config(&config)?;
    if args.syntactic {
        labeler = labeler.with_strategy(Strategy::Syntactic);
    }
    let mut pipeline =
        LabelingPipeline::new(Arc::new(labeler), config.processing.parallel_workers);
    if let Some(provider) = load_candidates(&config, args.no_candidates)? {
        pipeline = pipeline.with_candidates(provider);
    }

    let posts = read_posts(&args.input)?;
    let total = posts.len() as u64;

    let sink: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    let writer: SharedWriter = Arc::new(Mutex::new(OutputWriter::new(
        sink,
        format,
        config.output.pretty,
    )));

    let progress = create_progress_bar(total)?;
    let start_time = Instant::now();

    let callback_writer = Arc::clone(&writer);
    let callback_progress = progress.clone();
    let (succeeded, failed) = pipeline
        .run(posts, move |result| {
            if let LabelResult::Success(labeled) = result {
                match callback_writer.lock() {
                    Ok(mut writer) => {
                        if let Err(e) = writer.write(&labeled) {
                            tracing::error!("Failed to write post {}: {e}", labeled.id);
                        }
                    }
                    Err(_) => tracing::error!("Output writer lock poisoned"),
                }
            }
            callback_progress.inc(1);
        })
        .await;

    progress.finish_and_clear();

    let writer = Arc::try_unwrap(writer)
        .map_err(|_| anyhow::anyhow!("Output writer still in use after labeling"))?
        .into_inner()
        .map_err(|_| anyhow::anyhow!("Output writer lock poisoned"))?;
    writer.finish()?;
    if let Some(path) = &args.output {
        tracing::info!("Output written to {:?}", path);
    }

    print_summary(succeeded, failed, start_time.elapsed());
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &LabelArgs) {
    if let Some(parallel) = args.parallel {
        config.processing.parallel_workers = parallel.max(1);
    }
    if let Some(top_k) = args.top_k {
        config.ranking.top_k = top_k.max(1);
    }
}

fn load_candidates(
    config: &Config,
    disabled: bool,
) -> anyhow::Result<Option<Arc<dyn CandidateProvider>>> {
    if disabled || !config.candidates.enabled {
        return Ok(None);
    }
    let path = config.candidates_path();
    if !path.exists() {
        tracing::warn!("Candidates file not found at {:?}, skipping candidate mapping", path);
        return Ok(None);
    }
    let provider = JsonCandidateProvider::load(&path)?;
    Ok(Some(Arc::new(provider)))
}

/// Create a progress bar for batch labeling.
fn create_progress_bar(total: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec}",
            )?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Print a summary table after labeling.
fn print_summary(succeeded: usize, failed: usize, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 {
        succeeded as f64 / secs
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Labeled:      {:>8}", succeeded);
    if failed > 0 {
        eprintln!("    Failed:       {:>8}", failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", secs);
    eprintln!("    Rate:         {:>7.1} posts/sec", rate);
    eprintln!("  ====================================");
}
