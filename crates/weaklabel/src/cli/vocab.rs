//! The `weaklabel vocab` command for inspecting vocabulary files.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use weaklabel_core::tagging::{EmojiTable, VocabularyFiles};
use weaklabel_core::{Config, Topic};

/// Arguments for the `vocab` command.
#[derive(Args, Debug)]
pub struct VocabArgs {
    #[command(subcommand)]
    pub command: VocabCommand,
}

/// Subcommands for vocabulary inspection.
#[derive(Subcommand, Debug)]
pub enum VocabCommand {
    /// Parse every vocabulary file and report label counts
    Check {
        /// Vocabulary directory (defaults to `vocabulary.dir` from config)
        #[arg(long)]
        dir: Option<String>,
    },

    /// Show the vocabulary directory path
    Path,
}

/// Execute the vocab command.
pub async fn execute(args: VocabArgs, config: Config) -> anyhow::Result<()> {
    match args.command {
        VocabCommand::Check { dir } => {
            let dir = match dir {
                Some(dir) => PathBuf::from(shellexpand::tilde(&dir).as_ref()),
                None => config.vocabulary_dir(),
            };
            print!("{}", check(&dir)?);
        }
        VocabCommand::Path => {
            println!("{}", config.vocabulary_dir().display());
        }
    }
    Ok(())
}

/// Load every file under `dir` and render a per-topic report.
fn check(dir: &Path) -> anyhow::Result<String> {
    if !dir.is_dir() {
        anyhow::bail!("Vocabulary directory does not exist: {:?}", dir);
    }
    let files = VocabularyFiles::load(dir)?;
    let emoji = EmojiTable::load(&dir.join("emoji.tsv"))?;

    let mut report = format!("Vocabulary: {}\n", dir.display());
    for topic in Topic::ALL {
        let hierarchical = files.hierarchical(topic);
        let empty_labels = hierarchical
            .iter()
            .filter(|label| label.words().is_empty())
            .count();
        report.push_str(&format!(
            "  {:<10} {:>6} labels  {:>6} hierarchical",
            topic.as_str(),
            files.simple(topic).len(),
            hierarchical.len()
        ));
        if empty_labels > 0 {
            report.push_str(&format!("  ({empty_labels} without words)"));
        }
        report.push('\n');
    }
    report.push_str(&format!("  {:<10} {:>6} emojis\n", "emoji", emoji.len()));
    Ok(report)
}
