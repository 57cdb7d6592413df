//! The `weaklabel rank` command: rank one ad-hoc post against one topic.

use clap::Args;
use weaklabel_core::output::format_ranking;
use weaklabel_core::{Config, Post, PostLabeler, ScoredLabel, Strategy, Topic};

/// Arguments for the `rank` command.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Topic to rank against: items, styles, materials or brands
    #[arg(value_parser = parse_topic)]
    pub topic: Topic,

    /// Rank hierarchical (multi-word) labels instead of simple ones
    #[arg(long)]
    pub hierarchy: bool,

    /// Caption tokens, whitespace separated
    #[arg(long, default_value = "")]
    pub caption: String,

    /// Comment tokens, whitespace separated
    #[arg(long, default_value = "")]
    pub comments: String,

    /// Tagged users, whitespace separated
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Hashtags, whitespace separated
    #[arg(long, default_value = "")]
    pub hashtags: String,

    /// Segmented hashtag words, whitespace separated
    #[arg(long, default_value = "")]
    pub segmented: String,

    /// Post id whose term-frequency table weights the tokens
    #[arg(long, default_value = "")]
    pub post_id: String,

    /// Number of labels to show
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Use edit distance only
    #[arg(long)]
    pub syntactic: bool,

    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_topic(s: &str) -> Result<Topic, String> {
    Topic::parse(s).ok_or_else(|| {
        format!("unknown topic {s:?} (expected items, styles, materials or brands)")
    })
}

impl RankArgs {
    fn post(&self) -> Post {
        let split = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();
        Post {
            id: self.post_id.clone(),
            caption: split(&self.caption),
            comments: split(&self.comments),
            tags: split(&self.tags),
            hashtags: split(&self.hashtags),
            segmented_hashtags: split(&self.segmented),
            emojis: vec![],
        }
    }
}

/// Execute the rank command.
pub async fn execute(args: RankArgs, config: Config) -> anyhow::Result<()> {
    let mut labeler = PostLabeler::from_config(&config)?;
    if args.syntactic {
        labeler = labeler.with_strategy(Strategy::Syntactic);
    }
    let top_k = args.top_k.unwrap_or(labeler.top_k()).max(1);

    let ranked = rank(&labeler, &args, top_k)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print!("{}", format_ranking(&ranked));
    }
    Ok(())
}

fn rank(labeler: &PostLabeler, args: &RankArgs, top_k: usize) -> anyhow::Result<Vec<ScoredLabel>> {
    let post = args.post();
    let tf = labeler.term_frequency().table(&post.id);
    let engine = labeler.engine();

    let ranked = if args.hierarchy {
        let vocabulary = labeler.vocabulary().hierarchical(args.topic).ok_or_else(|| {
            anyhow::anyhow!(
                "No hierarchical vocabulary for {} (expected {})",
                args.topic,
                args.topic.hierarchy_file()
            )
        })?;
        engine.rank_hierarchical(&post, vocabulary, top_k, tf)
    } else {
        let vocabulary = labeler.vocabulary().simple(args.topic).ok_or_else(|| {
            anyhow::anyhow!(
                "No vocabulary for {} (expected {})",
                args.topic,
                args.topic.simple_file()
            )
        })?;
        engine.rank(&post, vocabulary, top_k, tf)
    };
    tracing::debug!("Ranked {} labels with {} similarity", ranked.len(), engine.strategy());
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RankArgs,
    }

    fn parse(argv: &[&str]) -> RankArgs {
        TestCli::parse_from(std::iter::once("rank").chain(argv.iter().copied())).args
    }

    fn labeler(dir: &std::path::Path) -> PostLabeler {
        std::fs::write(dir.join("items.txt"), "jeans\ndress\nsneakers\n").unwrap();
        std::fs::write(dir.join("items_hierarchy.txt"), "bottoms,jeans trousers\n").unwrap();
        let mut config = Config::default();
        config.vocabulary.dir = dir.to_string_lossy().into_owned();
        config.embedding.enabled = false;
        config.term_frequency.path = dir.join("none.json").to_string_lossy().into_owned();
        PostLabeler::from_config(&config).unwrap()
    }

    #[test]
    fn test_parse_args() {
        let args = parse(&["items", "--caption", "new denim jeans", "--hierarchy"]);
        assert_eq!(args.topic, Topic::Items);
        assert!(args.hierarchy);
        assert_eq!(args.post().caption, vec!["new", "denim", "jeans"]);
        assert!(args.post().hashtags.is_empty());
    }

    #[test]
    fn test_rank_simple_and_hierarchical() {
        let dir = tempfile::tempdir().unwrap();
        let labeler = labeler(dir.path());

        let args = parse(&["items", "--caption", "my jeans"]);
        let ranked = rank(&labeler, &args, 2).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "jeans");

        let args = parse(&["items", "--caption", "my jeans", "--hierarchy"]);
        let ranked = rank(&labeler, &args, 5).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].label, "bottoms");
    }

    #[test]
    fn test_rank_missing_topic_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let labeler = labeler(dir.path());
        let args = parse(&["brands", "--caption", "zara"]);
        assert!(rank(&labeler, &args, 3).is_err());
    }
}
