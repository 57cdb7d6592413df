//! Topic vocabularies.
//!
//! A vocabulary directory holds one plain-text file per topic. Simple files
//! list one label per line; hierarchical files list `name,word1 word2 ...`
//! where the words are the label's constituents. Loading happens in two
//! steps: [`VocabularyFiles::load`] parses every file (failing on the first
//! malformed line), then [`VocabularyFiles::compile`] lemmatizes every
//! comparison word once so scoring never lemmatizes a label again.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;
use crate::text::Lemmatizer;

/// A label topic. Each topic has its own vocabulary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Items,
    Styles,
    Materials,
    Brands,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Items, Topic::Styles, Topic::Materials, Topic::Brands];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Items => "items",
            Topic::Styles => "styles",
            Topic::Materials => "materials",
            Topic::Brands => "brands",
        }
    }

    /// Parse a topic name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "items" | "item" => Some(Topic::Items),
            "styles" | "style" => Some(Topic::Styles),
            "materials" | "material" => Some(Topic::Materials),
            "brands" | "brand" => Some(Topic::Brands),
            _ => None,
        }
    }

    /// File name of the simple vocabulary, e.g. `items.txt`.
    pub fn simple_file(&self) -> String {
        format!("{}.txt", self.as_str())
    }

    /// File name of the hierarchical vocabulary, e.g. `items_hierarchy.txt`.
    pub fn hierarchy_file(&self) -> String {
        format!("{}_hierarchy.txt", self.as_str())
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label as written in a vocabulary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// A single-word (or single-phrase) label compared by its own name.
    Simple(String),
    /// A named label made of constituent words, compared word by word.
    Hierarchical { name: String, words: Vec<String> },
}

impl Label {
    /// Parse one line of a simple vocabulary file.
    pub fn parse_simple(line: &str) -> Result<Self, String> {
        let name = line.trim();
        if name.is_empty() {
            return Err("empty label".into());
        }
        if name.contains(',') {
            return Err(format!(
                "{name:?} contains ',' (hierarchical entries belong in a *_hierarchy.txt file)"
            ));
        }
        Ok(Label::Simple(name.to_string()))
    }

    /// Parse one line of a hierarchical vocabulary file: `name,word1 word2`.
    ///
    /// Words are lower-cased. A label with no words is allowed and never
    /// scores.
    pub fn parse_hierarchical(line: &str) -> Result<Self, String> {
        let (name, rest) = line
            .split_once(',')
            .ok_or_else(|| format!("expected \"name,word1 word2\", got {line:?}"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err("empty label name".into());
        }
        if rest.contains(',') {
            return Err(format!("{line:?} has more than one ','"));
        }
        Ok(Label::Hierarchical {
            name: name.to_string(),
            words: rest.split_whitespace().map(str::to_lowercase).collect(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Label::Simple(name) => name,
            Label::Hierarchical { name, .. } => name,
        }
    }

    /// Words the label is compared on, lower-cased.
    ///
    /// A simple label compares on its own lower-cased name.
    pub fn words(&self) -> Vec<String> {
        match self {
            Label::Simple(name) => vec![name.to_lowercase()],
            Label::Hierarchical { words, .. } => words.clone(),
        }
    }
}

/// A comparison word with its precomputed lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelWord {
    pub surface: String,
    pub lemma: String,
}

impl LabelWord {
    pub fn new(surface: impl Into<String>, lemmatizer: &dyn Lemmatizer) -> Self {
        let surface = surface.into();
        let lemma = lemmatizer.lemmatize(&surface);
        Self { surface, lemma }
    }
}

/// A label ready for scoring.
#[derive(Debug, Clone)]
pub struct CompiledLabel {
    name: String,
    name_word: LabelWord,
    words: Vec<LabelWord>,
}

impl CompiledLabel {
    /// Label name as written in the vocabulary file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lower-cased name, used by simple ranking.
    pub fn name_word(&self) -> &LabelWord {
        &self.name_word
    }

    /// Constituent words, used by hierarchical ranking. For a simple label
    /// this is just the name word.
    pub fn words(&self) -> &[LabelWord] {
        &self.words
    }
}

/// An ordered, de-duplicated set of compiled labels for one topic.
#[derive(Debug, Clone, Default)]
pub struct TopicVocabulary {
    labels: Vec<CompiledLabel>,
}

impl TopicVocabulary {
    /// Compile labels, lemmatizing every comparison word once.
    ///
    /// Duplicate names keep the first occurrence.
    pub fn compile(labels: &[Label], lemmatizer: &dyn Lemmatizer) -> Self {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(labels.len());
        for label in labels {
            if !seen.insert(label.name()) {
                tracing::warn!("Duplicate label {:?} in vocabulary, keeping the first", label.name());
                continue;
            }
            compiled.push(CompiledLabel {
                name: label.name().to_string(),
                name_word: LabelWord::new(label.name().to_lowercase(), lemmatizer),
                words: label
                    .words()
                    .into_iter()
                    .map(|w| LabelWord::new(w, lemmatizer))
                    .collect(),
            });
        }
        Self { labels: compiled }
    }

    /// Compile a list of simple label names.
    pub fn simple<S: AsRef<str>>(names: &[S], lemmatizer: &dyn Lemmatizer) -> Self {
        let labels: Vec<Label> = names
            .iter()
            .map(|n| Label::Simple(n.as_ref().to_string()))
            .collect();
        Self::compile(&labels, lemmatizer)
    }

    pub fn labels(&self) -> &[CompiledLabel] {
        &self.labels
    }

    pub fn get(&self, name: &str) -> Option<&CompiledLabel> {
        self.labels.iter().find(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Parsed, not yet lemmatized, vocabulary files for every topic.
#[derive(Debug, Clone, Default)]
pub struct VocabularyFiles {
    simple: BTreeMap<Topic, Vec<Label>>,
    hierarchical: BTreeMap<Topic, Vec<Label>>,
}

impl VocabularyFiles {
    /// Load every topic file from `dir`.
    ///
    /// Missing files yield empty topics. A malformed line aborts the load
    /// with its file and line number.
    pub fn load(dir: &Path) -> Result<Self, VocabularyError> {
        let mut files = Self::default();
        for topic in Topic::ALL {
            let simple = read_labels(&dir.join(topic.simple_file()), Label::parse_simple)?;
            let hierarchical =
                read_labels(&dir.join(topic.hierarchy_file()), Label::parse_hierarchical)?;

            tracing::info!(
                "Loaded {} vocabulary: {} labels, {} hierarchical",
                topic,
                simple.len(),
                hierarchical.len()
            );
            files.simple.insert(topic, simple);
            files.hierarchical.insert(topic, hierarchical);
        }
        Ok(files)
    }

    /// Set the simple labels of one topic.
    pub fn with_simple(mut self, topic: Topic, labels: Vec<Label>) -> Self {
        self.simple.insert(topic, labels);
        self
    }

    /// Set the hierarchical labels of one topic.
    pub fn with_hierarchical(mut self, topic: Topic, labels: Vec<Label>) -> Self {
        self.hierarchical.insert(topic, labels);
        self
    }

    /// Every comparison word across all topics, lower-cased.
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        self.simple
            .values()
            .chain(self.hierarchical.values())
            .flatten()
            .flat_map(|label| label.words())
    }

    pub fn simple(&self, topic: Topic) -> &[Label] {
        self.simple.get(&topic).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn hierarchical(&self, topic: Topic) -> &[Label] {
        self.hierarchical
            .get(&topic)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Lemmatize every topic.
    pub fn compile(&self, lemmatizer: &dyn Lemmatizer) -> Vocabulary {
        let compile_all = |map: &BTreeMap<Topic, Vec<Label>>| {
            map.iter()
                .map(|(&topic, labels)| (topic, TopicVocabulary::compile(labels, lemmatizer)))
                .collect()
        };
        Vocabulary {
            simple: compile_all(&self.simple),
            hierarchical: compile_all(&self.hierarchical),
        }
    }
}

fn read_labels(
    path: &Path,
    parse: fn(&str) -> Result<Label, String>,
) -> Result<Vec<Label>, VocabularyError> {
    if !path.exists() {
        tracing::debug!("Vocabulary file {:?} not found, topic is empty", path);
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut labels = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let label = parse(trimmed).map_err(|message| VocabularyError::Malformed {
            path: path.to_path_buf(),
            line: i + 1,
            message,
        })?;
        labels.push(label);
    }
    Ok(labels)
}

/// Compiled vocabularies for every topic.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    simple: BTreeMap<Topic, TopicVocabulary>,
    hierarchical: BTreeMap<Topic, TopicVocabulary>,
}

impl Vocabulary {
    /// Simple vocabulary of a topic (empty if the file was missing).
    pub fn simple(&self, topic: Topic) -> Option<&TopicVocabulary> {
        self.simple.get(&topic).filter(|v| !v.is_empty())
    }

    /// Hierarchical vocabulary of a topic (empty if the file was missing).
    pub fn hierarchical(&self, topic: Topic) -> Option<&TopicVocabulary> {
        self.hierarchical.get(&topic).filter(|v| !v.is_empty())
    }
}
