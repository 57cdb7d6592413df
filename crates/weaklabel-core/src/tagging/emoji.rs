//! Emoji votes for item labels.

use std::collections::HashMap;
use std::path::Path;

use crate::error::VocabularyError;
use crate::types::ScoredLabel;

use super::aggregate::ScoreAccumulator;
use super::vocabulary::TopicVocabulary;

/// Fixed lookup table from an emoji to the item labels it depicts.
#[derive(Debug, Clone, Default)]
pub struct EmojiTable {
    labels: HashMap<String, Vec<String>>,
}

impl EmojiTable {
    /// Load `emoji<TAB>label label ...` lines. A missing file gives an empty
    /// table.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        if !path.exists() {
            tracing::debug!("Emoji table {:?} not found, emoji votes disabled", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut labels = HashMap::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() || is_comment(line) {
                continue;
            }
            let (emoji, mapped) = line.split_once('\t').ok_or_else(|| VocabularyError::Malformed {
                path: path.to_path_buf(),
                line: i + 1,
                message: format!("expected \"emoji<TAB>labels\", got {line:?}"),
            })?;
            let emoji = emoji.trim();
            if emoji.is_empty() {
                return Err(VocabularyError::Malformed {
                    path: path.to_path_buf(),
                    line: i + 1,
                    message: "empty emoji".into(),
                });
            }
            labels.insert(
                emoji.to_string(),
                mapped.split_whitespace().map(str::to_lowercase).collect(),
            );
        }

        tracing::info!("Loaded emoji table: {} emojis", labels.len());
        Ok(Self { labels })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        Self {
            labels: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Count emoji votes for item labels and return the `num` best.
    ///
    /// A mapped label matches an item when it equals the item's lower-cased
    /// name or that name's lemma. Unknown emojis are ignored.
    pub fn classify<S: AsRef<str>>(
        &self,
        emojis: &[S],
        items: &TopicVocabulary,
        num: usize,
    ) -> Vec<ScoredLabel> {
        let mut accumulator = ScoreAccumulator::new(items);
        for emoji in emojis {
            let Some(mapped) = self.labels.get(emoji.as_ref()) else {
                continue;
            };
            for (index, item) in items.labels().iter().enumerate() {
                let word = item.name_word();
                if mapped.iter().any(|m| *m == word.surface || *m == word.lemma) {
                    accumulator.add(index, 1.0);
                }
            }
        }
        accumulator.top_k(num)
    }
}

/// `#` alone or followed by whitespace. Keycap emojis such as `#️⃣` also
/// start with `#` and are table entries.
fn is_comment(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
