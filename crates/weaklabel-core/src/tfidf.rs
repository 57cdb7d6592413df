//! Per-post term-frequency weights.
//!
//! Each post carries its own table of token weights (typically TF-IDF scores
//! computed over the post corpus upstream). A token missing from the table is
//! not an error: it receives [`WEIGHT_FLOOR`] so it still contributes, just
//! barely.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ResourceError;
use crate::math::WEIGHT_FLOOR;

/// Token weights for a single post.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencyTable {
    weights: HashMap<String, f32>,
}

impl TermFrequencyTable {
    /// An empty table; every lookup yields the floor weight.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(token, weight)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            weights: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Weight for `token`, floored at [`WEIGHT_FLOOR`].
    ///
    /// Lookup is by exact surface form. Rust strings are always UTF-8, so the
    /// raw and byte-encoded spellings of a token are the same key.
    pub fn weight(&self, token: &str) -> f32 {
        self.weights
            .get(token)
            .copied()
            .unwrap_or(0.0)
            .max(WEIGHT_FLOOR)
    }

    /// Raw stored weight, without the floor.
    pub fn get(&self, token: &str) -> Option<f32> {
        self.weights.get(token).copied()
    }

    /// Number of tokens with an explicit weight.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table has no explicit weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Term-frequency tables for a corpus of posts, keyed by post id.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencyIndex {
    tables: HashMap<String, TermFrequencyTable>,
    empty: TermFrequencyTable,
}

impl TermFrequencyIndex {
    /// Load an index from a `{ post_id: { token: weight } }` JSON file.
    ///
    /// Negative or non-finite weights are rejected up front.
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: HashMap<String, HashMap<String, f64>> =
            serde_json::from_str(&content).map_err(|source| ResourceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut tables = HashMap::with_capacity(raw.len());
        for (post_id, weights) in raw {
            for (token, &value) in &weights {
                if !value.is_finite() || value < 0.0 {
                    return Err(ResourceError::InvalidValue {
                        path: path.to_path_buf(),
                        key: format!("{post_id}/{token}"),
                        value,
                    });
                }
            }
            let table =
                TermFrequencyTable::from_pairs(weights.into_iter().map(|(k, v)| (k, v as f32)));
            tables.insert(post_id, table);
        }

        tracing::info!("Loaded term-frequency tables for {} posts", tables.len());
        Ok(Self {
            tables,
            empty: TermFrequencyTable::empty(),
        })
    }

    /// Build an index from in-memory tables.
    pub fn from_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = (S, TermFrequencyTable)>,
        S: Into<String>,
    {
        Self {
            tables: tables.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            empty: TermFrequencyTable::empty(),
        }
    }

    /// Table for `post_id`; unknown posts get an empty table.
    pub fn table(&self, post_id: &str) -> &TermFrequencyTable {
        match self.tables.get(post_id) {
            Some(table) => table,
            None => {
                tracing::debug!("No term-frequency table for post {post_id}, using floor weights");
                &self.empty
            }
        }
    }

    /// Number of posts with a table.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
