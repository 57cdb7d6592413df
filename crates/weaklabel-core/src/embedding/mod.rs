//! Word-vector embedding space.
//!
//! Loads a table of pre-trained word vectors and answers cosine-similarity
//! queries between two words. The table is read once at startup and shared
//! read-only across every ranking call.
//!
//! # Usage
//!
//! ```rust,ignore
//! use weaklabel_core::embedding::WordVectors;
//!
//! let vectors = WordVectors::load(Path::new("vectors.txt"))?;
//! if let Some(cosine) = vectors.similarity("jean", "denim") {
//!     println!("jean ~ denim: {cosine:.3}");
//! }
//! ```

mod word2vec;

use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;

use crate::error::EmbeddingError;
use crate::math::l2_normalize_in_place;

/// Word vectors stored as an L2-normalized N×D matrix.
///
/// Rows are unit length, so the dot product of two rows is their cosine
/// similarity.
pub struct WordVectors {
    words: Vec<String>,
    index: HashMap<String, usize>,
    matrix: Array2<f32>,
}

impl WordVectors {
    /// Load word vectors from a word2vec text-format file.
    pub fn load(path: &Path) -> Result<Self, EmbeddingError> {
        let file = std::fs::File::open(path).map_err(|source| EmbeddingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (dim, rows) = word2vec::parse(std::io::BufReader::new(file)).map_err(|e| match e {
            word2vec::ParseError::Io(source) => EmbeddingError::Read {
                path: path.to_path_buf(),
                source,
            },
            word2vec::ParseError::Embedding(e) => e,
        })?;
        let vectors = Self::from_rows(dim, rows)?;

        tracing::info!(
            "Loaded word vectors: {} words x {} dims from {:?}",
            vectors.len(),
            vectors.dim(),
            path
        );
        Ok(vectors)
    }

    /// Build a table from in-memory `(word, vector)` pairs.
    ///
    /// Every vector must have exactly `dim` finite components. When a word appears
    /// more than once, the first vector wins.
    pub fn from_rows<I, S>(dim: usize, rows: I) -> Result<Self, EmbeddingError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        if dim == 0 {
            return Err(EmbeddingError::Header("dimension must be > 0".into()));
        }

        let mut words = Vec::new();
        let mut index = HashMap::new();
        let mut flat: Vec<f32> = Vec::new();

        for (i, (word, mut vector)) in rows.into_iter().enumerate() {
            let word = word.into();
            if vector.len() != dim {
                return Err(EmbeddingError::Row {
                    line: i + 1,
                    message: format!(
                        "vector for {word:?} has {} components, expected {dim}",
                        vector.len()
                    ),
                });
            }
            if let Some(x) = vector.iter().find(|x| !x.is_finite()) {
                return Err(EmbeddingError::Row {
                    line: i + 1,
                    message: format!("non-finite component {x} for {word:?}"),
                });
            }
            if index.contains_key(&word) {
                tracing::debug!("Duplicate word vector for {:?}, keeping the first", word);
                continue;
            }
            l2_normalize_in_place(&mut vector);
            flat.extend_from_slice(&vector);
            index.insert(word.clone(), words.len());
            words.push(word);
        }

        let matrix = Array2::from_shape_vec((words.len(), dim), flat)
            .map_err(|e| EmbeddingError::Header(format!("inconsistent matrix shape: {e}")))?;

        Ok(Self {
            words,
            index,
            matrix,
        })
    }

    /// Whether `word` has a vector.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Cosine similarity between two words, or `None` if either is
    /// out of vocabulary.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        Some(self.matrix.row(i).dot(&self.matrix.row(j)))
    }

    /// All words with a vector, in file order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words in the table.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Vector dimensionality.
    pub fn dim(&self) -> usize {
        self.matrix.ncols()
    }
}
