//! Token-level text utilities: lemmatization, edit distance and extraction
//! helpers shared by the ranking engine.

pub mod distance;
pub mod extract;
pub mod lemma;

pub use distance::edit_distance;
pub use extract::{liketoknowit_links, most_common};
pub use lemma::{Lemmatizer, MorphyLemmatizer, SnowballLemmatizer};
