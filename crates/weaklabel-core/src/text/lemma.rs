//! Lemmatizers: canonical base forms for tokens and label words.
//!
//! The same lemmatizer must be applied to both sides of every comparison.
//! Label words are lemmatized once when a vocabulary is compiled; tokens are
//! lemmatized on demand during scoring.

use std::collections::{HashMap, HashSet};

use rust_stemmers::{Algorithm, Stemmer};

/// Canonicalizes a token to its dictionary base form.
///
/// Implementations must be pure and deterministic. Unknown words pass through
/// unchanged.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

/// Irregular noun plurals, checked before any detachment rule.
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("gentlemen", "gentleman"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("scarves", "scarf"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// WordNet noun detachment rules: (suffix, replacement).
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Endings that look plural but almost never are.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

/// WordNet-style noun lemmatizer.
///
/// With a dictionary attached the behavior follows WordNet's `morphy`: the
/// word itself and every rule-derived candidate are filtered against the
/// dictionary and the shortest survivor wins. Without a dictionary a guarded
/// subset of the rules is applied directly.
#[derive(Debug, Clone)]
pub struct MorphyLemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
    dictionary: Option<HashSet<String>>,
}

impl Default for MorphyLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MorphyLemmatizer {
    /// Create a lemmatizer that applies rules heuristically.
    pub fn new() -> Self {
        Self {
            exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
            dictionary: None,
        }
    }

    /// Create a lemmatizer that only accepts forms present in `words`.
    pub fn with_dictionary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: HashSet<String> = words.into_iter().map(Into::into).collect();
        tracing::debug!("Morphy lemmatizer dictionary: {} words", dictionary.len());
        Self {
            exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
            dictionary: Some(dictionary),
        }
    }

    fn lemmatize_with_dictionary(&self, token: &str, dictionary: &HashSet<String>) -> String {
        let mut candidates: Vec<String> = vec![token.to_string()];
        if let Some(base) = self.exceptions.get(token) {
            candidates.push((*base).to_string());
        } else {
            for (suffix, replacement) in NOUN_RULES {
                if let Some(stem) = token.strip_suffix(suffix) {
                    candidates.push(format!("{stem}{replacement}"));
                }
            }
        }

        candidates
            .into_iter()
            .filter(|c| dictionary.contains(c))
            .min_by_key(|c| c.chars().count())
            .unwrap_or_else(|| token.to_string())
    }

    fn lemmatize_heuristic(&self, token: &str) -> String {
        if let Some(base) = self.exceptions.get(token) {
            return (*base).to_string();
        }
        if token.chars().count() <= 3 || SINGULAR_ENDINGS.iter().any(|e| token.ends_with(e)) {
            return token.to_string();
        }

        // Most specific suffix first; "ses" and "zes" keep their "e" unless
        // doubled ("dresses" -> "dress", "blouses" -> "blouse").
        if let Some(stem) = token.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{stem}y");
            }
        }
        for suffix in ["sses", "zzes", "xes", "ches", "shes"] {
            if token.ends_with(suffix) {
                return token[..token.len() - 2].to_string();
            }
        }
        match token.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => token.to_string(),
        }
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        match &self.dictionary {
            Some(dictionary) => self.lemmatize_with_dictionary(token, dictionary),
            None => self.lemmatize_heuristic(token),
        }
    }
}

/// Porter2 (Snowball English) stemmer used as a lemmatizer.
///
/// Stems are not always dictionary words ("vintage" -> "vintag"), so this is
/// only a good fit for syntactic-only ranking where no embedding lookup
/// happens.
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
}

impl Default for SnowballLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SnowballLemmatizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        self.stemmer.stem(&token.to_lowercase()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_regular_plurals() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("dresses"), "dress");
        assert_eq!(lemmatizer.lemmatize("jeans"), "jean");
        assert_eq!(lemmatizer.lemmatize("handbags"), "handbag");
        assert_eq!(lemmatizer.lemmatize("blouses"), "blouse");
        assert_eq!(lemmatizer.lemmatize("shoes"), "shoe");
        assert_eq!(lemmatizer.lemmatize("watches"), "watch");
        assert_eq!(lemmatizer.lemmatize("accessories"), "accessory");
    }

    #[test]
    fn test_heuristic_leaves_singulars_alone() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("dress"), "dress");
        assert_eq!(lemmatizer.lemmatize("denim"), "denim");
        assert_eq!(lemmatizer.lemmatize("bus"), "bus");
        assert_eq!(lemmatizer.lemmatize("chiffon"), "chiffon");
        assert_eq!(lemmatizer.lemmatize("tennis"), "tennis");
    }

    #[test]
    fn test_exceptions() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("scarves"), "scarf");
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
    }

    #[test]
    fn test_unknown_passes_through() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("👜"), "👜");
        assert_eq!(lemmatizer.lemmatize(""), "");
        assert_eq!(lemmatizer.lemmatize("ootd"), "ootd");
    }

    #[test]
    fn test_dictionary_picks_shortest_known_form() {
        let lemmatizer = MorphyLemmatizer::with_dictionary(["jeans", "jean", "dress", "blouse"]);
        assert_eq!(lemmatizer.lemmatize("jeans"), "jean");
        assert_eq!(lemmatizer.lemmatize("dresses"), "dress");
        assert_eq!(lemmatizer.lemmatize("blouses"), "blouse");
        assert_eq!(lemmatizer.lemmatize("dress"), "dress");
    }

    #[test]
    fn test_dictionary_rejects_unknown_candidates() {
        let lemmatizer = MorphyLemmatizer::with_dictionary(["dress"]);
        // "boxes" -> "box" is not in the dictionary, so the word is kept
        assert_eq!(lemmatizer.lemmatize("boxes"), "boxes");
    }

    #[test]
    fn test_lemmatize_is_deterministic() {
        let lemmatizer = MorphyLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("sneakers"), lemmatizer.lemmatize("sneakers"));
    }

    #[test]
    fn test_snowball() {
        let lemmatizer = SnowballLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("dresses"), "dress");
        assert_eq!(lemmatizer.lemmatize("Jeans"), "jean");
        assert_eq!(
            lemmatizer.lemmatize("handbags"),
            lemmatizer.lemmatize("handbag")
        );
    }
}
