//! Small extraction helpers over token streams.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;

static LIKETOKNOWIT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http://liketk\.it/([^\s]+)").expect("liketoknow.it pattern is valid")
});

/// The `num` most frequent tokens, most frequent first.
///
/// Ties keep first-occurrence order.
pub fn most_common<S: AsRef<str>>(tokens: &[S], num: usize) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        counts
            .entry(token.as_ref())
            .or_insert((0, position))
            .0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(num)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Every liketoknow.it short link found in the tokens, in order.
pub fn liketoknowit_links<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| LIKETOKNOWIT_LINK.find(token.as_ref()))
        .map(|m| m.as_str().to_string())
        .collect()
}
