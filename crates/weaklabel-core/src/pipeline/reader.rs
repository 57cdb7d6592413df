//! JSON Lines post reader.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{Result, WeakLabelError};
use crate::types::Post;

/// Read every post from a JSON Lines file.
///
/// Blank lines are skipped. A line that is not a valid post aborts the read
/// with its line number.
pub fn read_posts(path: &Path) -> Result<Vec<Post>> {
    let file = std::fs::File::open(path)?;
    let posts = parse_posts(std::io::BufReader::new(file), path)?;
    tracing::info!("Read {} posts from {:?}", posts.len(), path);
    Ok(posts)
}

/// Parse posts from any buffered reader. `origin` only labels errors.
pub fn parse_posts<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Post>> {
    let mut posts = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let post: Post = serde_json::from_str(&line).map_err(|e| WeakLabelError::Input {
            path: PathBuf::from(origin),
            line: i + 1,
            message: e.to_string(),
        })?;
        posts.push(post);
    }
    Ok(posts)
}
