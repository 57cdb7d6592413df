//! word2vec text-format parser.
//!
//! Format: a `<count> <dim>` header line, then one `word v1 v2 ... vdim` line
//! per vector, whitespace separated.

use std::io::BufRead;

use crate::error::EmbeddingError;

pub(super) enum ParseError {
    Io(std::io::Error),
    Embedding(EmbeddingError),
}

impl From<EmbeddingError> for ParseError {
    fn from(e: EmbeddingError) -> Self {
        Self::Embedding(e)
    }
}

pub(super) type Rows = Vec<(String, Vec<f32>)>;

/// Parse the whole stream into `(dim, rows)`.
pub(super) fn parse<R: BufRead>(reader: R) -> Result<(usize, Rows), ParseError> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(ParseError::Io)?,
        None => return Err(EmbeddingError::Header("file is empty".into()).into()),
    };
    let (count, dim) = parse_header(&header)?;

    // The header count is checked after the loop, not trusted for allocation.
    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line.map_err(ParseError::Io)?;
        let line_no = i + 2;
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let word = parts.next().unwrap_or_default().to_string();
        let vector = parts
            .map(|p| match p.parse::<f32>() {
                Ok(x) if x.is_finite() => Ok(x),
                Ok(_) => Err(EmbeddingError::Row {
                    line: line_no,
                    message: format!("non-finite component {p:?} for {word:?}"),
                }),
                Err(_) => Err(EmbeddingError::Row {
                    line: line_no,
                    message: format!("non-numeric component {p:?} for {word:?}"),
                }),
            })
            .collect::<Result<Vec<f32>, _>>()?;

        if vector.len() != dim {
            return Err(EmbeddingError::Row {
                line: line_no,
                message: format!(
                    "vector for {word:?} has {} components, expected {dim}",
                    vector.len()
                ),
            }
            .into());
        }
        rows.push((word, vector));
    }

    if rows.len() != count {
        return Err(EmbeddingError::Header(format!(
            "header declares {count} vectors, file contains {}",
            rows.len()
        ))
        .into());
    }

    Ok((dim, rows))
}

fn parse_header(line: &str) -> Result<(usize, usize), EmbeddingError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(EmbeddingError::Header(format!(
            "expected \"<count> <dim>\", got {line:?}"
        )));
    }
    let count = fields[0]
        .parse::<usize>()
        .map_err(|_| EmbeddingError::Header(format!("invalid vector count {:?}", fields[0])))?;
    let dim = fields[1]
        .parse::<usize>()
        .map_err(|_| EmbeddingError::Header(format!("invalid dimension {:?}", fields[1])))?;
    Ok((count, dim))
}
