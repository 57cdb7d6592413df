//! Output formatting for labeled posts.
//!
//! JSON Lines output streams one labeled post per line as results arrive.
//! JSON output collects every post and writes a single array when the writer
//! is finished.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::ScoredLabel;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON array, written on finish
    Json,
    /// One JSON object per line, written immediately
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Serializes labeled posts as JSON or JSONL.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    pending: Vec<serde_json::Value>,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// `pretty` only affects JSON output; JSONL is always one line per item.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            pending: Vec::new(),
            items_written: 0,
        }
    }

    /// Write (JSONL) or queue (JSON) one item.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Json => {
                self.pending
                    .push(serde_json::to_value(item).map_err(io::Error::other)?);
            }
        }
        self.items_written += 1;
        Ok(())
    }

    /// Number of items accepted so far.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Write any queued JSON array, flush, and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.format == OutputFormat::Json {
            if self.pretty {
                serde_json::to_writer_pretty(&mut self.writer, &self.pending)
                    .map_err(io::Error::other)?;
            } else {
                serde_json::to_writer(&mut self.writer, &self.pending)
                    .map_err(io::Error::other)?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Render a ranking as an aligned, numbered text table.
pub fn format_ranking(labels: &[ScoredLabel]) -> String {
    let width = labels.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<width$}  {:.6}\n",
            i + 1,
            label.label,
            label.score,
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LabeledPost;

    fn labeled(id: &str) -> LabeledPost {
        LabeledPost {
            id: id.into(),
            rankings: vec![],
            emoji_items: vec![ScoredLabel::new("jeans", 1.0)],
            candidate_items: None,
            links: vec![],
            top_tokens: vec![],
        }
    }

    #[test]
    fn test_jsonl_streams_lines() {
        let mut writer = OutputWriter::new(Vec::new(), OutputFormat::JsonLines, true);
        writer.write(&labeled("p1")).unwrap();
        writer.write(&labeled("p2")).unwrap();
        assert_eq!(writer.items_written(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"id\":\"p1\""));
        assert!(lines[1].contains("\"id\":\"p2\""));
    }

    #[test]
    fn test_json_writes_array_on_finish() {
        let mut writer = OutputWriter::new(Vec::new(), OutputFormat::Json, false);
        writer.write(&labeled("p1")).unwrap();
        writer.write(&labeled("p2")).unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let parsed: Vec<LabeledPost> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].id, "p2");
    }

    #[test]
    fn test_json_empty_batch_is_empty_array() {
        let writer = OutputWriter::new(Vec::new(), OutputFormat::Json, false);
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(output.trim(), "[]");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("JSONL"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("ndjson"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("csv"), None);
    }

    #[test]
    fn test_format_ranking() {
        let table = format_ranking(&[
            ScoredLabel::new("jeans", 5.0),
            ScoredLabel::new("dress", 0.25),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. jeans"));
        assert!(lines[0].ends_with("5.000000"));
        assert!(lines[1].ends_with("0.250000"));
    }
}
