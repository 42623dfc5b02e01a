//! SurrealPojo Library
//!
//! Reads plain-form JSON documents and runs them through the `pojo-types`
//! converters.
//!
//! # CLI Usage
//!
//! ```bash
//! # Print each document as SurrealQL
//! surreal-pojo to-surql --input data.json
//!
//! # Canonicalize plain JSON Lines read from stdin
//! cat data.jsonl | surreal-pojo normalize --jsonl
//!
//! # Validate documents without producing output
//! surreal-pojo check --input data.jsonl --jsonl --max-depth 64
//! ```

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pojo_types::{ConversionConfig, ConversionError, DEFAULT_MAX_DEPTH};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
pub struct ConvertOpts {
    /// Maximum nesting depth of a document
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "SURREAL_POJO_MAX_DEPTH")]
    pub max_depth: usize,
}

impl ConvertOpts {
    pub fn config(&self) -> ConversionConfig {
        ConversionConfig::new().with_max_depth(self.max_depth)
    }
}

#[derive(Parser, Clone, Debug)]
pub struct InputOpts {
    /// Input file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Treat the input as JSON Lines, one document per line
    #[arg(long)]
    pub jsonl: bool,
}

/// A parsed input document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// 1-based line the document starts on (always 1 for a single JSON document)
    pub line: usize,
    pub value: serde_json::Value,
}

/// Read every document named by `opts`.
pub fn read_documents(opts: &InputOpts) -> Result<Vec<Document>> {
    let (reader, source_name): (Box<dyn Read>, String) = match &opts.input {
        Some(path) => (
            Box::new(
                std::fs::File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?,
            ),
            path.display().to_string(),
        ),
        None => (Box::new(std::io::stdin()), "stdin".to_string()),
    };
    tracing::debug!("Reading documents from {source_name}");
    parse_documents(reader, opts.jsonl).with_context(|| format!("Failed to read {source_name}"))
}

/// Parse a single JSON document, or JSON Lines when `jsonl` is set.
pub fn parse_documents(reader: impl Read, jsonl: bool) -> Result<Vec<Document>> {
    if !jsonl {
        let value = serde_json::from_reader(reader).context("Error parsing JSON document")?;
        return Ok(vec![Document { line: 1, value }]);
    }

    let mut documents = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_count = index + 1;

        if line.trim().is_empty() {
            continue;
        }

        let value = serde_json::from_str(&line)
            .map_err(|e| anyhow!("Error parsing JSON at line {line_count}: {e}"))?;
        documents.push(Document {
            line: line_count,
            value,
        });
    }
    Ok(documents)
}

/// Convert each document and write it as SurrealQL, one per line.
pub fn to_surql(
    documents: &[Document],
    config: &ConversionConfig,
    out: &mut impl Write,
) -> Result<()> {
    for doc in documents {
        tracing::trace!("Converting document at line {}", doc.line);
        let rich = pojo_types::rich_from_json_with_config(doc.value.clone(), config)
            .with_context(|| format!("Failed to convert document at line {}", doc.line))?;
        writeln!(out, "{rich}")?;
    }
    Ok(())
}

/// Convert each document to SurrealDB values and back, writing the
/// canonical plain JSON.
///
/// Durations come back in their canonical unit breakdown, polygon rings come
/// back closed and numbers in geometry coordinates become floats.
pub fn normalize(
    documents: &[Document],
    config: &ConversionConfig,
    pretty: bool,
    out: &mut impl Write,
) -> Result<()> {
    for doc in documents {
        tracing::trace!("Normalizing document at line {}", doc.line);
        let normalized = pojo_types::rich_from_json_with_config(doc.value.clone(), config)
            .and_then(|rich| pojo_types::rich_to_json_with_config(&rich, config))
            .with_context(|| format!("Failed to normalize document at line {}", doc.line))?;
        if pretty {
            serde_json::to_writer_pretty(&mut *out, &normalized)?;
        } else {
            serde_json::to_writer(&mut *out, &normalized)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Outcome of [`check`].
#[derive(Debug, Default)]
pub struct CheckReport {
    pub total: usize,
    /// Line and first error of each failing document
    pub failures: Vec<(usize, ConversionError)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Try converting every document, reporting failures to `out` without
/// stopping at the first one.
pub fn check(
    documents: &[Document],
    config: &ConversionConfig,
    out: &mut impl Write,
) -> Result<CheckReport> {
    let mut report = CheckReport {
        total: documents.len(),
        ..Default::default()
    };

    for doc in documents {
        if let Err(e) = pojo_types::rich_from_json_with_config(doc.value.clone(), config) {
            tracing::debug!("Document at line {} failed: {e}", doc.line);
            writeln!(out, "line {}: {e}", doc.line)?;
            report.failures.push((doc.line, e));
        }
    }

    writeln!(
        out,
        "{} of {} documents converted successfully",
        report.total - report.failures.len(),
        report.total
    )?;
    Ok(report)
}
