//! Turn an affirmations CSV export into SQL `VALUES` tuples.
//!
//! Input has a header row followed by `affirmation,tag` records. Each record
//! becomes one `('<affirmation>','<tag>'),` line ready to paste under an
//! `INSERT INTO affirmations (text, tag) VALUES` statement.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: expected an affirmation and a tag")]
    MissingField { line: u64 },
}

/// What a conversion produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub rows: usize,
    pub tags: BTreeSet<String>,
}

/// Render one tuple line. Single quotes are doubled.
pub fn format_row(affirmation: &str, tag: &str) -> String {
    format!(
        "('{}','{}'),",
        affirmation.replace('\'', "''"),
        tag.replace('\'', "''")
    )
}

/// Convert every record of `input`, writing one tuple per line to `output`.
pub fn convert<R: Read, W: Write>(input: R, mut output: W) -> Result<ConversionSummary, ConvertError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut summary = ConversionSummary::default();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let (Some(affirmation), Some(tag)) = (record.get(0), record.get(1)) else {
            return Err(ConvertError::MissingField { line });
        };
        let (affirmation, tag) = (affirmation.trim(), tag.trim());

        writeln!(output, "{}", format_row(affirmation, tag))?;

        summary.tags.insert(tag.to_string());
        summary.rows += 1;
    }

    output.flush()?;

    Ok(summary)
}
