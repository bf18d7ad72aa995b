use crate::{parse_line, ParseError};
use rdf_harvest_model::Statement;
use std::io::{self, BufRead};
use tracing::{debug, info};

/// Options for reading a statement dump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Log every malformed line at debug level. Malformed lines are counted either way.
    pub log_failures: bool,
}

/// The result of parsing one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Statement(Statement),
    /// A blank or comment line.
    Skipped,
    Malformed(ParseError),
}

/// A lazy, single-pass iterator over the lines of a statement dump.
///
/// Yields the 1-based line number together with the outcome of parsing that line. Invalid UTF-8 is
/// replaced rather than treated as an I/O error, so only genuine read failures end the iteration
/// with an `Err`.
pub struct StatementLines<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> StatementLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for StatementLines<R> {
    type Item = io::Result<(usize, LineOutcome)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line = String::from_utf8_lossy(&self.buffer);
                let outcome = match parse_line(&line) {
                    Ok(Some(statement)) => LineOutcome::Statement(statement),
                    Ok(None) => LineOutcome::Skipped,
                    Err(error) => LineOutcome::Malformed(error),
                };
                Some(Ok((self.line_number, outcome)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Line counts gathered while reading a dump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub statements: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// All statements of a dump, materialized in input order.
#[derive(Clone, Debug, Default)]
pub struct ParsedDocument {
    pub statements: Vec<Statement>,
    pub stats: ParseStats,
}

/// Reads a whole dump into memory.
///
/// Only the line scan is streamed, the statements are kept because blank-node resolution needs
/// global lookups. Malformed lines are counted (and logged if requested) but never abort the read.
pub fn read_statements<R: BufRead>(
    reader: R,
    options: &ReaderOptions,
) -> io::Result<ParsedDocument> {
    let mut document = ParsedDocument::default();
    for line in StatementLines::new(reader) {
        let (line_number, outcome) = line?;
        document.stats.lines += 1;
        match outcome {
            LineOutcome::Statement(statement) => {
                document.stats.statements += 1;
                document.statements.push(statement);
            }
            LineOutcome::Skipped => document.stats.skipped += 1,
            LineOutcome::Malformed(error) => {
                document.stats.failed += 1;
                if options.log_failures {
                    debug!(line = line_number, %error, "Skipping malformed statement");
                }
            }
        }
    }
    info!(
        lines = document.stats.lines,
        statements = document.stats.statements,
        failed = document.stats.failed,
        "Finished reading statements"
    );
    Ok(document)
}
