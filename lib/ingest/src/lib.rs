//! Parsing of line-oriented statement dumps (N-Triples and N-Quads as found in web crawls).
//!
//! Each line is parsed on its own by [parse_line]. [read_statements] streams a whole dump through
//! the parser and keeps count of the lines it had to skip.

mod error;
mod escape;
mod parser;
mod reader;
mod tokenizer;

pub use error::ParseError;
pub use escape::{unescape, unescape_lenient};
pub use parser::parse_line;
pub use reader::{
    read_statements, LineOutcome, ParseStats, ParsedDocument, ReaderOptions, StatementLines,
};
pub use tokenizer::tokenize;
