//! Extraction of restaurant records from line-oriented RDF crawl dumps.
//!
//! ```
//! use rdf_harvest::{extract_reader, HarvestOptions};
//! use std::io::Cursor;
//!
//! let dump = "<http://ex/r1> <http://schema.org/type> <http://schema.org/Restaurant> .\n";
//! let harvest = extract_reader(Cursor::new(dump), &HarvestOptions::default())?;
//! assert_eq!(harvest.extraction.records[0].id, "http://ex/r1");
//! # Result::<_, rdf_harvest::HarvestError>::Ok(())
//! ```

mod error;
mod pipeline;

pub use error::HarvestError;
pub use pipeline::{extract_file, extract_reader, extract_to_file, Harvest, HarvestOptions};

pub mod model {
    pub use rdf_harvest_model::*;
}

pub mod ingest {
    pub use rdf_harvest_ingest::*;
}

pub mod extract {
    pub use rdf_harvest_extract::*;
}

pub mod reconcile {
    pub use rdf_harvest_reconcile::*;
}
