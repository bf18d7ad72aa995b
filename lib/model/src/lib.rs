mod rdf;
mod record;
mod value;
pub mod vocab;

pub use rdf::*;
pub use record::*;
pub use value::*;
