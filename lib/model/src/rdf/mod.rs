mod statement;
mod term;

pub use statement::Statement;
pub use term::NodeRef;
pub use term::ObjectValue;
pub use term::BLANK_NODE_PREFIX;
