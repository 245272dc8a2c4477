//! Services orchestrating parsing, query composition, storage and mapping.

mod backend;
mod search;

pub use backend::Backend;
pub use search::{SearchAggregator, SearchTerms};
