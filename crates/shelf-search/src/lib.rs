//! Full-text search over a prebuilt static index.
//!
//! [`SearchIndexBuilder`] turns rendered pages into a JSON index that is
//! written to the public directory. [`SearchClient`] loads that index on
//! first use and answers queries: the engine ranks documents by token prefix
//! matches (title matches weigh more), then results are filtered strictly so
//! every query token appears as a substring of some word of the result.

mod builder;
mod client;
mod error;
mod index;

pub use builder::SearchIndexBuilder;
pub use client::{SearchClient, SearchOutcome};
pub use error::SearchError;
pub use index::{INDEX_VERSION, SearchDocument, SearchHit, SearchIndex, tokenize};
