//! Documentation site assembly for Shelf.
//!
//! Combines CMS documents, the navigation tree and the rich-text renderer
//! into [`PageView`]s, and builds the static search index.

mod error;
mod page;
mod site;

pub use error::SiteError;
pub use page::{PageMeta, PageView};
pub use site::{Site, SiteOptions};
