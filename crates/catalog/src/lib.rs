//! Content catalog core: the per-view filter state, tag aggregation, and the
//! seams the catalog reads content from and writes contact requests to.

pub mod card;
pub mod filter;
pub mod source;
pub mod view;

pub use card::{parse_content_date, ContentRecord};
pub use filter::{aggregate_tags, filter_items, FilterState, LanguageFilter};
pub use source::{ContactSink, ContentSource};
pub use view::{ContentView, ViewState};
