//! Directory core
//!
//! Pure projection of the full record set plus the user's query state into
//! a render-ready view:
//!
//! ```text
//! records -> filter -> (floor sort) -> paginate -> window -> ViewModel
//! ```
//!
//! Nothing here owns state or performs I/O. The caller (server handler or
//! client controller) owns the record set and the [`QueryState`] and calls
//! [`compose`] again whenever either changes.

pub mod filter;
pub mod pagination;
pub mod query;
pub mod view_model;

pub use filter::{distinct_departments, distinct_floors, filter, matches, sort_by_floor};
pub use pagination::{MAX_VISIBLE_PAGES, Page, PageLink, paginate, total_pages, window_pages};
pub use query::{PageSizes, QueryState, SortOrder, Surface, ViewMode};
pub use view_model::{DirectoryStats, ViewModel, compose};
