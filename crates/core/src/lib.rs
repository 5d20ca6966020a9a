//! Core row model and in-memory sheet state.
//!
//! This crate is the single source of truth for how a fetched sheet is
//! held client-side: the row shape, how a row is identified across
//! update/delete round-trips, how mutations are reconciled locally, and
//! how the filtered view is sliced into pages.
//!
//! No HTTP. No configuration. No terminal output.

mod paging;
mod row;
mod store;

pub use paging::{page_slice, page_window, total_pages, PageItem, PAGE_SIZE};
pub use row::{display_value, row_identity, Row, RowKey, ROW_NUMBER_COLUMN};
pub use store::SheetBuffer;
