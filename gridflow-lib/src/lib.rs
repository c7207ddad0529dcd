//! Data-table coordination engine
//!
//! Coordination logic for paginated, sortable, selectable data tables that
//! sit over a remote row source: server-side pagination and sorting with
//! race-safe fetching, persisted column visibility, debounced filter
//! dispatch with query-string sync, and tri-state row selection that can
//! materialize beyond the currently loaded page.
//!
//! Rendering, routing, and transport are not provided here. The host
//! supplies a [`table::RowSource`], drains a [`notify::NoticeReceiver`],
//! and renders from the snapshots the engine exposes.

pub mod assemble;
pub mod error;
pub mod filter;
pub mod model;
pub mod notify;
pub mod prefs;
pub mod selection;
pub mod table;
pub mod visibility;

pub use model::Direction;
pub use model::Listing;
pub use notify::Notice;
pub use notify::NoticeLevel;
