//! Listing descriptor for paginated fetches.

use std::cmp::Ordering;

/// Sort direction for listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns the conventional lowercase wire token (`"asc"`/`"desc"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Comparator over rendered cell values, for sources that sort client-side.
pub type CellComparator = fn(&str, &str) -> Ordering;

/// A normalized pagination/sort request passed to a row source.
///
/// Built by the table controller on every page, page-size, or sort change
/// and compared by value against the previous request to suppress
/// redundant fetches.
///
/// # Example
///
/// ```
/// use gridflow_lib::model::{Direction, Listing};
///
/// let listing = Listing::page(2, 25).order_by("name", Direction::Desc);
/// assert_eq!(listing.offset, 50);
/// assert_eq!(listing.first, 25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Number of rows requested, or [`Listing::FETCH_ALL`] for every
    /// matching row.
    pub first: i64,
    /// Number of rows to skip.
    pub offset: u64,
    /// Sort direction for `order_by`.
    pub sort_direction: Direction,
    /// Column key to sort by, if any.
    pub order_by: Option<String>,
    /// Client-side comparator, for sources without server sorting.
    pub comparator: Option<CellComparator>,
}

impl Listing {
    /// Sentinel `first` value meaning "fetch every matching row".
    ///
    /// Used by select-all materialization and export.
    pub const FETCH_ALL: i64 = -1;

    /// Creates a listing for one page of results.
    pub fn page(page: u64, page_size: u64) -> Self {
        Self {
            first: page_size as i64,
            offset: page * page_size,
            sort_direction: Direction::default(),
            order_by: None,
            comparator: None,
        }
    }

    /// Sets the sort column and direction.
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(column.into());
        self.sort_direction = direction;
        self
    }

    /// Sets a client-side comparator.
    pub fn with_comparator(mut self, comparator: CellComparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Returns `true` if this listing requests every matching row.
    pub fn is_fetch_all(&self) -> bool {
        self.first == Self::FETCH_ALL
    }

    /// Returns a copy of this listing widened to every matching row,
    /// keeping sort settings.
    pub fn widened(&self) -> Self {
        Self {
            first: Self::FETCH_ALL,
            offset: 0,
            ..self.clone()
        }
    }
}
