//! Pagination state for active queries.
//!
//! A pure state layer, separated from the session controller so cursor
//! arithmetic and state transitions can be unit tested without any async
//! infrastructure. The two dialects page differently: filter queries page
//! server-side through an offset cursor, pipeline queries are fetched whole
//! once and paged by sliding a window over the client-held buffer.

use super::router::Dialect;
use super::QueryResult;

/// Server-side paging position for a filter-dialect query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCursor {
    /// Result offset of the current page. Always a non-negative multiple of
    /// `page_size`.
    pub offset: u64,
    /// Rows per page.
    pub page_size: u64,
}

/// Client-side windowing position for a pipeline-dialect query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullLoadCursor {
    /// Whether the single fetch for this query has completed. Once true, no
    /// further network requests are issued for the same query.
    pub loaded: bool,
    /// Start of the display window within the loaded buffer.
    pub window_start: usize,
    /// Rows per window.
    pub window_size: usize,
}

/// Pagination position, created fresh for every submitted query and
/// discarded when the query changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Offset(OffsetCursor),
    FullLoad(FullLoadCursor),
}

impl Cursor {
    /// Creates the initial cursor for a dialect.
    pub fn for_dialect(dialect: Dialect, page_size: u64) -> Self {
        match dialect {
            Dialect::Filter => Cursor::Offset(OffsetCursor {
                offset: 0,
                page_size,
            }),
            Dialect::Pipeline => Cursor::FullLoad(FullLoadCursor {
                loaded: false,
                window_start: 0,
                window_size: page_size as usize,
            }),
        }
    }
}

/// Pagination lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// No query active; no cursor exists.
    #[default]
    NoQuery,
    /// A fetch for the current cursor is in flight.
    Loading,
    /// A result for the current cursor is displayed.
    Loaded,
}

/// Outcome of a page navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    /// A network fetch is required; the cursor has been advanced.
    Fetch(Cursor),
    /// The window slid over the already-loaded buffer; no fetch needed.
    Window,
    /// No move possible (boundary, or no loaded result).
    None,
}

/// Owns cursor state for the active query and decides whether page
/// navigation needs the network or is satisfied client-side.
#[derive(Debug, Default)]
pub struct PaginationController {
    state: PageState,
    cursor: Option<Cursor>,
}

impl PaginationController {
    /// Creates a controller with no active query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Returns the current cursor, if a query is active.
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Starts pagination for a newly submitted query.
    ///
    /// Always builds a fresh cursor; a cursor is never reused across
    /// different raw queries even when the dialect matches.
    pub fn submit(&mut self, dialect: Dialect, page_size: u64) -> Cursor {
        let cursor = Cursor::for_dialect(dialect, page_size);
        self.cursor = Some(cursor);
        self.state = PageState::Loading;
        cursor
    }

    /// Records a successful fetch for the current cursor.
    pub fn on_success(&mut self) {
        if let Some(Cursor::FullLoad(cursor)) = &mut self.cursor {
            cursor.loaded = true;
        }
        self.state = PageState::Loaded;
    }

    /// Records a failed fetch: the cursor is discarded and pagination
    /// returns to the no-query state.
    pub fn on_failure(&mut self) {
        self.cursor = None;
        self.state = PageState::NoQuery;
    }

    /// Requests the next page over the given loaded result.
    pub fn next_page(&mut self, result: &QueryResult) -> PageMove {
        if self.state != PageState::Loaded {
            return PageMove::None;
        }

        match &mut self.cursor {
            Some(Cursor::Offset(cursor)) => {
                if !result.has_more {
                    return PageMove::None;
                }
                cursor.offset += cursor.page_size;
                self.state = PageState::Loading;
                PageMove::Fetch(Cursor::Offset(*cursor))
            }
            Some(Cursor::FullLoad(cursor)) => {
                let max_start = result.rows.len().saturating_sub(cursor.window_size);
                let next = (cursor.window_start + cursor.window_size).min(max_start);
                if next == cursor.window_start {
                    return PageMove::None;
                }
                cursor.window_start = next;
                PageMove::Window
            }
            None => PageMove::None,
        }
    }

    /// Requests the previous page.
    pub fn previous_page(&mut self) -> PageMove {
        if self.state != PageState::Loaded {
            return PageMove::None;
        }

        match &mut self.cursor {
            Some(Cursor::Offset(cursor)) => {
                if cursor.offset == 0 {
                    return PageMove::None;
                }
                cursor.offset = cursor.offset.saturating_sub(cursor.page_size);
                self.state = PageState::Loading;
                PageMove::Fetch(Cursor::Offset(*cursor))
            }
            Some(Cursor::FullLoad(cursor)) => {
                if cursor.window_start == 0 {
                    return PageMove::None;
                }
                cursor.window_start = cursor.window_start.saturating_sub(cursor.window_size);
                PageMove::Window
            }
            None => PageMove::None,
        }
    }
}
