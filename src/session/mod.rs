//! Session orchestration for scry.
//!
//! The session controller is the top-level state machine: it owns the
//! current query, the current result, and the in-flight request bookkeeping,
//! and it is the only component that talks to the execution bridge and that
//! the renderer polls. All mutation happens on the interactive thread; the
//! worker context only ever produces outcome values.

pub mod bridge;

pub use bridge::{ExecutionBridge, Outcome, RequestId};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::error::Result;
use crate::es::SearchClient;
use crate::format::{self, FormattedTable};
use crate::query::filter::FilterAdapter;
use crate::query::pagination::PageMove;
use crate::query::pipeline::PipelineAdapter;
use crate::query::{Cursor, FullLoadCursor, PaginationController, Query, QueryResult};
use crate::time_range::TimePreset;

/// Session status as surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing in flight; the displayed result (if any) is current.
    #[default]
    Idle,
    /// A store request is in flight.
    Running,
    /// The most recent request failed; the previous result stays visible.
    Error,
}

/// All mutable session state. Exactly one exists per running process,
/// created at startup and mutated only by the session controller.
#[derive(Debug, Default)]
pub struct SessionState {
    /// The query whose result (or failure) is current.
    pub current_query: Option<Query>,
    /// The cursor that produced `current_result`, updated again on window
    /// slides. The in-flight cursor lives in the pagination controller.
    pub current_cursor: Option<Cursor>,
    /// The most recent accepted result. Survives later failures.
    pub current_result: Option<QueryResult>,
    /// Id of the only authoritative in-flight request. Outcomes carrying any
    /// other id are discarded unconditionally.
    pub last_request_id: RequestId,
    /// Current status.
    pub status: Status,
    /// Message of the most recent failure, cleared by the next success.
    pub last_error: Option<String>,
}

/// Pull-based snapshot of everything the renderer needs, rebuilt each tick.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    /// Display-ready table (column-capped, cell-capped).
    pub table: FormattedTable,
    /// Session status.
    pub status: Status,
    /// Error text to show when status is `Error`.
    pub error_message: Option<String>,
    /// Human-readable paging position, when a result is displayed.
    pub page_indicator: Option<String>,
    /// Dialect label of the current query, when one exists.
    pub dialect: Option<&'static str>,
    /// Label of the active time range preset.
    pub time_range: &'static str,
}

/// Top-level controller tying the router, adapters, pagination, and bridge
/// together.
pub struct SessionController {
    client: Arc<dyn SearchClient>,
    filter_adapter: FilterAdapter,
    pipeline_adapter: PipelineAdapter,
    pager: PaginationController,
    bridge: ExecutionBridge<QueryResult>,
    state: SessionState,
    page_size: u64,
    time_preset: TimePreset,
}

impl SessionController {
    /// Creates a session over the given store client.
    ///
    /// Returns the controller and the outcome receiver the interactive loop
    /// must drain between frames.
    pub fn new(
        client: Arc<dyn SearchClient>,
        config: &QueryConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Outcome<QueryResult>>) {
        let (bridge, rx) = ExecutionBridge::new();
        let controller = Self {
            client,
            filter_adapter: FilterAdapter::new(config),
            pipeline_adapter: PipelineAdapter::new(config),
            pager: PaginationController::new(),
            bridge,
            state: SessionState::default(),
            page_size: config.default_size.min(config.max_size),
            time_preset: TimePreset::default(),
        };
        (controller, rx)
    }

    /// Read-only access to the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns true while a request is in flight.
    pub fn is_running(&self) -> bool {
        self.state.status == Status::Running
    }

    /// The active time range preset.
    pub fn time_preset(&self) -> TimePreset {
        self.time_preset
    }

    /// Cycles the time range preset forward. Takes effect on the next fetch.
    pub fn cycle_time_range(&mut self) {
        self.time_preset = self.time_preset.next();
    }

    /// Cycles the time range preset backward.
    pub fn cycle_time_range_back(&mut self) {
        self.time_preset = self.time_preset.prev();
    }

    /// Submits a new query, superseding whatever is in flight.
    ///
    /// Classification happens here; a fresh cursor replaces any prior one and
    /// the previous request's eventual outcome becomes irrelevant. Empty
    /// input fails without issuing a request or touching session state.
    pub fn submit_query(&mut self, raw_text: &str) -> Result<()> {
        let query = Query::classify(raw_text)?;
        let cursor = self.pager.submit(query.dialect, self.page_size);
        self.state.current_query = Some(query.clone());
        self.dispatch(query, cursor);
        Ok(())
    }

    /// Requests the next page of the current result.
    ///
    /// Filter-dialect paging issues a new fetch; pipeline-dialect paging
    /// slides the window synchronously with no status transition.
    pub fn next_page(&mut self) {
        let page_move = match self.state.current_result.as_ref() {
            Some(result) => self.pager.next_page(result),
            None => PageMove::None,
        };
        self.apply_page_move(page_move);
    }

    /// Requests the previous page of the current result.
    pub fn previous_page(&mut self) {
        let page_move = self.previous_page_move();
        self.apply_page_move(page_move);
    }

    fn previous_page_move(&mut self) -> PageMove {
        if self.state.current_result.is_none() {
            return PageMove::None;
        }
        self.pager.previous_page()
    }

    fn apply_page_move(&mut self, page_move: PageMove) {
        match page_move {
            PageMove::Fetch(cursor) => {
                if let Some(query) = self.state.current_query.clone() {
                    self.dispatch(query, cursor);
                }
            }
            PageMove::Window => {
                self.state.current_cursor = self.pager.cursor();
            }
            PageMove::None => {}
        }
    }

    /// Starts a fetch for the given query and cursor on the worker context.
    fn dispatch(&mut self, query: Query, cursor: Cursor) {
        self.state.last_request_id = self.state.last_request_id.next();
        self.state.status = Status::Running;

        let id = self.state.last_request_id;
        let client = Arc::clone(&self.client);
        let bounds = Some(self.time_preset.bounds());
        debug!(id = %id, dialect = query.dialect.as_str(), "dispatching query");

        match cursor {
            Cursor::Offset(cursor) => {
                let adapter = self.filter_adapter.clone();
                let request = adapter.build_request(&query.raw_text, &cursor, bounds);
                self.bridge.submit(id, async move {
                    let response = client.execute_filter(&request).await?;
                    Ok(adapter.parse_response(response, &cursor))
                });
            }
            Cursor::FullLoad(_) => {
                let adapter = self.pipeline_adapter.clone();
                let request = adapter.build_request(&query.raw_text, bounds);
                self.bridge.submit(id, async move {
                    let response = client.execute_pipeline(&request).await?;
                    Ok(adapter.parse_response(response))
                });
            }
        }
    }

    /// Applies an outcome delivered by the bridge.
    ///
    /// Outcomes whose request id does not match the latest submission are
    /// stale and dropped without touching any state. A failure keeps the
    /// previous result on screen.
    pub fn handle_outcome(&mut self, outcome: Outcome<QueryResult>) {
        if outcome.request_id != self.state.last_request_id {
            debug!(id = %outcome.request_id, "discarding stale outcome");
            return;
        }

        match outcome.result {
            Ok(result) => {
                self.pager.on_success();
                self.state.current_cursor = self.pager.cursor();
                self.state.current_result = Some(result);
                self.state.status = Status::Idle;
                self.state.last_error = None;
            }
            Err(e) => {
                warn!(id = %outcome.request_id, error = %e, "query failed");
                self.pager.on_failure();
                self.state.current_cursor = None;
                self.state.status = Status::Error;
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    /// Builds the renderer's snapshot for this tick.
    pub fn current_view(&self) -> ViewSnapshot {
        let (table, page_indicator) = match &self.state.current_result {
            Some(result) => {
                let (rows, indicator) = self.visible_rows(result);
                (
                    format::format_rows(&result.columns, rows),
                    Some(indicator),
                )
            }
            None => (FormattedTable::default(), None),
        };

        ViewSnapshot {
            table,
            status: self.state.status,
            error_message: self.state.last_error.clone(),
            page_indicator,
            dialect: self
                .state
                .current_query
                .as_ref()
                .map(|q| q.dialect.as_str()),
            time_range: self.time_preset.label(),
        }
    }

    /// Selects the rows to display and describes the paging position.
    fn visible_rows<'a>(&self, result: &'a QueryResult) -> (&'a [crate::query::Row], String) {
        match self.state.current_cursor {
            Some(Cursor::Offset(cursor)) => {
                let indicator = if result.rows.is_empty() {
                    "No results".to_string()
                } else {
                    let start = cursor.offset + 1;
                    let end = cursor.offset + result.rows.len() as u64;
                    match result.total_hint {
                        Some(total) => format!("Rows {start}-{end} of {total}"),
                        None => format!("Rows {start}-{end}"),
                    }
                };
                (&result.rows, indicator)
            }
            Some(Cursor::FullLoad(cursor)) => {
                let (rows, indicator) = window_slice(&result.rows, &cursor);
                (rows, indicator)
            }
            None => (&result.rows, format!("{} rows", result.rows.len())),
        }
    }
}

/// Applies a full-load window to the buffered rows.
fn window_slice<'a>(
    rows: &'a [crate::query::Row],
    cursor: &FullLoadCursor,
) -> (&'a [crate::query::Row], String) {
    if rows.is_empty() {
        return (rows, "No results".to_string());
    }

    let start = cursor.window_start.min(rows.len().saturating_sub(1));
    let end = (start + cursor.window_size).min(rows.len());
    let indicator = format!("Rows {}-{} of {} (loaded)", start + 1, end, rows.len());
    (&rows[start..end], indicator)
}
