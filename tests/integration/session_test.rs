//! Session controller scenario tests.
//!
//! End-to-end checks of the invariants that make the non-blocking core safe:
//! only the newest request's outcome is ever applied, failures never blank
//! the screen, and the display caps hold for any document shape.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;

use scry::config::QueryConfig;
use scry::error::{Result, ScryError};
use scry::es::{
    FilterHit, FilterRequest, FilterResponse, MockSearchClient, PipelineRequest,
    PipelineResponse, SearchClient,
};
use scry::format::{MAX_CELL_WIDTH, MAX_COLUMNS};
use scry::query::QueryResult;
use scry::session::{Outcome, SessionController, Status};

async fn settle(
    session: &mut SessionController,
    rx: &mut mpsc::UnboundedReceiver<Outcome<QueryResult>>,
) {
    let outcome = rx.recv().await.expect("bridge closed");
    session.handle_outcome(outcome);
}

/// Filter searches dawdle; pipeline queries return instantly. Used to force
/// a later-submitted request to complete first.
struct RacingClient;

#[async_trait]
impl SearchClient for RacingClient {
    async fn execute_filter(&self, _request: &FilterRequest) -> Result<FilterResponse> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(FilterResponse {
            hits: vec![hit("slow-doc", json!({"message": "from the slow query"}))],
            total: Some(1),
        })
    }

    async fn execute_pipeline(&self, _request: &PipelineRequest) -> Result<PipelineResponse> {
        serde_json::from_value(json!({
            "columns": [{"name": "host", "type": "keyword"}],
            "values": [["web-1"], ["web-2"]],
        }))
        .map_err(|e| ScryError::internal(e.to_string()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Fails filter searches whose expression contains "boom".
struct SelectiveFailClient;

#[async_trait]
impl SearchClient for SelectiveFailClient {
    async fn execute_filter(&self, request: &FilterRequest) -> Result<FilterResponse> {
        if request.expression.contains("boom") {
            return Err(ScryError::transport("connection reset by peer"));
        }
        Ok(FilterResponse {
            hits: vec![hit("ok-doc", json!({"status": 200}))],
            total: Some(1),
        })
    }

    async fn execute_pipeline(&self, _request: &PipelineRequest) -> Result<PipelineResponse> {
        Ok(PipelineResponse::default())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Returns documents with far more fields, and far longer values, than the
/// display caps allow.
struct WideDocClient;

#[async_trait]
impl SearchClient for WideDocClient {
    async fn execute_filter(&self, _request: &FilterRequest) -> Result<FilterResponse> {
        let mut source = serde_json::Map::new();
        for i in 0..25 {
            source.insert(format!("field_{i:02}"), json!("v".repeat(4096)));
        }
        Ok(FilterResponse {
            hits: vec![FilterHit {
                id: "wide-doc".to_string(),
                index: "logs".to_string(),
                source,
            }],
            total: Some(1),
        })
    }

    async fn execute_pipeline(&self, _request: &PipelineRequest) -> Result<PipelineResponse> {
        Ok(PipelineResponse::default())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

fn hit(id: &str, source: serde_json::Value) -> FilterHit {
    let serde_json::Value::Object(source) = source else {
        panic!("source must be an object");
    };
    FilterHit {
        id: id.to_string(),
        index: "logs".to_string(),
        source,
    }
}

#[tokio::test]
async fn latest_request_wins_over_stale_outcome() {
    let (mut session, mut rx) = SessionController::new(Arc::new(RacingClient), &QueryConfig::default());

    // The slow filter query goes out first, then is superseded while still
    // in flight.
    session.submit_query("status:200").unwrap();
    session.submit_query("FROM logs | LIMIT 5").unwrap();

    // Completion order inverts submission order.
    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert!(first.request_id > second.request_id);

    session.handle_outcome(first);
    let view_after_winner = session.current_view();
    session.handle_outcome(second);

    // The stale filter outcome changed nothing.
    let state = session.state();
    assert_eq!(state.status, Status::Idle);
    let result = state.current_result.as_ref().unwrap();
    assert_eq!(result.columns, vec!["host".to_string()]);
    assert_eq!(result.rows.len(), 2);
    assert_eq!(
        session.current_view().table.rows,
        view_after_winner.table.rows
    );
}

#[tokio::test]
async fn transport_failure_preserves_previous_result() {
    let (mut session, mut rx) =
        SessionController::new(Arc::new(SelectiveFailClient), &QueryConfig::default());

    session.submit_query("status:200").unwrap();
    settle(&mut session, &mut rx).await;
    assert_eq!(session.state().status, Status::Idle);

    session.submit_query("boom").unwrap();
    settle(&mut session, &mut rx).await;

    let state = session.state();
    assert_eq!(state.status, Status::Error);
    assert!(state
        .last_error
        .as_deref()
        .unwrap()
        .contains("connection reset"));

    // current_view still serves the earlier successful result.
    let view = session.current_view();
    assert_eq!(view.status, Status::Error);
    assert!(view.error_message.is_some());
    assert!(!view.table.rows.is_empty());
    assert!(view.table.columns.contains(&"status".to_string()));
}

#[tokio::test]
async fn error_state_accepts_new_submissions() {
    let (mut session, mut rx) =
        SessionController::new(Arc::new(SelectiveFailClient), &QueryConfig::default());

    session.submit_query("boom").unwrap();
    settle(&mut session, &mut rx).await;
    assert_eq!(session.state().status, Status::Error);

    // Retry is just resubmission; the error state never wedges the session.
    session.submit_query("status:200").unwrap();
    assert_eq!(session.state().status, Status::Running);
    settle(&mut session, &mut rx).await;
    assert_eq!(session.state().status, Status::Idle);
    assert!(session.state().last_error.is_none());
}

#[tokio::test]
async fn view_applies_display_caps_to_wide_documents() {
    let (mut session, mut rx) =
        SessionController::new(Arc::new(WideDocClient), &QueryConfig::default());

    session.submit_query("anything").unwrap();
    settle(&mut session, &mut rx).await;

    let view = session.current_view();
    assert_eq!(view.table.columns.len(), MAX_COLUMNS);
    for row in &view.table.rows {
        assert_eq!(row.len(), MAX_COLUMNS);
        for cell in row {
            assert!(cell.chars().count() <= MAX_CELL_WIDTH);
        }
    }

    // The raw result is untouched by display capping.
    let result = session.state().current_result.as_ref().unwrap();
    assert_eq!(result.columns.len(), 27); // _id + _index + 25 fields
}

#[tokio::test]
async fn empty_query_issues_no_request() {
    let client = Arc::new(MockSearchClient::new());
    let (mut session, _rx) = SessionController::new(client.clone(), &QueryConfig::default());

    let err = session.submit_query("   ").unwrap_err();
    assert!(matches!(err, ScryError::EmptyQuery));
    assert_eq!(client.filter_calls(), 0);
    assert_eq!(client.pipeline_calls(), 0);
    assert_eq!(session.state().status, Status::Idle);
}
