//! Pagination behavior tests.
//!
//! Drives the session through page navigation in both dialects and checks
//! the invariants that distinguish them: server-side fetches per page for
//! filter queries, a single fetch plus client-side windowing for pipeline
//! queries.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use scry::config::QueryConfig;
use scry::es::MockSearchClient;
use scry::query::{Cursor, QueryResult};
use scry::session::{Outcome, SessionController, Status};

fn config(page_size: u64) -> QueryConfig {
    QueryConfig {
        default_size: page_size,
        ..Default::default()
    }
}

async fn settle(
    session: &mut SessionController,
    rx: &mut mpsc::UnboundedReceiver<Outcome<QueryResult>>,
) {
    let outcome = rx.recv().await.expect("bridge closed");
    session.handle_outcome(outcome);
}

fn offset_of(session: &SessionController) -> u64 {
    match session.state().current_cursor {
        Some(Cursor::Offset(cursor)) => cursor.offset,
        other => panic!("Expected offset cursor, got {other:?}"),
    }
}

#[tokio::test]
async fn filter_paging_fetches_each_page() {
    let client = Arc::new(MockSearchClient::with_sizes(250, 0));
    let (mut session, mut rx) = SessionController::new(client.clone(), &config(100));

    session.submit_query("status:200").unwrap();
    settle(&mut session, &mut rx).await;
    assert_eq!(offset_of(&session), 0);
    assert_eq!(client.filter_calls(), 1);

    session.next_page();
    assert_eq!(session.state().status, Status::Running);
    settle(&mut session, &mut rx).await;
    assert_eq!(offset_of(&session), 100);
    assert_eq!(client.filter_calls(), 2);

    // The short last page: 50 of 250 remain.
    session.next_page();
    settle(&mut session, &mut rx).await;
    assert_eq!(offset_of(&session), 200);
    let result = session.state().current_result.as_ref().unwrap();
    assert_eq!(result.rows.len(), 50);
    assert!(!result.has_more);

    // No page beyond the end.
    session.next_page();
    assert_eq!(session.state().status, Status::Idle);
    assert_eq!(client.filter_calls(), 3);
}

#[tokio::test]
async fn filter_paging_round_trips_to_origin() {
    let client = Arc::new(MockSearchClient::with_sizes(250, 0));
    let (mut session, mut rx) = SessionController::new(client, &config(100));

    session.submit_query("status:200").unwrap();
    settle(&mut session, &mut rx).await;

    session.next_page();
    settle(&mut session, &mut rx).await;
    session.previous_page();
    settle(&mut session, &mut rx).await;

    assert_eq!(offset_of(&session), 0);

    // Already at the first page; previous is a no-op without a fetch.
    session.previous_page();
    assert_eq!(session.state().status, Status::Idle);
    assert_eq!(offset_of(&session), 0);
}

#[tokio::test]
async fn filter_offset_stays_page_aligned() {
    let client = Arc::new(MockSearchClient::with_sizes(1_000, 0));
    let (mut session, mut rx) = SessionController::new(client, &config(64));

    session.submit_query("status:200").unwrap();
    settle(&mut session, &mut rx).await;

    for _ in 0..6 {
        session.next_page();
        settle(&mut session, &mut rx).await;
        assert_eq!(offset_of(&session) % 64, 0);
    }
    for _ in 0..3 {
        session.previous_page();
        settle(&mut session, &mut rx).await;
        assert_eq!(offset_of(&session) % 64, 0);
    }
}

#[tokio::test]
async fn pipeline_fetches_exactly_once() {
    let client = Arc::new(MockSearchClient::with_sizes(0, 35));
    let (mut session, mut rx) = SessionController::new(client.clone(), &config(10));

    session
        .submit_query("FROM logs | STATS avg(response_time) BY host")
        .unwrap();
    settle(&mut session, &mut rx).await;
    assert_eq!(client.pipeline_calls(), 1);

    // Walk forward past the end and back past the start.
    for _ in 0..10 {
        session.next_page();
    }
    for _ in 0..10 {
        session.previous_page();
    }

    // Still exactly one network round-trip; every move was a window slide.
    assert_eq!(client.pipeline_calls(), 1);
    assert_eq!(session.state().status, Status::Idle);
}

#[tokio::test]
async fn pipeline_window_clamps_to_buffer() {
    let client = Arc::new(MockSearchClient::with_sizes(0, 35));
    let (mut session, mut rx) = SessionController::new(client, &config(10));

    session.submit_query("FROM logs | LIMIT 100").unwrap();
    settle(&mut session, &mut rx).await;

    let window_start = |session: &SessionController| match session.state().current_cursor {
        Some(Cursor::FullLoad(cursor)) => cursor.window_start,
        other => panic!("Expected full-load cursor, got {other:?}"),
    };

    session.next_page();
    assert_eq!(window_start(&session), 10);
    session.next_page();
    assert_eq!(window_start(&session), 20);
    session.next_page();
    // Clamped to 35 - 10.
    assert_eq!(window_start(&session), 25);
    session.next_page();
    assert_eq!(window_start(&session), 25);

    session.previous_page();
    assert_eq!(window_start(&session), 15);
    session.previous_page();
    session.previous_page();
    assert_eq!(window_start(&session), 0);
}

#[tokio::test]
async fn new_query_resets_pagination() {
    let client = Arc::new(MockSearchClient::with_sizes(500, 0));
    let (mut session, mut rx) = SessionController::new(client, &config(100));

    session.submit_query("status:200").unwrap();
    settle(&mut session, &mut rx).await;
    session.next_page();
    settle(&mut session, &mut rx).await;
    assert_eq!(offset_of(&session), 100);

    // A fresh submission starts from the first page, never a stale cursor.
    session.submit_query("status:500").unwrap();
    settle(&mut session, &mut rx).await;
    assert_eq!(offset_of(&session), 0);
}
