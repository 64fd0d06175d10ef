//! Dialect classification and adapter translation tests.
//!
//! Covers the router's structural classification and the request shapes each
//! adapter produces from the same session-level inputs.

use pretty_assertions::assert_eq;

use scry::config::QueryConfig;
use scry::query::filter::FilterAdapter;
use scry::query::pipeline::PipelineAdapter;
use scry::query::{Dialect, OffsetCursor, Query};
use scry::time_range::{TimePreset, TimeBounds};

#[test]
fn classifies_field_comparison_as_filter() {
    let query = Query::classify("status:200 AND method:GET").unwrap();
    assert_eq!(query.dialect, Dialect::Filter);
    assert_eq!(query.raw_text, "status:200 AND method:GET");
}

#[test]
fn classifies_piped_source_as_pipeline() {
    let query = Query::classify("FROM logs | STATS avg(response_time) BY host").unwrap();
    assert_eq!(query.dialect, Dialect::Pipeline);
}

#[test]
fn ambiguous_strings_default_to_filter() {
    // Neither a leading pipeline keyword nor a plain field comparison.
    for raw in ["error timeout", "host:web* OR level:warn", "\"FROM\"", "a | b"] {
        let query = Query::classify(raw).unwrap();
        assert_eq!(query.dialect, Dialect::Filter, "misclassified: {raw}");
    }
}

#[test]
fn empty_input_never_becomes_a_query() {
    assert!(Query::classify("").is_err());
    assert!(Query::classify("  \t ").is_err());
}

#[test]
fn filter_adapter_carries_cursor_into_request() {
    let config = QueryConfig {
        default_index: "logs-*".to_string(),
        ..Default::default()
    };
    let adapter = FilterAdapter::new(&config);
    let cursor = OffsetCursor {
        offset: 200,
        page_size: 100,
    };

    let request = adapter.build_request("status:500", &cursor, None);
    assert_eq!(request.index_pattern, "logs-*");
    assert_eq!(request.expression, "status:500");
    assert_eq!(request.offset, 200);
    assert_eq!(request.limit, 100);
}

#[test]
fn pipeline_adapter_splices_time_window() {
    let adapter = PipelineAdapter::new(&QueryConfig::default());
    let bounds = TimePreset::Last1Hour.bounds();

    let request = adapter.build_request("FROM logs | LIMIT 10", Some(bounds.clone()));
    assert!(request.query.contains("WHERE @timestamp >="));
    assert!(request.query.contains(&bounds.start));
    assert!(request.query.contains(&bounds.end));
    assert!(request.query.ends_with("| LIMIT 10"));
}

#[test]
fn pipeline_adapter_keeps_query_without_bounds() {
    let adapter = PipelineAdapter::new(&QueryConfig::default());
    let request = adapter.build_request("FROM logs | LIMIT 10", None);
    assert_eq!(request.query, "FROM logs | LIMIT 10");
}

#[test]
fn time_bounds_are_well_formed() {
    let TimeBounds { start, end } = TimePreset::Last24Hours.bounds();
    // RFC 3339 with millisecond precision and a Z suffix.
    for stamp in [&start, &end] {
        assert_eq!(stamp.len(), "2024-01-01T00:00:00.000Z".len());
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[10..11], "T");
    }
    assert!(start < end);
}
