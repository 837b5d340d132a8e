mod common;

use chrono::{NaiveDate, Utc};
use common::MockFetcher;
use tracker_app::change::{format_change, percent_change, StyleTag};
use tracker_app::summary::{build_summary, NotFoundView, SummaryError, SummaryOutcome};
use tracker_app::AppConfig;

#[tokio::test]
async fn two_day_series_end_to_end() {
    let fetcher = MockFetcher::with_closes(&[150.00, 153.00], Some("Apple Inc."));

    let outcome = build_summary(&fetcher, &AppConfig::default(), "AAPL").await.unwrap();
    let SummaryOutcome::Summary(view) = outcome else {
        panic!("expected a summary");
    };

    assert_eq!(view.close_text(), "153.0");
    assert_eq!(view.change_text, "+2.0%");
    assert_eq!(view.style, StyleTag::Gain);
    assert_eq!(view.title(), "Apple Inc. (AAPL)");
    assert_eq!(view.series.len(), 2);
}

#[tokio::test]
async fn lowercase_and_uppercase_issue_the_same_request() {
    let fetcher = MockFetcher::with_closes(&[1.0, 2.0], None);
    let config = AppConfig::default();

    build_summary(&fetcher, &config, "aapl").await.unwrap();
    build_summary(&fetcher, &config, "AAPL").await.unwrap();

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].ticker, "AAPL");
    assert_eq!(requests[0].ticker, requests[1].ticker);
    assert_eq!(requests[0].start, requests[1].start);
}

#[tokio::test]
async fn window_starts_in_2017_and_ends_now() {
    let fetcher = MockFetcher::with_closes(&[1.0, 2.0], None);
    let before = Utc::now();

    build_summary(&fetcher, &AppConfig::default(), "msft").await.unwrap();

    let request = &fetcher.requests()[0];
    assert_eq!(request.start, NaiveDate::from_ymd_opt(2017, 1, 1).unwrap());
    assert!(request.end >= before && request.end <= Utc::now());
}

#[tokio::test]
async fn empty_series_reports_the_uppercased_ticker() {
    for input in ["zzzz", "ZzZz", "ZZZZ"] {
        let outcome = build_summary(&MockFetcher::empty(), &AppConfig::default(), input)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SummaryOutcome::NotFound(NotFoundView {
                ticker: "ZZZZ".into()
            })
        );
    }
}

#[tokio::test]
async fn blank_input_does_not_fetch() {
    let fetcher = MockFetcher::with_closes(&[1.0, 2.0], None);
    let outcome = build_summary(&fetcher, &AppConfig::default(), "   ").await.unwrap();
    assert_eq!(outcome, SummaryOutcome::NotFound(NotFoundView { ticker: String::new() }));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn displayed_change_matches_the_last_two_closes() {
    let closes = [101.37, 99.12, 98.4, 102.55, 101.9];
    let fetcher = MockFetcher::with_closes(&closes, None);

    let outcome = build_summary(&fetcher, &AppConfig::default(), "IBM").await.unwrap();
    let SummaryOutcome::Summary(view) = outcome else {
        panic!("expected a summary");
    };

    let (text, style) = format_change(percent_change(102.55, 101.9));
    assert_eq!(view.change_text, text);
    assert_eq!(view.style, style);
    assert_eq!(view.style, StyleTag::Loss);
    assert_eq!(view.close_text(), "101.9");
}

#[tokio::test]
async fn failures_surface_as_errors() {
    let err = build_summary(&MockFetcher::failing(), &AppConfig::default(), "AAPL")
        .await
        .unwrap_err();
    assert!(matches!(err, SummaryError::Fetch(_)));
    assert!(err.to_string().contains("timed out"));

    let err = build_summary(
        &MockFetcher::with_closes(&[42.0], None),
        &AppConfig::default(),
        "NEWCO",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SummaryError::InsufficientData { bars: 1, .. }));
}
