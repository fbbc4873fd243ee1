//! Output routing over HTTP: filters, duplicate slips, failure policy.

use super::{duplicate_body, slip_body, unreachable_verifier, wallet_body, TestApi};
use easyslip_node::{
    BinaryData, Error, InputItem, ItemParameters, OutputChannel, RunOptions,
};
use httpmock::prelude::*;
use serde_json::json;

fn indices(items: &[easyslip_node::RoutedItem]) -> Vec<usize> {
    items.iter().map(|item| item.original_index).collect()
}

#[tokio::test]
async fn test_mixed_filters_route_by_receiver() {
    let api = TestApi::start().await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "kbank-somchai");
            then.status(200).json_body(slip_body("004", "นาย สมชาย ใจดี"));
        })
        .await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "scb-somchai");
            then.status(200).json_body(slip_body("014", "นาย สมชาย ใจดี"));
        })
        .await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "kbank-other");
            then.status(200).json_body(slip_body("004", "นาง สมหญิง"));
        })
        .await;

    let filtered = |payload: &str| {
        InputItem::new(
            ItemParameters::payload(payload)
                .with_receiver_bank("004")
                .with_receiver_name("สมชาย"),
        )
    };
    let items = vec![
        filtered("kbank-somchai"),
        filtered("scb-somchai"),
        filtered("kbank-other"),
        InputItem::new(ItemParameters::payload("kbank-other")),
    ];

    let report = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    assert!(report.filtering_requested);
    assert_eq!(indices(&report.outputs.matched), vec![0, 3]);
    assert_eq!(indices(&report.outputs.not_matched), vec![1, 2]);
    assert!(report
        .outputs
        .not_matched
        .iter()
        .all(|item| item.output == OutputChannel::NotMatched));
}

#[tokio::test]
async fn test_duplicate_slip_is_a_result() {
    let api = TestApi::start().await;
    api.server
        .mock_async(|when, then| {
            when.method(POST).path("/verify");
            then.status(400).json_body(duplicate_body("004", "บริษัท ไทย จำกัด"));
        })
        .await;

    let matching = InputItem::new(
        ItemParameters::url("https://cdn.example.com/a.jpg")
            .with_check_duplicate(true)
            .with_receiver_name("ไทย"),
    );
    let rejecting = InputItem::new(
        ItemParameters::url("https://cdn.example.com/a.jpg")
            .with_check_duplicate(true)
            .with_receiver_bank("SCB"),
    );

    let report = api
        .verifier()
        .run(&[matching, rejecting], RunOptions::default())
        .await
        .expect("duplicates never abort");

    assert_eq!(indices(&report.outputs.matched), vec![0]);
    assert_eq!(indices(&report.outputs.not_matched), vec![1]);
    assert_eq!(
        report.outputs.matched[0].json["message"],
        json!("duplicate_slip")
    );
}

#[tokio::test]
async fn test_duplicate_wallet_slip_is_matched() {
    let api = TestApi::start().await;
    api.server
        .mock_async(|when, then| {
            when.method(POST).path("/verify/truewallet");
            then.status(400)
                .json_body(json!({ "status": 400, "message": "duplicate_slip" }));
        })
        .await;

    let items = vec![InputItem::new(ItemParameters::wallet_image("data"))
        .with_binary("data", BinaryData::new(b"wallet".to_vec()))];
    let report = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    assert_eq!(report.outputs.matched.len(), 1);
    assert!(report.outputs.not_matched.is_empty());
}

#[tokio::test]
async fn test_no_filters_leaves_not_matched_empty() {
    let api = TestApi::start().await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify");
            then.status(200).json_body(slip_body("014", "x"));
        })
        .await;
    api.server
        .mock_async(|when, then| {
            when.method(POST).path("/verify/truewallet");
            then.status(200).json_body(wallet_body());
        })
        .await;

    let items = vec![
        InputItem::new(ItemParameters::payload("a")),
        InputItem::new(ItemParameters::wallet_image("data"))
            .with_binary("data", BinaryData::new(b"w".to_vec())),
        InputItem::new(ItemParameters::payload("b")),
    ];
    let report = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    assert!(!report.filtering_requested);
    assert_eq!(indices(&report.outputs.matched), vec![0, 1, 2]);
    assert!(report.outputs.not_matched.is_empty());
}

#[tokio::test]
async fn test_api_errors_recorded_with_continue_on_fail() {
    let api = TestApi::start().await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "bad");
            then.status(400)
                .json_body(json!({ "status": 400, "message": "invalid_payload" }));
        })
        .await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "down");
            then.status(502).body("upstream unavailable");
        })
        .await;
    api.server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "good");
            then.status(200).json_body(slip_body("004", "x"));
        })
        .await;

    let items = vec![
        InputItem::new(ItemParameters::payload("bad")),
        InputItem::new(ItemParameters::payload("down")),
        InputItem::new(ItemParameters::image("missing")),
        InputItem::new(ItemParameters::payload("good")),
    ];
    let report = api
        .verifier()
        .run(
            &items,
            RunOptions {
                continue_on_fail: true,
            },
        )
        .await
        .expect("run");

    assert_eq!(indices(&report.outputs.matched), vec![0, 1, 2, 3]);
    let matched = &report.outputs.matched;
    assert_eq!(
        matched[0].json,
        json!({ "error": "Request failed with status code 400: invalid_payload" })
    );
    assert_eq!(
        matched[1].json,
        json!({ "error": "Request failed with status code 502: Bad Gateway" })
    );
    assert_eq!(
        matched[2].json,
        json!({ "error": "No binary data found in property \"missing\"" })
    );
    assert_eq!(matched[3].json, slip_body("004", "x"));
}

#[tokio::test]
async fn test_failure_aborts_remaining_items() {
    let api = TestApi::start().await;
    let first = api
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "first");
            then.status(200).json_body(slip_body("004", "x"));
        })
        .await;
    let failing = api
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "second");
            then.status(401).json_body(json!({ "status": 401, "message": "unauthorized" }));
        })
        .await;
    let never = api
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/verify").query_param("payload", "third");
            then.status(200).json_body(slip_body("004", "x"));
        })
        .await;

    let items = vec![
        InputItem::new(ItemParameters::payload("first")),
        InputItem::new(ItemParameters::payload("second")),
        InputItem::new(ItemParameters::payload("third")),
    ];
    let err = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect_err("run aborts");

    assert_eq!(err.item_index(), Some(1));
    match err {
        Error::ItemFailed { source, .. } => {
            assert!(matches!(*source, Error::Transport { status: 401, .. }));
        }
        other => unreachable!("unexpected error {other:?}"),
    }
    first.assert_async().await;
    failing.assert_async().await;
    never.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_connection_failure_recorded_with_continue_on_fail() {
    let items = vec![
        InputItem::new(ItemParameters::payload("p")),
        InputItem::new(ItemParameters::image("missing")),
    ];
    let report = unreachable_verifier()
        .run(
            &items,
            RunOptions {
                continue_on_fail: true,
            },
        )
        .await
        .expect("run");

    assert_eq!(indices(&report.outputs.matched), vec![0, 1]);
    assert!(report.outputs.not_matched.is_empty());
    let error = report.outputs.matched[0].json["error"]
        .as_str()
        .expect("error message");
    assert!(!error.is_empty());
    assert_eq!(
        report.outputs.matched[1].json,
        json!({ "error": "No binary data found in property \"missing\"" })
    );
}

#[tokio::test]
async fn test_connection_failure_aborts_run() {
    let items = vec![
        InputItem::new(ItemParameters::url("https://cdn.example.com/a.jpg")),
        InputItem::new(ItemParameters::payload("p")),
    ];
    let err = unreachable_verifier()
        .run(&items, RunOptions::default())
        .await
        .expect_err("run aborts");

    assert_eq!(err.item_index(), Some(0));
    match err {
        Error::ItemFailed { source, .. } => assert!(matches!(*source, Error::Http(_))),
        other => unreachable!("unexpected error {other:?}"),
    }
}
