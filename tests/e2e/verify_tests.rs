//! Request shape tests: one per verification mode.

use super::{slip_body, wallet_body, TestApi, BEARER};
use easyslip_node::{BinaryData, InputItem, ItemParameters, OutputChannel, RunOptions};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_verify_by_payload_sends_query() {
    let api = TestApi::start().await;
    let mock = api
        .server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/verify")
                .query_param("payload", "00020101021229370016A000000677010111")
                .query_param("checkDuplicate", "false")
                .header("authorization", BEARER);
            then.status(200).json_body(slip_body("004", "นาย สมชาย"));
        })
        .await;

    let items = vec![InputItem::new(ItemParameters::payload(
        "00020101021229370016A000000677010111",
    ))];
    let report = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    mock.assert_async().await;
    assert_eq!(report.outputs.matched.len(), 1);
    assert!(report.outputs.not_matched.is_empty());
    assert_eq!(report.outputs.matched[0].json, slip_body("004", "นาย สมชาย"));
}

#[tokio::test]
async fn test_verify_by_base64_posts_json() {
    let api = TestApi::start().await;
    let mock = api
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/verify")
                .header("authorization", BEARER)
                .header("content-type", "application/json")
                .json_body(json!({ "image": "aGVsbG8gc2xpcA==", "checkDuplicate": true }));
            then.status(200).json_body(slip_body("014", "x"));
        })
        .await;

    let items = vec![InputItem::new(
        ItemParameters::base64("aGVsbG8gc2xpcA==").with_check_duplicate(true),
    )];
    api.verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_by_url_posts_json() {
    let api = TestApi::start().await;
    let mock = api
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/verify")
                .header("authorization", BEARER)
                .json_body(json!({ "url": "https://cdn.example.com/slip.jpg", "checkDuplicate": false }));
            then.status(200).json_body(slip_body("014", "x"));
        })
        .await;

    let items = vec![InputItem::new(ItemParameters::url(
        "https://cdn.example.com/slip.jpg",
    ))];
    api.verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_by_image_uploads_multipart_with_defaults() {
    let api = TestApi::start().await;
    let mock = api
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/verify")
                .header("authorization", BEARER)
                .header_exists("content-type")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"slip.jpg\"")
                .body_contains("image/jpeg")
                .body_contains("fake-jpeg-bytes")
                .body_contains("name=\"checkDuplicate\"");
            then.status(200).json_body(slip_body("004", "x"));
        })
        .await;

    let items = vec![InputItem::new(ItemParameters::image("data"))
        .with_binary("data", BinaryData::new(b"fake-jpeg-bytes".to_vec()))];
    let report = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    mock.assert_async().await;
    assert_eq!(report.outputs.matched.len(), 1);
}

#[tokio::test]
async fn test_wallet_image_uploads_to_truewallet() {
    let api = TestApi::start().await;
    let mock = api
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/verify/truewallet")
                .header("authorization", BEARER)
                .body_contains("filename=\"wallet.png\"")
                .body_contains("image/png")
                .body_contains("name=\"checkDuplicate\"");
            then.status(200).json_body(wallet_body());
        })
        .await;

    let items = vec![InputItem::new(
        ItemParameters::wallet_image("slip").with_check_duplicate(true),
    )
    .with_binary(
        "slip",
        BinaryData::new(b"fake-png-bytes".to_vec())
            .with_file_name("wallet.png")
            .with_mime_type("image/png"),
    )];
    let report = api
        .verifier()
        .run(&items, RunOptions::default())
        .await
        .expect("run");

    mock.assert_async().await;
    assert_eq!(report.outputs.matched[0].output, OutputChannel::Matched);
    assert_eq!(report.outputs.matched[0].json, wallet_body());
}
