mod common;

use common::{FakeFetcher, FakeWhois, Fakes};
use reconsight::domain::lookups::LookupError;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_full_scan_success() {
    let server = common::default_server();

    let response = server
        .post("/api/scan")
        .json(&json!({ "url": "www.example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["target"]["absoluteUrl"], "https://www.example.com");
    assert_eq!(json["target"]["hostname"], "www.example.com");
    assert_eq!(json["target"]["registrableDomain"], "example.com");

    for slot in ["dns", "whois", "headers", "social"] {
        assert_eq!(json[slot]["status"], "success", "slot {slot}");
    }

    assert_eq!(json["dns"]["data"]["records"]["A"], json!(["93.184.216.34"]));
    assert_eq!(json["whois"]["data"]["rootDomain"], "example.com");
    assert_eq!(json["headers"]["data"]["statusCode"], 200);
    assert_eq!(json["social"]["data"]["emails"], json!(["hello@acme.test"]));
}

#[tokio::test]
async fn test_full_scan_isolates_failures() {
    let fakes = Fakes {
        whois: Arc::new(FakeWhois::answering(Err(LookupError::Timeout(
            std::time::Duration::from_secs(1),
        )))),
        fetcher: Arc::new(FakeFetcher::unreachable()),
        ..Fakes::default()
    };
    let server = common::test_server(&fakes, &common::test_config());

    let response = server
        .post("/api/scan")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["dns"]["status"], "success");
    assert_eq!(
        json["whois"],
        json!({ "status": "failure", "error": "Failed to retrieve WHOIS data" })
    );
    assert_eq!(
        json["headers"]["error"],
        "Unable to reach the target (timeout or TLS error)"
    );
    assert_eq!(json["social"]["error"], "Social scan failed");
}

#[tokio::test]
async fn test_full_scan_invalid_url() {
    let server = common::default_server();

    let response = server
        .post("/api/scan")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_full_scan_is_not_limited_itself() {
    let mut config = common::test_config();
    config.scan_rate_limit = 1;
    config.whois_rate_limit = 1;
    let server = common::test_server(&Fakes::default(), &config);

    server
        .post("/api/scan")
        .json(&json!({ "url": "example.com" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/scan")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["dns"]["error"], "Too many DNS requests, please wait");
    assert_eq!(json["whois"]["error"], "Too many WHOIS requests, please wait");
    assert_eq!(json["headers"]["error"], "Too many Headers requests, please wait");
    assert_eq!(json["social"]["error"], "Too many Social requests, please wait");
}

#[tokio::test]
async fn test_full_scan_shares_quota_with_single_endpoints() {
    let fakes = Fakes::default();
    let mut config = common::test_config();
    config.whois_rate_limit = 1;
    let server = common::test_server(&fakes, &config);

    server
        .post("/api/scan/whois")
        .add_header("x-forwarded-for", "198.51.100.9")
        .json(&json!({ "url": "example.com" }))
        .await
        .assert_status_ok();

    let json = server
        .post("/api/scan")
        .add_header("x-forwarded-for", "198.51.100.9")
        .json(&json!({ "url": "example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["whois"]["status"], "failure");
    assert_eq!(json["dns"]["status"], "success");
    assert_eq!(fakes.whois.queries().len(), 1);
}
