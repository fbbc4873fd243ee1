//! Test harness wrapping a mock EasySlip API.
//!
//! The `TestApi` starts an `httpmock` server per test and hands out verifiers
//! already pointed at it with a known bearer token.

use easyslip_node::{ApiConfig, SlipVerifier, StaticCredentials};
use httpmock::MockServer;
use serde_json::{json, Value};
use std::sync::Arc;

/// Token every harness verifier authenticates with.
pub const TEST_TOKEN: &str = "test-access-token";

/// `Authorization` header value the mock expects.
pub const BEARER: &str = "Bearer test-access-token";

/// A mock EasySlip API.
pub struct TestApi {
    /// The underlying mock server.
    pub server: MockServer,
}

impl TestApi {
    /// Start a fresh mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    /// API settings pointing at the mock server.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.server.base_url(),
            timeout_secs: 5,
        }
    }

    /// Verifier bound to the mock server.
    pub fn verifier(&self) -> SlipVerifier {
        SlipVerifier::http(
            &self.api_config(),
            Arc::new(StaticCredentials::new(TEST_TOKEN)),
        )
        .expect("verifier")
    }
}

/// Verifier pointed at a local port with nothing listening on it.
pub fn unreachable_verifier() -> SlipVerifier {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port")
        .port();
    SlipVerifier::http(
        &ApiConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            timeout_secs: 5,
        },
        Arc::new(StaticCredentials::new(TEST_TOKEN)),
    )
    .expect("verifier")
}

/// A verified bank slip body as the API returns it.
pub fn slip_body(bank_id: &str, receiver_name_th: &str) -> Value {
    json!({
        "status": 200,
        "data": {
            "payload": "00460006000001010300402150152024112500000000",
            "transRef": "015073144041ATF00999",
            "date": "2024-03-13T14:40:41+07:00",
            "amount": { "amount": 1000, "local": { "amount": 0, "currency": "" } },
            "sender": {
                "bank": { "id": "004", "name": "ธนาคารกสิกรไทย", "short": "KBANK" },
                "account": { "name": { "th": "นาย ผู้โอน ทดสอบ", "en": "MR. SENDER TEST" } }
            },
            "receiver": {
                "bank": { "id": bank_id, "name": "", "short": "" },
                "account": { "name": { "th": receiver_name_th, "en": "MR. SOMCHAI DEE" } }
            }
        }
    })
}

/// The 400 body the API sends for an already verified slip.
pub fn duplicate_body(bank_id: &str, receiver_name_th: &str) -> Value {
    let mut body = slip_body(bank_id, receiver_name_th);
    body["status"] = json!(400);
    body["message"] = json!("duplicate_slip");
    body
}

/// A verified TrueMoney wallet body.
pub fn wallet_body() -> Value {
    json!({
        "status": 200,
        "data": {
            "transactionId": "50021249861829",
            "date": "2024-03-13T14:40:41+07:00",
            "amount": 150,
            "sender": { "name": "ผู้โอน ทดสอบ" },
            "receiver": { "name": "ผู้รับ ทดสอบ", "phone": "xxx-xxx-1234" }
        }
    })
}
