//! Integration tests for the gateway facade.
//!
//! Runs authorize and capture end-to-end against a mock gateway over real HTTP.

use aim_gateway::{
    CardRecord, Gateway, GatewayConfig, ResponseStatus, TransactionRecord,
    gateway::MALFORMED_RESPONSE_REASON, response::MIN_FIELDS,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

const ENDPOINT_PATH: &str = "/gateway/transact.dll";

/// Builds a quoted, pipe-delimited gateway body.
fn gateway_body(values: &[(usize, &str)]) -> String {
    let mut fields = vec!["\"\"".to_owned(); MIN_FIELDS];
    for (position, value) in values {
        fields[*position] = format!("\"{value}\"");
    }
    fields.join("|")
}

fn approved_body() -> String {
    gateway_body(&[
        (0, "1"),
        (1, "1"),
        (2, "1"),
        (3, "This transaction has been approved."),
        (4, "AUTH123"),
        (5, "Y"),
        (6, "TX789"),
        (9, "5.56"),
        (11, "auth_only"),
        (32, "tax0"),
        (37, "md5hash"),
        (38, "M"),
    ])
}

fn gateway_for(server: &MockServer) -> Gateway {
    let endpoint = format!("{}{ENDPOINT_PATH}", server.uri());
    let config = GatewayConfig::new(&endpoint, "api-login", "tx-key", true, -1)
        .expect("mock server URI should be a valid endpoint");
    Gateway::new(config).expect("should build HTTP transport")
}

fn test_card() -> CardRecord {
    CardRecord::new("4111111111111111", "123", "11/2030", "visa")
}

fn test_transaction() -> TransactionRecord {
    TransactionRecord {
        invoice_number: "123".to_owned(),
        amount: "5.56".to_owned(),
        description: "My Test transaction".to_owned(),
        ..Default::default()
    }
}

async fn received_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.expect("request recording is enabled");
    let last = requests.last().expect("gateway should have received a request");
    String::from_utf8(last.body.clone()).expect("form body is UTF-8")
}

#[tokio::test]
async fn test_authorize_approved_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_string_contains("x_type=AUTH_ONLY"))
        .and(body_string_contains("x_login=api-login"))
        .and(body_string_contains("x_tran_key=tx-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(approved_body()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway.authorize(&test_card(), &test_transaction(), false).await;

    assert!(response.is_approved);
    assert_eq!(response.status(), ResponseStatus::Approved);
    assert_eq!(response.transaction_id, "TX789");
    assert_eq!(response.auth_code, "AUTH123");
    assert_eq!(response.amount, "5.56");
    assert_eq!(response.cvv_response, "M");
    assert_eq!(response.raw_data, approved_body());
}

#[tokio::test]
async fn test_authorize_form_body_contents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(approved_body()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let _ = gateway.authorize(&test_card(), &test_transaction(), true).await;

    let body = received_body(&server).await;
    for expected in [
        "x_method=CC",
        "x_version=3.1",
        "x_delim_data=TRUE",
        "x_delim_char=%7C",
        "x_encap_char=%22",
        "x_relay_response=FALSE",
        "x_duplicate_window=120",
        "x_email_customer=TRUE",
        "x_card_num=4111111111111111",
        "x_card_code=123",
        "x_exp_date=11%2F2030",
        "x_invoice_num=123",
        "x_amount=5.56",
        "x_description=My+Test+transaction",
        "x_test_request=TRUE",
    ] {
        assert!(body.contains(expected), "missing {expected} in {body}");
    }
    assert!(!body.contains("x_ship_to"), "empty fields must not be sent: {body}");
}

#[tokio::test]
async fn test_authorize_declined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(gateway_body(&[
            (0, "2"),
            (2, "2"),
            (3, "This transaction has been declined."),
            (6, "TX790"),
        ])))
        .mount(&server)
        .await;

    let response = gateway_for(&server).authorize(&test_card(), &test_transaction(), false).await;

    assert!(!response.is_approved);
    assert_eq!(response.status(), ResponseStatus::Declined);
    assert_eq!(response.reason_text, "This transaction has been declined.");
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(approved_body()))
        .mount(&server)
        .await;

    let response = gateway_for(&server).authorize(&test_card(), &test_transaction(), false).await;

    assert!(!response.is_approved);
    assert_eq!(response.reason_text, "Payment gateway returned an error.");
    assert!(response.raw_data.is_empty());
}

#[tokio::test]
async fn test_unreachable_gateway() {
    let config = GatewayConfig::new("http://127.0.0.1:1/gateway/transact.dll", "l", "k", true, -1)
        .expect("valid endpoint");
    let gateway = Gateway::new(config).expect("should build HTTP transport");

    let response = gateway.capture_preauth("TX789", "").await;

    assert!(!response.is_approved);
    assert_eq!(response.reason_text, "Failed to connect to payment gateway.");
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let response = gateway_for(&server).capture_preauth("TX789", "").await;

    assert!(!response.is_approved);
    assert_eq!(response.reason_text, MALFORMED_RESPONSE_REASON);
    assert_eq!(response.raw_data, "<html>maintenance</html>");
}

#[tokio::test]
async fn test_capture_without_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("x_type=PRIOR_AUTH_CAPTURE"))
        .and(body_string_contains("x_trans_id=TX789"))
        .respond_with(ResponseTemplate::new(200).set_body_string(approved_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway_for(&server).capture_preauth("TX789", "").await;
    assert!(response.is_approved);

    let body = received_body(&server).await;
    assert!(!body.contains("x_amount"), "full capture must not send an amount: {body}");
    assert!(!body.contains("x_card_num"));
}

#[tokio::test]
async fn test_capture_partial_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("x_trans_id=TX789"))
        .and(body_string_contains("x_amount=2.00"))
        .respond_with(ResponseTemplate::new(200).set_body_string(approved_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway_for(&server).capture_preauth("TX789", "2.00").await;
    assert!(response.is_approved);
}

#[tokio::test]
async fn test_authorize_then_capture() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("x_type=AUTH_ONLY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(approved_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("x_type=PRIOR_AUTH_CAPTURE"))
        .and(body_string_contains("x_trans_id=TX789"))
        .respond_with(ResponseTemplate::new(200).set_body_string(gateway_body(&[
            (0, "1"),
            (6, "TX789"),
            (11, "prior_auth_capture"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let auth = gateway.authorize(&test_card(), &test_transaction(), false).await;
    assert!(auth.is_approved);

    let capture = gateway.capture_preauth(&auth.transaction_id, "").await;
    assert!(capture.is_approved);
    assert_eq!(capture.transaction_type, "prior_auth_capture");
}

#[tokio::test]
async fn test_concurrent_requests_share_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(approved_body()))
        .expect(4)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let card = test_card();
    let txn = test_transaction();

    let (a, b, c, d) = tokio::join!(
        gateway.authorize(&card, &txn, false),
        gateway.capture_preauth("TX1", ""),
        gateway.capture_preauth("TX2", "1.00"),
        gateway.authorize(&card, &txn, true),
    );
    assert!(a.is_approved && b.is_approved && c.is_approved && d.is_approved);
}
