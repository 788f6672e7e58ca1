use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ost_sdk::auth::{Credentials, FixedTimestamp, signature};
use ost_sdk::error::error_codes;
use ost_sdk::params::QueryParams;
use ost_sdk::rest::{Envelope, HttpMethod, OstClient, OstRequestExt};

const TIMESTAMP: i64 = 1_700_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build_client(server: &MockServer) -> OstClient {
    init_tracing();
    OstClient::builder()
        .api_key("test_key")
        .api_secret("test_secret")
        .api_endpoint(format!("{}/v1.1/", server.uri()))
        .timestamp_provider(Arc::new(FixedTimestamp(TIMESTAMP)))
        .build()
        .unwrap()
}

fn expected_signature(resource: &str, canonical: &str) -> String {
    let credentials = Credentials::new("test_key", "test_secret").unwrap();
    signature(&credentials, resource, canonical).unwrap()
}

#[tokio::test]
async fn test_get_sends_signed_query() {
    let server = MockServer::start().await;
    let canonical = format!("name=Alice+Doe&api_key=test_key&request_timestamp={TIMESTAMP}");
    let sig = expected_signature("/users", &canonical);

    Mock::given(method("GET"))
        .and(path("/v1.1/users"))
        .and(query_param("name", "Alice Doe"))
        .and(query_param("api_key", "test_key"))
        .and(query_param("signature", sig.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"result_type": "users", "users": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let data = client
        .get("/users", QueryParams::new().with("name", "Alice Doe"))
        .await
        .unwrap();

    assert_eq!(data["result_type"], "users");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some(format!("{canonical}&signature={sig}").as_str())
    );
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_post_sends_signed_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1.1/transactions"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("from_user_id=u1"))
        .and(body_string_contains("amount=0.01"))
        .and(body_string_contains("&signature="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"result_type": "transaction", "transaction": {"id": "t-1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let params = QueryParams::new()
        .with("from_user_id", "u1")
        .with("to_user_id", "u2")
        .with("amount", 0.01);
    let data = client.post("/transactions", params).await.unwrap();

    assert_eq!(data["transaction"]["id"], "t-1");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let canonical = format!(
        "from_user_id=u1&to_user_id=u2&amount=0.01&api_key=test_key&request_timestamp={TIMESTAMP}"
    );
    let sig = expected_signature("/transactions", &canonical);
    assert_eq!(body, format!("{canonical}&signature={sig}"));
}

#[tokio::test]
async fn test_user_agent_header() {
    let server = MockServer::start().await;
    let user_agent = format!("ost-sdk-rs {}", env!("CARGO_PKG_VERSION"));

    Mock::given(method("GET"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"data":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert!(client.get("/actions", QueryParams::new()).await.is_ok());
}

#[tokio::test]
async fn test_array_params_use_brackets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"data":{}}"#))
        .mount(&server)
        .await;

    let client = build_client(&server);
    client
        .get("/users", QueryParams::new().with("id", vec!["a", "b"]))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(query.starts_with("id[]=a&id[]=b&api_key=test_key"));
}

#[tokio::test]
async fn test_server_failure_is_err() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": false,
        "err": {
            "code": "BAD_REQUEST",
            "internal_id": "s_a_g_1",
            "msg": "At least one parameter is invalid or missing.",
            "error_data": [{"parameter": "amount", "msg": "Amount should be a valid number"}]
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1.1/transactions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .post("/transactions", QueryParams::new().with("amount", "abcd"))
        .await
        .unwrap_err();

    assert_eq!(err.code, error_codes::BAD_REQUEST);
    assert_eq!(err.internal_id, "s_a_g_1");
    assert_eq!(err.error_fields(), vec!["amount"]);
    assert!(!err.is_sdk_generated());
}

#[tokio::test]
async fn test_status_codes_without_body() {
    let cases = [
        (400, error_codes::BAD_REQUEST),
        (429, error_codes::TOO_MANY_REQUESTS),
        (502, error_codes::BAD_GATEWAY),
        (503, error_codes::SERVICE_UNAVAILABLE),
        (504, error_codes::GATEWAY_TIMEOUT),
        (418, error_codes::SOMETHING_WENT_WRONG),
    ];

    for (status, code) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = build_client(&server);
        let err = client.get("/users", QueryParams::new()).await.unwrap_err();

        assert_eq!(err.code, code, "status {status}");
        assert_eq!(err.internal_id, format!("SDK({code})"));
        assert!(err.msg.is_empty());
        assert!(err.error_data.is_empty());
    }
}

#[tokio::test]
async fn test_malformed_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get("/users", QueryParams::new()).await.unwrap_err();

    assert_eq!(err.code, error_codes::SOMETHING_WENT_WRONG);
    assert_eq!(err.msg, "Response parsing error");
}

#[tokio::test]
async fn test_transport_failure_is_normalized() {
    init_tracing();
    // Nothing listens on port 1.
    let client = OstClient::builder()
        .api_key("test_key")
        .api_secret("test_secret")
        .api_endpoint("http://127.0.0.1:1")
        .build()
        .unwrap();

    let envelope = client
        .send(HttpMethod::Post, "/users", QueryParams::new())
        .await;

    match envelope {
        Envelope::Failure { err } => {
            assert_eq!(err.code, error_codes::SOMETHING_WENT_WRONG);
            assert_eq!(err.internal_id, "SDK(SOMETHING_WENT_WRONG)");
        }
        Envelope::Success { .. } => panic!("expected a failure envelope"),
    }
}

#[tokio::test]
async fn test_timeout_is_opt_in_and_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success":true,"data":{}}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = OstClient::builder()
        .api_key("test_key")
        .api_secret("test_secret")
        .api_endpoint(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.get("/users", QueryParams::new()).await.unwrap_err();
    assert_eq!(err.code, error_codes::SOMETHING_WENT_WRONG);
}

#[tokio::test]
async fn test_typed_helper_against_server() {
    #[derive(Debug, serde::Deserialize)]
    struct ActionList {
        result_type: String,
        actions: Vec<serde_json::Value>,
    }

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/actions"))
        .and(query_param("arbitrary_amount", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"result_type": "actions", "actions": [{"id": 1}]}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let params = QueryParams::from_json(serde_json::json!({
        "page_no": 1,
        "limit": 100,
        "arbitrary_amount": true
    }))
    .unwrap();
    let list: ActionList = client.get_as("/actions", params).await.unwrap();

    assert_eq!(list.result_type, "actions");
    assert_eq!(list.actions.len(), 1);
}
