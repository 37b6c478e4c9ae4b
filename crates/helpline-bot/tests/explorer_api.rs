use helpline_bot::explorer::{ExplorerClient, DUMMY_BALANCE};
use helpline_core::HelplineError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADDRESS: &str = "0xabababababababababababababababababababab";

#[tokio::test]
async fn test_balance_queries_account_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "account"))
        .and(query_param("action", "balance"))
        .and(query_param("address", ADDRESS))
        .and(query_param("apikey", "key-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "1",
            "message": "OK",
            "result": "123450000000000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExplorerClient::new(server.uri(), Some("key-1".to_string()));
    let balance = client.balance(ADDRESS).await.unwrap();
    assert_eq!(balance, "123450000000000000");
}

#[tokio::test]
async fn test_keyless_client_reports_dummy_without_network() {
    // Unroutable base URL: any network attempt would fail the lookup.
    let client = ExplorerClient::new("http://127.0.0.1:9", None);
    let balance = client.balance(ADDRESS).await.unwrap();
    assert_eq!(balance, DUMMY_BALANCE);
}

#[tokio::test]
async fn test_rejected_lookup_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Invalid API Key"
        })))
        .mount(&server)
        .await;

    let client = ExplorerClient::new(server.uri(), Some("bad-key".to_string()));
    let err = client.balance(ADDRESS).await.unwrap_err();
    assert!(matches!(err, HelplineError::Http(_)));
    assert!(err.to_string().contains("NOTOK"));
}
