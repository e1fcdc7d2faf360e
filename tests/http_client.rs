//! `PaymanClient` against a local HTTP server.

use paykit::error::{BackendError, PaykitError};
use paykit::payman::{PaymanClient, PaymentsApi};
use paykit::types::{Currency, Environment, SearchDestinationsQuery};
use paykit::{ToolKit, ToolKitConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "sk_test_wire";

fn config(server: &MockServer) -> ToolKitConfig {
    ToolKitConfig::new(SECRET, Environment::Sandbox).with_base_url(server.uri())
}

fn client(server: &MockServer) -> PaymanClient {
    PaymanClient::new(&config(server)).unwrap()
}

#[tokio::test]
async fn send_payment_posts_body_with_secret_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments/send-payment"))
        .and(header("x-payman-api-secret", SECRET))
        .and(body_json(json!({
            "amountDecimal": 25.5,
            "paymentDestinationId": "dest_1"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "reference": "txn_9", "status": "INITIATED" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let kit = ToolKit::build(config(&server)).unwrap();
    let result = kit
        .execute(
            "sendPayment",
            json!({ "amountDecimal": 25.5, "paymentDestinationId": "dest_1" }),
        )
        .await
        .unwrap();

    assert_eq!(result, json!({ "reference": "txn_9", "status": "INITIATED" }));
}

#[tokio::test]
async fn create_payee_and_deposit_use_their_routes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments/destinations"))
        .and(header("x-payman-api-secret", SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "dest_7" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/initiate-customer-deposit"))
        .and(header("x-payman-api-secret", SECRET))
        .and(body_json(json!({
            "amountDecimal": 40.0,
            "customerId": "cust_1",
            "feeMode": "ADD_TO_AMOUNT"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "checkoutUrl": "https://pay/x" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let kit = ToolKit::build(config(&server)).unwrap();
    let payee = kit
        .execute(
            "createPayee",
            json!({
                "type": "PAYMAN_AGENT",
                "name": "Research bot",
                "paymanAgentId": "agt_1"
            }),
        )
        .await
        .unwrap();
    assert_eq!(payee["id"], "dest_7");

    let deposit = kit
        .execute(
            "initiateCustomerDeposit",
            json!({ "amountDecimal": 40, "customerId": "cust_1", "feeMode": "ADD_TO_AMOUNT" }),
        )
        .await
        .unwrap();
    assert_eq!(deposit["checkoutUrl"], "https://pay/x");
}

#[tokio::test]
async fn search_sends_only_the_filters_that_are_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/search-destinations"))
        .and(header("x-payman-api-secret", SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = client(&server);
    api.search_destinations(&SearchDestinationsQuery::default())
        .await
        .unwrap();
    api.search_destinations(&SearchDestinationsQuery {
        name: Some("Jane Doe".into()),
        customer_id: Some("cust_1".into()),
        contact_email: Some("jane@example.com".into()),
    })
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), None);

    let pairs: Vec<(String, String)> = requests[1]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("name".to_string(), "Jane Doe".to_string()),
            ("customerId".to_string(), "cust_1".to_string()),
            ("contactEmail".to_string(), "jane@example.com".to_string()),
        ]
    );
}

#[tokio::test]
async fn search_filter_reaches_the_server_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/search-destinations"))
        .and(query_param("name", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "dest_1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let kit = ToolKit::build(config(&server)).unwrap();
    let result = kit
        .execute("searchDestinations", json!({ "name": "Acme" }))
        .await
        .unwrap();
    assert_eq!(result, json!([{ "id": "dest_1" }]));
}

#[tokio::test]
async fn balances_decode_a_bare_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balances/customers/cust_1/currencies/USD"))
        .and(header("x-payman-api-secret", SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_string("150.25"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/balances/currencies/USD"))
        .and(header("x-payman-api-secret", SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_string("980"))
        .expect(1)
        .mount(&server)
        .await;

    let kit = ToolKit::build(config(&server)).unwrap();
    let customer = kit
        .execute(
            "getCustomerBalance",
            json!({ "customerId": "cust_1", "currency": "USD" }),
        )
        .await
        .unwrap();
    assert_eq!(
        customer,
        json!({ "spendableBalance": 150.25, "currency": "USD", "customerId": "cust_1" })
    );

    let spendable = client(&server)
        .get_spendable_balance(Currency::Usd)
        .await
        .unwrap();
    assert_eq!(spendable, 980.0);
}

#[tokio::test]
async fn non_success_status_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments/send-payment"))
        .respond_with(ResponseTemplate::new(402).set_body_string("insufficient funds"))
        .mount(&server)
        .await;

    let kit = ToolKit::build(config(&server)).unwrap();
    let err = kit
        .execute(
            "sendPayment",
            json!({ "amountDecimal": 10, "paymentDestinationId": "dest_1" }),
        )
        .await
        .unwrap_err();

    match err {
        PaykitError::Backend(BackendError::Api { status, body }) => {
            assert_eq!(status, 402);
            assert_eq!(body, "insufficient funds");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balances/currencies/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"balance\": "))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_spendable_balance(Currency::Usd)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)), "{:?}", err);
}

#[tokio::test]
async fn object_where_a_balance_is_expected_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balances/customers/cust_1/currencies/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 3 })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_customer_balance("cust_1", Currency::Usd)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)), "{:?}", err);
}
