//! End-to-end behaviour of the client against a recording mock transport.

use std::sync::Mutex;

use async_trait::async_trait;
use finding_client::{
    Finding, FindingClient, FindingError, FindingTransport, Params, SearchRequest,
    TransportError,
};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// Returns a canned body (or error) and records every parameter set it sees.
struct MockTransport {
    reply: Mutex<Option<Result<Value, TransportError>>>,
    calls: Mutex<Vec<Params>>,
}

impl MockTransport {
    fn replying(body: Value) -> Self {
        Self {
            reply: Mutex::new(Some(Ok(body))),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: TransportError) -> Self {
        Self {
            reply: Mutex::new(Some(Err(err))),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Params> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FindingTransport for MockTransport {
    async fn call(&self, params: &Params) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(params.clone());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(TransportError::Network("MockTransport: no reply left".into())))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Wire-shaped envelope: every field wrapped in a one-element array.
fn wire_envelope(operation: &str, ack: &str, search_result: Value) -> Value {
    let body = json!({
        "ack": [ack],
        "version": ["1.13.0"],
        "timestamp": ["2024-03-01T12:00:00.000Z"],
        "searchResult": [search_result],
        "paginationOutput": [{
            "pageNumber": ["1"],
            "entriesPerPage": ["100"],
            "totalPages": ["1"],
            "totalEntries": ["1"]
        }],
        "itemSearchURL": ["https://www.ebay.com/sch/i.html?_nkw=widget"]
    });
    let mut envelope = Params::new();
    envelope.insert(format!("{operation}Response"), json!([body]));
    Value::Object(envelope)
}

fn options(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => panic!("options fixture must be an object"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_item_result_is_a_one_element_sequence() {
    let body = wire_envelope(
        "findItemsByProduct",
        "Success",
        json!({ "@count": "1", "item": [{ "itemId": ["110"], "title": ["Widget"] }] }),
    );
    let client = FindingClient::with_transport(MockTransport::replying(body));

    let result = client
        .find_items_by_product("UPC", "885909950805", Params::new())
        .await
        .unwrap();

    assert_eq!(result.search_result_count, 1);
    assert_eq!(result.search_result, vec![json!({ "itemId": "110", "title": "Widget" })]);
    assert_eq!(result.pagination_output.total_entries, 1);
    assert!(result.is_success());
}

#[tokio::test]
async fn absent_search_result_gives_empty_sequence() {
    let mut body = wire_envelope("findItemsByKeywords", "Success", Value::Null);
    body["findItemsByKeywordsResponse"][0]
        .as_object_mut()
        .unwrap()
        .remove("searchResult");
    let client = FindingClient::with_transport(MockTransport::replying(body));

    let result = client
        .find_items_by_keywords("nothing matches this", Params::new())
        .await
        .unwrap();

    assert!(result.search_result.is_empty());
    assert_eq!(result.search_result_count, 0);
}

#[tokio::test]
async fn unsupported_product_id_type_never_reaches_transport() {
    let client = FindingClient::with_transport(MockTransport::replying(json!({})));

    let err = client
        .find_items_by_product("SKU", "abc", Params::new())
        .await
        .unwrap_err();

    match err {
        FindingError::InvalidArgument { value, valid, .. } => {
            assert_eq!(value, "SKU");
            assert_eq!(valid, vec!["ReferenceID", "ISBN", "UPC", "EAN"]);
        }
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn unknown_operation_is_rejected_before_any_call() {
    let client = FindingClient::with_transport(MockTransport::replying(json!({})));

    let err = client
        .call("findItemsEverywhere", Ok, Params::new(), Params::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FindingError::InvalidArgument { kind: "operation", .. }));
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn empty_envelope_is_an_empty_response() {
    let client = FindingClient::with_transport(MockTransport::replying(
        json!({ "findItemsByKeywordsResponse": {} }),
    ));

    let err = client
        .find_items_by_keywords("widget", Params::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FindingError::EmptyResponse { ref operation } if operation == "findItemsByKeywords"
    ));
}

#[tokio::test]
async fn missing_envelope_is_an_empty_response() {
    let client = FindingClient::with_transport(MockTransport::replying(json!({})));

    let err = client.find_items_by_isbn("9780131103627", Params::new()).await.unwrap_err();

    assert!(matches!(err, FindingError::EmptyResponse { .. }));
}

#[tokio::test]
async fn failure_ack_surfaces_the_body() {
    let body = json!({
        "findItemsByProductResponse": [{
            "ack": ["Failure"],
            "errorMessage": [{ "error": [{ "errorId": ["4"], "message": ["Invalid product ID value."] }] }]
        }]
    });
    let client = FindingClient::with_transport(MockTransport::replying(body));

    let err = client.find_items_by_ean("not-an-ean", Params::new()).await.unwrap_err();

    let failure = err.failure_body().expect("service failure");
    assert_eq!(failure["ack"], "Failure");
    assert_eq!(failure["errorMessage"]["error"]["message"], "Invalid product ID value.");
}

#[tokio::test]
async fn transport_errors_pass_through_unchanged() {
    let client = FindingClient::with_transport(MockTransport::failing(TransportError::Api {
        status: 500,
        message: "upstream down".into(),
    }));

    let err = client.find_items_by_upc("123", Params::new()).await.unwrap_err();

    match err {
        FindingError::Transport(TransportError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn base_params_win_over_options() {
    let body = wire_envelope("findItemsByProduct", "Success", json!({ "@count": "0" }));
    let client = FindingClient::with_transport(MockTransport::replying(body));

    client
        .find_items_by_reference_id(
            "99700122",
            options(json!({
                "productId": "overridden?",
                "OPERATION-NAME": "getVersion",
                "paginationInput.entriesPerPage": 5
            })),
        )
        .await
        .unwrap();

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);
    let sent = &calls[0];
    assert_eq!(sent["OPERATION-NAME"], "findItemsByProduct");
    assert_eq!(sent["productId"], "99700122");
    assert_eq!(sent["productId.@type"], "ReferenceID");
    assert_eq!(sent["paginationInput.entriesPerPage"], 5);
}

#[tokio::test]
async fn prepared_request_runs_advanced_search() {
    let body = wire_envelope(
        "findItemsAdvanced",
        "Success",
        json!({ "@count": "2", "item": [{ "itemId": ["1"] }, { "itemId": ["2"] }] }),
    );
    let client = FindingClient::with_transport(MockTransport::replying(body));

    let result = client
        .execute(SearchRequest::advanced("lego castle", true).option("sortOrder", "EndTimeSoonest"))
        .await
        .unwrap();

    assert_eq!(result.search_result_count, 2);
    assert_eq!(result.search_result.len(), 2);
    let sent = &client.transport().calls()[0];
    assert_eq!(sent["descriptionSearch"], true);
    assert_eq!(sent["sortOrder"], "EndTimeSoonest");
}

async fn sent_params_for<F, Fut>(operation: &str, search: F) -> Params
where
    F: FnOnce(FindingClient<MockTransport>) -> Fut,
    Fut: std::future::Future<Output = FindingClient<MockTransport>>,
{
    let body = wire_envelope(operation, "Success", json!({ "@count": "0" }));
    let client = search(FindingClient::with_transport(MockTransport::replying(body))).await;
    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);
    calls.into_iter().next().unwrap()
}

#[tokio::test]
async fn category_search_sends_category_id() {
    let sent = sent_params_for("findItemsByCategory", |client| async move {
        client.find_items_by_category("1249", Params::new()).await.unwrap();
        client
    })
    .await;

    assert_eq!(sent["OPERATION-NAME"], "findItemsByCategory");
    assert_eq!(sent["categoryId"], "1249");
}

#[tokio::test]
async fn completed_items_search_sends_keywords() {
    let sent = sent_params_for("findCompletedItems", |client| async move {
        client
            .find_completed_items("vintage camera", Params::new())
            .await
            .unwrap();
        client
    })
    .await;

    assert_eq!(sent["OPERATION-NAME"], "findCompletedItems");
    assert_eq!(sent["keywords"], "vintage camera");
}

#[tokio::test]
async fn store_search_sends_store_name() {
    let sent = sent_params_for("findItemsIneBayStores", |client| async move {
        client
            .find_items_in_ebay_stores("mystore", Params::new())
            .await
            .unwrap();
        client
    })
    .await;

    assert_eq!(sent["OPERATION-NAME"], "findItemsIneBayStores");
    assert_eq!(sent["storeName"], "mystore");
}

#[tokio::test]
async fn get_version_is_parsed() {
    let body = json!({
        "getVersionResponse": [{
            "ack": ["Success"],
            "version": ["1.13.0"],
            "timestamp": ["2024-03-01T12:00:00.000Z"]
        }]
    });
    let client = FindingClient::with_transport(MockTransport::replying(body));

    let version = client.get_version().await.unwrap();

    assert_eq!(version.version, "1.13.0");
    assert_eq!(client.transport().calls()[0]["OPERATION-NAME"], "getVersion");
}

// ---------------------------------------------------------------------------
// Finding handle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn searching_before_init_fails() {
    let finding: Finding<MockTransport> = Finding::new();

    let err = finding
        .find_items_by_keywords("widget", Params::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FindingError::NotInitialized));
    assert!(!finding.is_initialized());
}

#[tokio::test]
async fn handle_initializes_once() {
    static FINDING: Finding<MockTransport> = Finding::new();

    let body = wire_envelope("findItemsByKeywords", "Success", json!({ "@count": "0" }));
    FINDING
        .init_with(FindingClient::with_transport(MockTransport::replying(body)))
        .unwrap();

    let second = FINDING.init_with(FindingClient::with_transport(MockTransport::replying(json!({}))));
    assert!(matches!(second, Err(FindingError::Config(_))));

    let result = FINDING
        .find_items_by_keywords("widget", Params::new())
        .await
        .unwrap();
    assert_eq!(result.search_result_count, 0);
}
