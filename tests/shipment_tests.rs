//! End-to-end tests for the shipment resource.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::json;
use tassi_api::{Requestor, Resource, SharedConfig, Shipment, TassiConfig, TassiError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static SLOT_LOCK: Mutex<()> = Mutex::new(());

fn slot_lock() -> MutexGuard<'static, ()> {
    SLOT_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

fn install_requestor(server: &MockServer) {
    let config = SharedConfig::new(TassiConfig::new());
    config.set_api_key("test_api_key");
    config.set_api_base(server.uri());
    Shipment::set_requestor(Arc::new(Requestor::with_config(config)));
}

#[tokio::test]
async fn test_create_posts_payload_and_unwraps() {
    let _guard = slot_lock();
    let server = MockServer::start().await;

    let payload = json!({
        "marketplace_id": "1",
        "customer": {
            "first_name": "Doe",
            "last_name": "Jane",
            "email": "doe@gmail.com",
            "city": "Cotonou",
            "country_code": "BJ",
        },
        "pickup_point": {
            "name": "Point Relais Houéyiho",
            "city": "Cotonou",
            "postal_code": "22901",
            "latitude": 6.3703,
            "longitude": 2.3912,
            "is_active": true,
        },
        "package": {
            "description": "Colis test contenant accessoires électroniques",
            "weight": 5,
            "dimensions": "10x10x10",
            "declared_value": "100",
            "currency": "USD",
            "insurance": false,
        },
        "route": {
            "origin": "Cotonou",
            "destination": "Porto-Novo",
            "stops": [{"city": "Sèmè-Kpodji", "latitude": 6.3512, "longitude": 2.4987}],
        },
    });

    Mock::given(method("POST"))
        .and(path("/shipments"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipment": {
                "id": 1,
                "marketplace_id": 1,
                "package_id": 1,
                "status": "created",
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    install_requestor(&server);

    let result = Shipment::create(payload, None).await.unwrap();
    let shipment = result.as_object().unwrap();

    assert_eq!(shipment.get_i64("id"), Some(1));
    assert_eq!(shipment.get_i64("marketplace_id"), Some(1));
    assert_eq!(shipment.get_i64("package_id"), Some(1));
    assert_eq!(shipment.get_str("status"), Some("created"));
}

#[tokio::test]
async fn test_create_rejects_non_object_params_before_any_call() {
    let _guard = slot_lock();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/shipments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;
    install_requestor(&server);

    let error = Shipment::create(json!("not params"), None).await.unwrap_err();

    assert!(matches!(error, TassiError::InvalidRequest(_)));
    assert!(error.to_string().contains("shipment"));
}

#[tokio::test]
async fn test_create_surfaces_server_failure() {
    let _guard = slot_lock();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/shipments"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "route is required"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    install_requestor(&server);

    let error = Shipment::create(json!({"marketplace_id": "1"}), None)
        .await
        .unwrap_err();

    assert_eq!(error.http_status(), Some(422));
}

#[tokio::test]
async fn test_delete_issues_delete_on_instance_path() {
    let _guard = slot_lock();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/shipments/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    install_requestor(&server);

    Shipment::new(9).delete(None).await.unwrap();
}
