//! Contract tests for the rating aggregator.
//!
//! | Service | Method | Path | Test |
//! |---------|--------|------|------|
//! | menu | GET | `/api/ratings/menu/{menuId}/me` | `load_all_*`, `failed_*` |
//! | menu | POST | `/api/ratings` | `first_rating_*`, `load_all_*` |
//! | menu | PUT | `/api/ratings/{id}` | `first_rating_*` |
//! | menu | DELETE | `/api/ratings/{id}` | `remove_*` |

use std::time::Duration;

use meja_client::{ClientConfig, ClientError, MejaClient, MenuItem, SessionContext};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seated_client_for(server: &MockServer) -> MejaClient {
    let session = SessionContext::in_memory();
    session.set_table_session("s1", "t1", "M05").unwrap();
    MejaClient::with_session(&ClientConfig::new(server.uri()), session).unwrap()
}

fn menu_item(id: &str, name: &str) -> MenuItem {
    serde_json::from_value(serde_json::json!({"id": id, "name": name, "price": 25000})).unwrap()
}

fn rating_envelope(id: &str, menu_id: &str, rating: u8) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": "ok",
        "data": {"id": id, "menuId": menu_id, "rating": rating, "createdAt": "2024-05-01T10:00:00"}
    })
}

#[tokio::test]
async fn first_rating_posts_then_updates_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ratings"))
        .and(body_json(serde_json::json!({"menu": {"id": "m1"}, "rating": 4})))
        .respond_with(ResponseTemplate::new(201).set_body_json(rating_envelope("r9", "m1", 4)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/ratings/r9"))
        .and(body_json(serde_json::json!({"menu": {"id": "m1"}, "rating": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(rating_envelope("r9", "m1", 5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = seated_client_for(&server);
    let ratings = client.ratings();
    let item = menu_item("m1", "Nasi Goreng");

    let notice = ratings.submit(&item, 4).await.unwrap();
    assert_eq!(notice.title, "Rating Submitted");
    assert_eq!(notice.description, "Thank you for rating \"Nasi Goreng\" 4 stars!");
    assert_eq!(ratings.store().rating_of("m1"), 4);

    let notice = ratings.submit(&item, 5).await.unwrap();
    assert_eq!(notice.title, "Rating Updated");
    assert_eq!(
        notice.description,
        "Your rating for \"Nasi Goreng\" has been updated to 5 stars."
    );
    let stored = ratings.store().get("m1").unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.rating_id.as_deref(), Some("r9"));
}

#[tokio::test]
async fn out_of_range_rating_is_not_sent() {
    let server = MockServer::start().await;
    let client = seated_client_for(&server);

    let err = client
        .ratings()
        .submit(&menu_item("m1", "Nasi Goreng"), 6)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn load_all_treats_404_as_unrated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ratings/menu/m1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rating_envelope("r1", "m1", 3)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/ratings/menu/m2/me"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = seated_client_for(&server);
    let ratings = client.ratings();
    let items = vec![menu_item("m1", "Nasi Goreng"), menu_item("m2", "Es Teh")];

    assert_eq!(client.ratings().fetch_mine("m2").await.unwrap(), None);

    let rated = ratings.load_all(&items).await;
    assert_eq!(rated, 1);
    assert_eq!(ratings.store().rating_of("m1"), 3);
    assert_eq!(ratings.store().rating_of("m2"), 0);
}

#[tokio::test]
async fn failed_update_resyncs_from_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ratings/menu/m1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rating_envelope("r1", "m1", 3)))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/ratings/r1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = seated_client_for(&server);
    let ratings = client.ratings();
    let item = menu_item("m1", "Nasi Goreng");
    ratings.load_all(std::slice::from_ref(&item)).await;

    let err = ratings.submit(&item, 1).await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(ratings.store().rating_of("m1"), 3);
    assert!(!ratings.store().is_pending("m1"));
}

#[tokio::test]
async fn remove_deletes_known_rating() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ratings/menu/m1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rating_envelope("r1", "m1", 3)))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/ratings/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Rating deleted",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = seated_client_for(&server);
    let ratings = client.ratings();
    let item = menu_item("m1", "Nasi Goreng");
    ratings.load_all(std::slice::from_ref(&item)).await;

    let notice = ratings.remove(&item).await.unwrap().unwrap();

    assert_eq!(notice.title, "Rating Removed");
    assert_eq!(
        notice.description,
        "Your rating for \"Nasi Goreng\" has been successfully removed."
    );
    assert!(ratings.store().get("m1").is_none());
}

#[tokio::test]
async fn remove_without_known_rating_is_local() {
    let server = MockServer::start().await;
    let client = seated_client_for(&server);

    let outcome = client
        .ratings()
        .remove(&menu_item("m1", "Nasi Goreng"))
        .await
        .unwrap();

    assert_eq!(outcome, None);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn load_all_keeps_rating_submitted_while_loading() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ratings/menu/m1/me"))
        .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/ratings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(rating_envelope("r1", "m1", 4)))
        .expect(1)
        .mount(&server)
        .await;

    let client = seated_client_for(&server);
    let ratings = client.ratings();
    let item = menu_item("m1", "Nasi Goreng");

    let load = ratings.load_all(std::slice::from_ref(&item));
    let rate = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let loading = ratings.store().is_loading("m1");
        (loading, ratings.submit(&item, 4).await)
    };
    let (_, (loading, submitted)) = tokio::join!(load, rate);

    assert!(loading);
    submitted.unwrap();
    assert_eq!(ratings.store().rating_of("m1"), 4);
    assert_eq!(
        ratings.store().get("m1").unwrap().rating_id.as_deref(),
        Some("r1")
    );
    assert!(!ratings.store().is_pending("m1"));
}
