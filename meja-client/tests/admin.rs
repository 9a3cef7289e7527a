//! Contract tests for the admin account and panels.
//!
//! | Service | Method | Path | Test |
//! |---------|--------|------|------|
//! | auth | POST | `/admin/login` | `login_*` |
//! | auth | GET | `/admin` | `profile_*` |
//! | auth | PUT | `/admin` | `rename_*` |
//! | order | GET/POST | `/api/v1/meja` | `add_table_*`, `dashboard_*` |
//! | order | GET | `/api/checkout` | `advance_*`, `dashboard_*` |
//! | order | POST | `/api/checkout/{id}/advance` | `advance_*` |
//! | menu | POST | `/api/menus` | `create_menu_*` |
//! | menu | DELETE | `/api/menus/{id}` | `delete_menu_*` |
//! | web | POST | `/api/upload` | `create_menu_*` |
//! | web | DELETE | `/api/delete` | `storage_delete_*` |

use meja_client::admin::{ImageFile, MenuForm};
use meja_client::{
    AdminRegistration, CheckoutState, ClientConfig, ClientError, CredentialKind, MejaClient,
    Route, SessionContext,
};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MejaClient {
    MejaClient::with_session(&ClientConfig::new(server.uri()), SessionContext::in_memory())
        .unwrap()
}

fn admin_client_for(server: &MockServer) -> MejaClient {
    let session = SessionContext::in_memory();
    session.set_admin_token("tok-1").unwrap();
    MejaClient::with_session(&ClientConfig::new(server.uri()), session).unwrap()
}

fn menu_envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"success": true, "message": "ok", "data": data})
}

// ── account ──────────────────────────────────────────────────────────

#[tokio::test]
async fn login_stores_token_and_opens_dashboard() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .and(body_json(serde_json::json!({
            "email": "admin@example.com",
            "password": "Secret#123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-9"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let next = client
        .admin()
        .login("admin@example.com", "Secret#123")
        .await
        .unwrap();

    assert_eq!(next.route, Route::AdminDashboard);
    assert_eq!(client.session().admin_token().as_deref(), Some("tok-9"));
}

#[tokio::test]
async fn register_rejects_weak_password_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let registration = AdminRegistration {
        email: "admin@example.com".into(),
        name: "Admin".into(),
        password: "password".into(),
    };
    let err = client.admin().register(&registration).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn profile_with_rejected_token_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let err = client.admin().profile().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(CredentialKind::Admin)));
    assert_eq!(err.redirect(), Some(Route::AdminLogin));
    assert!(!client.admin().is_logged_in());
}

#[tokio::test]
async fn rename_sends_new_name() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/admin"))
        .and(body_json(serde_json::json!({"new_name": "Budi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Budi",
            "email": "admin@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let notice = client.admin().rename("  Budi ").await.unwrap();

    assert_eq!(notice.title, "Profile Updated");
}

// ── tables ───────────────────────────────────────────────────────────

#[tokio::test]
async fn add_table_refetches_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/meja"))
        .and(body_json(serde_json::json!({"nomorMeja": "M10"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 10, "nomorMeja": "M10", "status": "Available"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meja"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "nomorMeja": "M01", "status": "Occupied"},
            {"id": 10, "nomorMeja": "M10", "status": "Available"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let mut panel = client.tables();
    let notice = panel.create("M10").await.unwrap();

    assert_eq!(notice.description, "Table M10 has been added successfully.");
    assert_eq!(panel.tables().len(), 2);
    assert_eq!(panel.occupied(), 1);
}

// ── checkouts ────────────────────────────────────────────────────────

#[tokio::test]
async fn advance_posts_and_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 42, "state": "ORDERED", "message": ""}
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/checkout/42/advance"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 42, "state": "PREPARING", "message": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let mut board = client.checkout_board();
    board.refresh().await.unwrap();

    let notice = board.advance("42").await.unwrap();

    assert_eq!(notice.title, "State Advanced");
    assert_eq!(notice.description, "Order #42 state advanced");
    assert_eq!(board.records()[0].state, CheckoutState::Preparing);
}

#[tokio::test]
async fn advance_reports_success_when_refetch_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 42, "state": "ORDERED", "message": ""}
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/checkout/42/advance"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let mut board = client.checkout_board();
    board.refresh().await.unwrap();

    let notice = board.advance("42").await.unwrap();

    assert_eq!(notice.description, "Order #42 state advanced");
    assert!(!notice.is_error());
    assert_eq!(board.records()[0].state, CheckoutState::Ordered);
}

#[tokio::test]
async fn advance_completed_checkout_is_refused_locally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 7, "state": "COMPLETED", "message": ""},
            {"id": 8, "state": "DELETE", "message": ""}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/checkout/7/advance"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let mut board = client.checkout_board();
    board.refresh().await.unwrap();

    let err = board.advance("7").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidState { action: "advance", .. }));

    assert_eq!(board.visible().len(), 1);
    board.set_show_cancelled(true);
    assert_eq!(board.visible()[0].id, "8");
}

#[tokio::test]
async fn dashboard_combines_three_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meja"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "nomorMeja": "M01", "status": "Occupied"},
            {"id": 2, "nomorMeja": "M02", "status": "Available"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_envelope(serde_json::json!([
            {"id": "a", "name": "Nasi Goreng", "price": 25000}
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "state": "ORDERED", "order": {"id": 5, "createdAt": "2024-05-01T19:05:00",
                "orderItems": [{"id": 1, "menuItemId": "a", "quantity": 2}],
                "meja": {"nomorMeja": "M01", "status": "Occupied"}}},
            {"id": 2, "state": "COMPLETED"}
        ])))
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let summary = client.dashboard().load().await.unwrap();

    assert_eq!(summary.tables, 2);
    assert_eq!(summary.menu_items, 1);
    assert_eq!(summary.checkouts, 2);
    assert_eq!(summary.active_checkouts, 1);
    assert_eq!(summary.recent[0].table_number, "M01");
    assert_eq!(summary.recent[0].time.as_deref(), Some("19:05"));
    assert_eq!(summary.recent[1].table_number, "-");
}

// ── menus ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_menu_uploads_image_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("\"folder\":\"rizzserve-menu\""))
        .and(body_string_contains("menu/nasi-goreng/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"url": "https://cdn/x.png"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/menus"))
        .and(header("Authorization", "Bearer tok-1"))
        .and(body_json(serde_json::json!({
            "name": "Nasi Goreng",
            "description": "Fried rice",
            "imageUrl": "https://cdn/x.png",
            "quantity": null,
            "price": 25000.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(menu_envelope(serde_json::json!({
            "id": "a", "name": "Nasi Goreng", "description": "Fried rice",
            "imageUrl": "https://cdn/x.png", "price": 25000
        }))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_envelope(serde_json::json!([
            {"id": "a", "name": "Nasi Goreng", "price": 25000}
        ]))))
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let mut panel = client.menus();
    let form = MenuForm {
        name: "Nasi Goreng".into(),
        description: "Fried rice".into(),
        price: "25000".into(),
        image: Some(ImageFile {
            file_name: "nasi.png".into(),
            bytes: b"PNG".to_vec(),
        }),
        ..MenuForm::default()
    };

    let notice = panel.create(form).await.unwrap();

    assert_eq!(notice.title, "Menu Item Added");
    assert_eq!(panel.items().len(), 1);
}

#[tokio::test]
async fn create_menu_requires_fields() {
    let server = MockServer::start().await;
    let client = admin_client_for(&server);

    let form = MenuForm {
        name: "Nasi Goreng".into(),
        ..MenuForm::default()
    };
    let err = client.menus().create(form).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref m) if m == "Please fill in all required fields."));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_menu_accepts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/menus/a"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_envelope(serde_json::json!([]))))
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    let mut panel = client.menus();
    let notice = panel.delete("a").await.unwrap();

    assert_eq!(notice.title, "Menu Item Deleted");
    assert!(panel.items().is_empty());
}

// ── storage ──────────────────────────────────────────────────────────

#[tokio::test]
async fn storage_delete_sends_full_key() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/delete"))
        .and(body_json(serde_json::json!({
            "fullKey": "rizzserve-menu/menu/es-teh/1700000000000.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .storage()
        .delete("menu/es-teh/1700000000000.png", Some("rizzserve-menu"))
        .await
        .unwrap();
}
