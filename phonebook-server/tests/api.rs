//! HTTP API integration tests (in-memory SurrealDB, oneshot requests)

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use phonebook_server::api::build_app;
use phonebook_server::{Config, ServerState};

const ADMIN_EMAIL: &str = "admin@corp.example";
const ADMIN_PASSWORD: &str = "correct-horse-battery";

async fn setup_with(config: Config) -> (Router, ServerState) {
    let state = ServerState::initialize(&config).await.unwrap();
    let app = build_app(&state).with_state(state.clone());
    (app, state)
}

async fn setup() -> (Router, ServerState) {
    setup_with(Config::in_memory().with_admin(ADMIN_EMAIL, ADMIN_PASSWORD)).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn employee(first: &str, department: &str, floor: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": "Tester",
        "email": format!("{}@corp.example", first.to_lowercase()),
        "extension": "200",
        "department": department,
        "role": "Analyst",
        "floor": floor,
    })
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = setup().await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn login_returns_token_and_admin() {
    let (app, _) = setup().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["expires_in"], 480 * 60);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);

    let token = body["token"].as_str().unwrap();
    let (status, me) = send(&app, authed("GET", "/api/auth/me", token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _) = setup().await;

    let (wrong_pw, body_a) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": ADMIN_EMAIL, "password": "nope"}),
        ),
    )
    .await;
    let (unknown, body_b) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "ghost@corp.example", "password": "nope"}),
        ),
    )
    .await;

    assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a["code"], 1002);
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn admin_routes_require_token() {
    let (app, _) = setup().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/admin/employees", None, employee("Ann", "Sales", "1")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = send(&app, get("/api/admin/employees")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, authed("GET", "/api/admin/employees", "garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    // Nothing was written
    let (_, set) = send(&app, get("/api/employees")).await;
    assert_eq!(set["employees"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn crud_bumps_revision() {
    let (app, _) = setup().await;
    let token = login(&app).await;

    let (_, initial) = send(&app, get("/api/employees")).await;
    let r0 = initial["revision"].as_u64().unwrap();

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/employees",
            Some(&token),
            employee("Ann", "Sales", "1"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    let r1 = created["revision"].as_u64().unwrap();
    assert!(r1 > r0);

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/admin/employees/{id}"),
            Some(&token),
            employee("Annie", "Marketing", "2"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    let r2 = updated["revision"].as_u64().unwrap();
    assert!(r2 > r1);

    let (_, set) = send(&app, get("/api/employees")).await;
    assert_eq!(set["revision"].as_u64().unwrap(), r2);
    assert_eq!(set["employees"][0]["first_name"], "Annie");
    assert_eq!(set["employees"][0]["department"], "Marketing");

    let (status, deleted) = send(
        &app,
        authed("DELETE", &format!("/api/admin/employees/{id}"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(deleted["revision"].as_u64().unwrap() > r2);

    let (_, set) = send(&app, get("/api/employees")).await;
    assert!(set["employees"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_draft_reports_each_field() {
    let (app, _) = setup().await;
    let token = login(&app).await;

    let mut draft = employee("Ann", "Sales", "1");
    draft["email"] = json!("not-an-email");
    draft["floor"] = json!("   ");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/admin/employees", Some(&token), draft),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["details"]["email"], "Invalid email format");
    assert_eq!(body["details"]["floor"], "Floor is required");
}

#[tokio::test]
async fn vanished_record_is_not_found() {
    let (app, _) = setup().await;
    let token = login(&app).await;

    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/employees",
            Some(&token),
            employee("Ann", "Sales", "1"),
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/admin/employees/{id}");

    let (status, _) = send(&app, authed("DELETE", &uri, &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, authed("DELETE", &uri, &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8001);

    let (status, _) = send(
        &app,
        json_request("PUT", &uri, Some(&token), employee("Ann", "Sales", "2")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn directory_filters_and_pages() {
    let (app, state) = setup().await;
    let token = login(&app).await;

    for i in 0..23 {
        let department = if i % 2 == 0 { "Engineering" } else { "Sales" };
        let floor = format!("{}", i % 3 + 1);
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/admin/employees",
                Some(&token),
                employee(&format!("Person{i}"), department, &floor),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(state.employee_repository().count().await.unwrap(), 23);

    let (status, page) = send(&app, get("/api/directory")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_filtered"], 23);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["records"].as_array().unwrap().len(), 10);

    let (_, last) = send(&app, get("/api/directory?page=3")).await;
    assert_eq!(last["current_page"], 3);
    assert_eq!(last["records"].as_array().unwrap().len(), 3);

    let (_, cards) = send(&app, get("/api/directory?view=card")).await;
    assert_eq!(cards["page_size"], 12);
    assert_eq!(cards["total_pages"], 2);

    let (_, eng) = send(&app, get("/api/directory?q=eng")).await;
    assert_eq!(eng["total_filtered"], 12);

    let (_, sales_floor_2) = send(&app, get("/api/directory?department=Sales&floor=2")).await;
    let records = sales_floor_2["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert!(
        records
            .iter()
            .all(|r| r["department"] == "Sales" && r["floor"] == "2")
    );

    let (_, beyond) = send(&app, get("/api/directory?page=99")).await;
    assert_eq!(beyond["current_page"], 3);

    let (status, admin) = send(&app, authed("GET", "/api/admin/employees?floor=1", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["stats"]["total_employees"], 23);
    assert_eq!(admin["stats"]["departments"], 2);
    assert_eq!(admin["stats"]["floors"], 3);
    assert_eq!(admin["total_filtered"], 8);
}

#[tokio::test]
async fn seed_file_populates_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");
    let seed = json!([
        employee("Grace", "Engineering", "2"),
        employee("Alan", "Research", "3"),
    ]);
    std::fs::write(&path, seed.to_string()).unwrap();

    let mut config = Config::in_memory();
    config.seed_file = Some(path.to_string_lossy().into_owned());
    let (app, _) = setup_with(config).await;

    let (_, set) = send(&app, get("/api/employees")).await;
    let names: Vec<_> = set["employees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["first_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Grace", "Alan"]);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (app, _) = setup().await;
    let resp = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}
