//! End-to-end behavior of the HTTP surface, driven in-process.

use axum::Router;
use axum::body::Body;
use employee_server::{Config, DbService, ServerState, build_app};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = DbService::in_memory().await.expect("in-memory database");
    build_app(ServerState::new(Config::default(), db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn lee() -> Value {
    json!({
        "FirstName": "Lee",
        "LastName": "Park",
        "EmployeeType": "Intern",
        "Email": "lee.park@x.com",
        "BeginDate": "2025-01-01",
        "JobTitle": "Intern Eng"
    })
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|e| e["UserId"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_returns_seed_rows_in_id_order() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body[0]["FirstName"], "Asha");
    assert_eq!(body[1]["Manager"], Value::Null);
}

#[tokio::test]
async fn test_list_filters() {
    let app = test_app().await;

    let (_, body) = send(&app, Method::GET, "/employees?q=asha", None).await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = send(&app, Method::GET, "/employees?q=KUMAR", None).await;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = send(&app, Method::GET, "/employees?type=FullTime", None).await;
    assert_eq!(ids(&body), vec![1, 2]);

    let (_, body) = send(&app, Method::GET, "/employees?type=FullTime&q=meera", None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, "/employees?manager=Ravi%20Kumar", None).await;
    assert_eq!(ids(&body), vec![1, 3]);

    // empty filters are ignored
    let (_, body) = send(&app, Method::GET, "/employees?type=&q=", None).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_paging() {
    let app = test_app().await;

    let (_, body) = send(&app, Method::GET, "/employees?limit=2", None).await;
    assert_eq!(ids(&body), vec![1, 2]);

    let (_, body) = send(&app, Method::GET, "/employees?limit=2&offset=2", None).await;
    assert_eq!(ids(&body), vec![3]);

    let (_, body) = send(&app, Method::GET, "/employees?limit=100000&offset=-3", None).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (status, body) = send(&app, Method::GET, "/employees?limit=&offset=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (status, body) = send(&app, Method::GET, "/employees?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_get_delete_round_trip() {
    let app = test_app().await;

    let (status, created) = send(&app, Method::POST, "/employees", Some(lee())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["UserId"].as_i64().unwrap();
    assert_eq!(id, 4);
    for (key, value) in lee().as_object().unwrap() {
        assert_eq!(&created[key], value, "field {key}");
    }
    assert_eq!(created["Manager"], Value::Null);

    let uri = format!("/employees/{id}");
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let app = test_app().await;
    let mut last = 3;
    for n in 0..3 {
        let mut body = lee();
        body["Email"] = json!(format!("lee{n}@x.com"));
        let (status, created) = send(&app, Method::POST, "/employees", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["UserId"].as_i64().unwrap();
        assert!(id > last);
        last = id;
    }
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = test_app().await;
    let mut body = lee();
    body["UserId"] = json!(1);
    let (status, created) = send(&app, Method::POST, "/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["UserId"], 4);
}

#[tokio::test]
async fn test_create_missing_fields() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "FirstName": "Lee", "Email": "", "Manager": "Ravi Kumar" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing fields: LastName, EmployeeType, Email, BeginDate, JobTitle"
    );
    assert_eq!(
        body["fields"],
        json!(["LastName", "EmployeeType", "Email", "BeginDate", "JobTitle"])
    );
}

#[tokio::test]
async fn test_create_duplicate_email_conflicts() {
    let app = test_app().await;
    let (status, _) = send(&app, Method::POST, "/employees", Some(lee())).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut again = lee();
    again["FirstName"] = json!("Other");
    let (status, body) = send(&app, Method::POST, "/employees", Some(again)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Email already exists" }));

    let (_, list) = send(&app, Method::GET, "/employees?q=lee.park", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["FirstName"], "Lee");
}

#[tokio::test]
async fn test_create_malformed_json() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/employees")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace() {
    let app = test_app().await;
    let mut body = lee();
    body["Email"] = json!("asha.v@example.com");

    let (status, updated) = send(&app, Method::PUT, "/employees/1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["UserId"], 1);
    assert_eq!(updated["FirstName"], "Lee");
    assert_eq!(updated["Email"], "asha.v@example.com");
    // Asha had a manager; a full replace without one clears it
    assert_eq!(updated["Manager"], Value::Null);

    let (_, fetched) = send(&app, Method::GET, "/employees/1", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_replace_errors() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/employees/1",
        Some(json!({ "FirstName": "Only" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing fields: LastName, EmployeeType, Email, BeginDate, JobTitle"
    );

    let (status, _) = send(&app, Method::PUT, "/employees/999", Some(lee())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);

    let mut taken = lee();
    taken["Email"] = json!("ravi.kumar@example.com");
    let (status, body) = send(&app, Method::PUT, "/employees/1", Some(taken)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_replace_keeps_own_email() {
    let app = test_app().await;
    let mut body = lee();
    body["Email"] = json!("asha.verma@example.com");
    let (status, updated) = send(&app, Method::PUT, "/employees/1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Email"], "asha.verma@example.com");
}

#[tokio::test]
async fn test_patch_only_job_title() {
    let app = test_app().await;
    let (_, before) = send(&app, Method::GET, "/employees/1", None).await;

    let (status, after) = send(
        &app,
        Method::PATCH,
        "/employees/1",
        Some(json!({ "JobTitle": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["JobTitle"], "X");

    let mut expected = before;
    expected["JobTitle"] = json!("X");
    assert_eq!(after, expected);
}

#[tokio::test]
async fn test_patch_manager_null_clears() {
    let app = test_app().await;
    let (status, after) = send(
        &app,
        Method::PATCH,
        "/employees/3",
        Some(json!({ "Manager": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["Manager"], Value::Null);
    assert_eq!(after["FirstName"], "Meera");
}

#[tokio::test]
async fn test_patch_errors() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/employees/999",
        Some(json!({ "JobTitle": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/employees/3",
        Some(json!({ "Email": "asha.verma@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");

    let (_, meera) = send(&app, Method::GET, "/employees/3", None).await;
    assert_eq!(meera["Email"], "meera.iyer@example.com");
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/employees/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));

    let (status, _) = send(&app, Method::DELETE, "/employees/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The id is checked before the body on both update verbs
    let partial = json!({ "FirstName": "Only" });
    let (status, _) = send(&app, Method::PUT, "/employees/abc", Some(partial.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PATCH, "/employees/abc", Some(partial)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = test_app().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let app = test_app().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
