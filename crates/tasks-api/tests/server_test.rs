use std::sync::Arc;

use serde_json::{json, Value};
use tasks_api::{create_router, ApiState};
use tasks_db::Database;

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let db = Database::in_memory().await.unwrap();
    db.init_schema().await.unwrap();
    let app = create_router(ApiState::new(Arc::new(db)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_task_lifecycle_over_http() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/tasks"))
        .json(&json!({ "title": "Buy milk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{base}/tasks/{id}"))
        .json(&json!({ "completed": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated, json!({ "id": id, "title": "Buy milk", "completed": 1 }));

    let resp = client
        .delete(format!("{base}/tasks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let resp = client
        .get(format!("{base}/tasks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["error"], "Task not found");
}
