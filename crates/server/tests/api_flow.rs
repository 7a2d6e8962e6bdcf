mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use lodge_server::router;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_free_pin_is_trimmed_and_case_insensitive() {
    let app = TestApp::new();

    for pin in [" freemason ", "FreeMason", "FREEMASON"] {
        let (status, body) = app.json("POST", "/check-pin", Some(json!({ "pin": pin }))).await;
        assert_eq!(status, StatusCode::OK, "pin {pin:?}");
        assert_eq!(body, json!({ "success": true }));
    }

    for pin in ["freemasons", "", "MASTERGUARD"] {
        let (status, body) = app.json("POST", "/check-pin", Some(json!({ "pin": pin }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "pin {pin:?}");
        assert_eq!(body, json!({ "success": false }));
    }

    let (status, _) = app.json("POST", "/check-pin", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_premium_pin() {
    let app = TestApp::new();

    let (status, _) = app
        .json("POST", "/check-premium-pin", Some(json!({ "pin": "masterguard" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .json("POST", "/check-premium-pin", Some(json!({ "pin": "FREEMASON" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_code_list_lifecycle() {
    let app = TestApp::new();

    let (status, body) = app.json("GET", "/api/codes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for code in ["a", "b", "c"] {
        let (status, body) = app.json("POST", "/api/codes", Some(json!({ "code": code }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "success": true }));
    }

    let (status, body) = app.json("DELETE", "/api/codes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = app.json("GET", "/api/codes", None).await;
    assert_eq!(body, json!(["a", "c"]));

    assert!(app.config.data_dir.join("credits.json").exists());
}

#[tokio::test]
async fn test_delete_out_of_range_is_not_found_and_unchanged() {
    let app = TestApp::new();
    app.json("POST", "/api/degree2-codes", Some(json!({ "code": "only" }))).await;

    for index in ["1", "99", "-1", "abc"] {
        let uri = format!("/api/degree2-codes/{index}");
        let (status, body) = app.json("DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "index {index}");
        assert_eq!(body, json!({ "success": false }));
    }

    let (_, body) = app.json("GET", "/api/degree2-codes", None).await;
    assert_eq!(body, json!(["only"]));
}

#[tokio::test]
async fn test_missing_code_is_rejected() {
    let app = TestApp::new();

    for payload in [json!({}), json!({ "code": "" }), json!({ "other": "x" })] {
        let (status, body) = app.json("POST", "/api/codes", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    let (_, body) = app.json("GET", "/api/codes", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/codes")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = router(app.state.clone(), &app.config.public_dir)
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tiers_are_separate_collections() {
    let app = TestApp::new();
    app.json("POST", "/api/codes", Some(json!({ "code": "free" }))).await;
    app.json("POST", "/api/degree2-codes", Some(json!({ "code": "premium" }))).await;

    let (_, free) = app.json("GET", "/api/codes", None).await;
    let (_, premium) = app.json("GET", "/api/degree2-codes", None).await;
    assert_eq!(free, json!(["free"]));
    assert_eq!(premium, json!(["premium"]));
}

#[tokio::test]
async fn test_access_requests_are_stamped() {
    let app = TestApp::new();

    let (status, body) = app.json("POST", "/api/degree2-requests", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "Missing number" }));

    let (status, _) = app
        .json("POST", "/api/degree2-requests", Some(json!({ "number": "555-0100" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.json("GET", "/api/degree2-requests", None).await;
    assert_eq!(status, StatusCode::OK);
    let requests = body.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["number"], json!("555-0100"));
    assert!(!requests[0]["time"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_rest_chat_rejects_empty_text_without_writing() {
    let app = TestApp::new();

    let (status, _) = app
        .json("POST", "/api/degree2-chat", Some(json!({ "name": "Hiram", "text": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!app.config.data_dir.join("degree2-chat.json").exists());

    let (_, body) = app.json("GET", "/api/degree2-chat", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_rest_chat_defaults_name() {
    let app = TestApp::new();

    let (status, _) = app
        .json("POST", "/api/degree2-chat", Some(json!({ "text": "hello" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.json("GET", "/api/degree2-chat", None).await;
    let messages: &Vec<Value> = body.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["name"], json!("Anonymous"));
    assert_eq!(messages[0]["text"], json!("hello"));
    assert!(!messages[0]["time"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_static_files_and_health() {
    let app = TestApp::new();
    std::fs::create_dir_all(&app.config.public_dir).unwrap();
    std::fs::write(app.config.public_dir.join("index.html"), "<h1>Lodge</h1>").unwrap();

    let (status, body) = app.send("GET", "/index.html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Lodge</h1>");

    let (status, _) = app.send("GET", "/missing.html", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_legacy_code_file_is_served_and_kept_verbatim() {
    let app = TestApp::new();
    std::fs::create_dir_all(&app.config.data_dir).unwrap();
    let path = app.config.data_dir.join("credits.json");
    std::fs::write(&path, r#"["alpha", 12345, "beta"]"#).unwrap();

    let (_, body) = app.json("GET", "/api/codes", None).await;
    assert_eq!(body, json!(["alpha", 12345, "beta"]));

    let (status, _) = app.json("POST", "/api/codes", Some(json!({ "code": "gamma" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = app.json("GET", "/api/codes", None).await;
    assert_eq!(body, json!(["alpha", 12345, "beta", "gamma"]));

    let (status, _) = app.json("DELETE", "/api/codes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!(["alpha", "beta", "gamma"]));
}

#[tokio::test]
async fn test_legacy_chat_file_survives_new_posts() {
    let app = TestApp::new();
    std::fs::create_dir_all(&app.config.data_dir).unwrap();
    let path = app.config.data_dir.join("degree2-chat.json");
    let legacy = json!([
        { "name": "Old", "text": "keep me", "time": "9:00:00 AM" },
        { "name": null, "text": "socket msg", "extra": true }
    ]);
    std::fs::write(&path, legacy.to_string()).unwrap();

    let (_, body) = app.json("GET", "/api/degree2-chat", None).await;
    assert_eq!(body[0]["text"], json!("keep me"));
    assert_eq!(body[1]["name"], json!("Anonymous"));
    assert_eq!(body[1]["text"], json!("socket msg"));

    let (status, _) = app
        .json("POST", "/api/degree2-chat", Some(json!({ "text": "new" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let on_disk = on_disk.as_array().unwrap();
    assert_eq!(on_disk.len(), 3);
    assert_eq!(&on_disk[..2], legacy.as_array().unwrap().as_slice());
    assert_eq!(on_disk[2]["text"], json!("new"));
}
