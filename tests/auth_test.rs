mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{test_config, Factory, TestApp};
use timetable_planner::config::Config;
use timetable_planner::services::AuthService;

#[tokio::test]
async fn test_registered_student_can_plan_timetables() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": "  Kim.Haksaeng@SNU.ac.kr ",
            "password": "sugang-2025",
            "name": " 김학생 "
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], "kim.haksaeng@snu.ac.kr");
    assert_eq!(body["user"]["name"], "김학생");
    let bearer = format!("Bearer {}", body["token"].as_str().unwrap());

    let created = app
        .server
        .post("/api/timetables")
        .add_header("Authorization", bearer.clone())
        .json(&json!({ "name": "1학기 시간표", "year": 2025, "semester": "SPRING" }))
        .await;
    created.assert_status(StatusCode::OK);
    assert_eq!(created.json::<serde_json::Value>()["user_id"], user_id.as_str());

    let me = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", bearer)
        .await;
    me.assert_status(StatusCode::OK);

    let me: serde_json::Value = me.json();
    assert_eq!(me["id"], user_id.as_str());
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_registration_rejects_incomplete_accounts() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "email": "   ", "password": "sugang-2025", "name": "김학생" }), "Email is required"),
        (json!({ "email": "a@snu.ac.kr", "password": "1234567", "name": "김학생" }), "at least 8 characters"),
        (json!({ "email": "a@snu.ac.kr", "password": "sugang-2025", "name": " " }), "Name is required"),
    ];

    for (payload, message) in cases {
        let response = app.server.post("/api/auth/register").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert!(
            body["details"].as_str().unwrap().contains(message),
            "expected {:?} in {}",
            message,
            body
        );
    }
}

#[tokio::test]
async fn test_email_is_taken_regardless_of_case() {
    let app = TestApp::new().await;
    let auth = Factory::new(&app.state).create_user().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": auth.email.to_uppercase(),
            "password": "sugang-2025",
            "name": "이학생"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_token_identifies_the_account() {
    let app = TestApp::new().await;
    let auth = Factory::new(&app.state).create_user().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": format!("  {}  ", auth.email.to_uppercase()),
            "password": "TestPassword123!"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["id"], auth.user_id.to_string().as_str());

    let me = app
        .server
        .get("/api/auth/me")
        .add_header(
            "Authorization",
            format!("Bearer {}", body["token"].as_str().unwrap()),
        )
        .await;
    me.assert_status(StatusCode::OK);
    assert_eq!(me.json::<serde_json::Value>()["email"], auth.email.as_str());
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::new().await;
    let auth = Factory::new(&app.state).create_user().await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": auth.email, "password": "not-my-password" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@snu.ac.kr", "password": "TestPassword123!" }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<serde_json::Value>(),
        unknown_email.json::<serde_json::Value>()
    );
}

#[tokio::test]
async fn test_protected_routes_reject_unusable_credentials() {
    let app = TestApp::new().await;

    let foreign = Config {
        jwt_secret: "a-different-deployment-secret-of-32-chars".to_string(),
        ..test_config()
    };
    let foreign_token =
        AuthService::generate_token(Uuid::new_v4(), "kim@snu.ac.kr", &foreign).unwrap();

    let headers = [
        None,
        Some("Basic a2ltOnN1Z2FuZw==".to_string()),
        Some("Bearer not-a-jwt".to_string()),
        Some(format!("Bearer {}", foreign_token)),
    ];

    for path in ["/api/auth/me", "/api/timetables"] {
        for header in &headers {
            let mut request = app.server.get(path);
            if let Some(value) = header {
                request = request.add_header("Authorization", value.clone());
            }

            request.await.assert_status(StatusCode::UNAUTHORIZED);
        }
    }
}
