mod common;

use axum::http::StatusCode;
use uuid::Uuid;

use common::{Factory, TestApp};
use timetable_planner::entity::sea_orm_active_enums::{Term, Weekday};

#[tokio::test]
async fn test_search_filters_by_term() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_fall_course("운영체제", &[]).await;
    factory.create_fall_course("컴파일러", &[]).await;
    factory
        .create_course(2025, Term::Spring, "컴퓨터구조", 3, &[])
        .await;

    let response = app
        .server
        .get("/api/courses")
        .add_query_param("year", 2025)
        .add_query_param("semester", "FALL")
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_elements"].as_u64().unwrap(), 2);
    assert_eq!(body["total_pages"].as_u64().unwrap(), 1);
    assert_eq!(body["page"].as_u64().unwrap(), 0);
    assert_eq!(body["size"].as_u64().unwrap(), 20);
    assert_eq!(body["content"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_matches_title_or_professor() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_fall_course("데이터베이스", &[]).await;
    factory.create_fall_course("데이터구조", &[]).await;
    factory.create_fall_course("선형대수", &[]).await;

    let response = app
        .server
        .get("/api/courses")
        .add_query_param("year", 2025)
        .add_query_param("semester", "FALL")
        .add_query_param("query", "데이터")
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_elements"].as_u64().unwrap(), 2);

    // Every factory course is taught by the same professor
    let response = app
        .server
        .get("/api/courses")
        .add_query_param("year", 2025)
        .add_query_param("semester", "FALL")
        .add_query_param("query", "홍길동")
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_elements"].as_u64().unwrap(), 3);
}

#[tokio::test]
async fn test_search_paginates() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    for i in 0..5 {
        factory.create_fall_course(&format!("세미나 {}", i), &[]).await;
    }

    let response = app
        .server
        .get("/api/courses")
        .add_query_param("year", 2025)
        .add_query_param("semester", "FALL")
        .add_query_param("page", 2)
        .add_query_param("size", 2)
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_elements"].as_u64().unwrap(), 5);
    assert_eq!(body["total_pages"].as_u64().unwrap(), 3);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_requires_term() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/courses")
        .add_query_param("year", 2025)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_course_with_slots() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let course = factory
        .create_fall_course(
            "확률과 통계",
            &[(Weekday::Tuesday, 660, 735), (Weekday::Thursday, 660, 735)],
        )
        .await;

    let response = app.server.get(&format!("/api/courses/{}", course.id)).await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["title"].as_str().unwrap(), "확률과 통계");
    assert_eq!(body["term"].as_str().unwrap(), "FALL");
    assert_eq!(body["credit"].as_i64().unwrap(), 3);

    let days: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["day"].as_str().unwrap())
        .collect();
    assert_eq!(days.len(), 2);
    assert!(days.contains(&"TUESDAY"));
    assert!(days.contains(&"THURSDAY"));
}

#[tokio::test]
async fn test_get_course_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get(&format!("/api/courses/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
