mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{spawn_app, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn register_login_and_profile() {
    let app = spawn_app();
    let (status, body) = app
        .post_json(
            "/api/auth/register",
            None,
            json!({
                "firstName": "Rita",
                "lastName": "Recruiter",
                "email": "rita@example.com",
                "password": PASSWORD,
                "role": "recruiter",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert!(body["data"]["userId"].is_string());

    let session = app.login("rita@example.com", PASSWORD, "Recruiter").await;
    let (status, body) = app.get("/api/profile/me", Some(&session.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "rita@example.com");
    assert_eq!(body["data"]["role"], "Recruiter");
    assert_eq!(body["data"]["firstName"], "Rita");
}

#[tokio::test]
async fn duplicate_email_and_closed_roles_are_rejected() {
    let app = spawn_app();
    let payload = |email: &str, role: &str| {
        json!({
            "firstName": "Sam",
            "lastName": "Smith",
            "email": email,
            "password": PASSWORD,
            "role": role,
        })
    };

    let (status, _) = app
        .post_json("/api/auth/register", None, payload("sam@example.com", "Reviewer"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post_json("/api/auth/register", None, payload("SAM@example.com", "Interviewer"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());

    for role in ["Candidate", "HR", "Admin"] {
        let (status, _) = app
            .post_json("/api/auth/register", None, payload("other@example.com", role))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "role {role} should be refused");
    }
}

#[tokio::test]
async fn login_requires_matching_password_and_user_type() {
    let app = spawn_app();
    let session = app.register("Interviewer", "Ian", "Interviewer").await;
    let (_, body) = app.get("/api/profile/me", Some(&session.token)).await;
    let email = body["data"]["email"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": "wrong-password", "userType": "Interviewer" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": PASSWORD, "userType": "Recruiter" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": PASSWORD, "userType": "Interviewer" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_need_a_valid_bearer_token() {
    let app = spawn_app();

    let (status, body) = app.get("/api/jobs", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app.get("/api/jobs", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/profile/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn roles_gate_each_surface() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let reviewer = app.register("Reviewer", "Rob", "Reviewer").await;
    let interviewer = app.register("Interviewer", "Ian", "Interviewer").await;

    let (status, _) = app.get("/api/jobs", Some(&reviewer.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/api/candidates", Some(&interviewer.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/api/hr/dashboard", Some(&reviewer.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .get("/api/reviewer/assigned-applications", Some(&recruiter.token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/api/candidate/me", Some(&recruiter.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/api/users/interviewers", Some(&recruiter.token)).await;
    assert_eq!(status, StatusCode::OK);
    let staff = body["data"].as_array().unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0]["userId"], interviewer.user_id.to_string());
}

#[tokio::test]
async fn openapi_document_is_public() {
    let app = spawn_app();
    let (status, body) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/jobs"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
