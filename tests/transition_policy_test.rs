mod common;

use axum::http::StatusCode;
use common::{id_at, spawn_app, spawn_app_with, Session, TestApp};
use recruitment_tracker::services::workflow::TransitionPolicy;
use serde_json::json;
use uuid::Uuid;

async fn new_application(app: &TestApp, recruiter: &Session, email: &str) -> Uuid {
    let job_id = app.create_job(recruiter, "Support Engineer").await;
    let candidate_id = app.create_candidate(recruiter, "Cam", "Doe", email).await;
    app.link(recruiter, job_id, candidate_id).await
}

#[tokio::test]
async fn permissive_policy_accepts_any_status() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let application_id = new_application(&app, &recruiter, "cam@x.com").await;

    for next in ["Hired", "Applied", "Rejected", "Shortlisted"] {
        let (status, body) = app.set_status(&recruiter, application_id, next).await;
        assert_eq!(status, StatusCode::OK, "{next}: {body}");
    }
}

#[tokio::test]
async fn enforced_policy_follows_the_transition_table() {
    let app = spawn_app_with(TransitionPolicy::Enforced);
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let interviewer = app.register("Interviewer", "Ian", "Interviewer").await;
    let application_id = new_application(&app, &recruiter, "cam@x.com").await;

    let (status, body) = app.set_status(&recruiter, application_id, "Hired").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = app.schedule(&recruiter, application_id, &[interviewer.user_id]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.set_status(&recruiter, application_id, "Screening").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.set_status(&recruiter, application_id, "Shortlisted").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .schedule(&recruiter, application_id, &[interviewer.user_id])
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let interview_id = id_at(&body, "/data/interviewId");
    assert_eq!(app.application_status(&recruiter, application_id).await, "Interview");

    let (status, _) = app.set_status(&recruiter, application_id, "Offered").await;
    assert_eq!(status, StatusCode::OK);

    // Offered has no Rejected edge, so the cascade is skipped.
    let (status, _) = app
        .post_json(
            &format!("/api/interviews/{interview_id}/feedback"),
            Some(&interviewer.token),
            json!({ "recommendation": "Reject" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.application_status(&recruiter, application_id).await, "Offered");
}

#[tokio::test]
async fn enforced_policy_guards_finalization_and_verification() {
    let app = spawn_app_with(TransitionPolicy::Enforced);
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let hr = app.seed_hr().await;
    let application_id = new_application(&app, &recruiter, "cam@x.com").await;
    let select = format!("/api/hr/applications/{application_id}/select");

    let (status, _) = app
        .put_json(&select, Some(&hr.token), json!({ "joiningDate": "2030-01-15" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.set_status(&recruiter, application_id, "Shortlisted").await;
    let (status, body) = app
        .put_json(&select, Some(&hr.token), json!({ "joiningDate": "2030-01-15" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = app
        .post_multipart(
            &format!("/api/applications/{application_id}/documents/offer-letter"),
            &hr.token,
            &[],
            &[("file", "offer.pdf", b"%PDF-1.4")],
        )
        .await;
    let document_id = id_at(&body, "/data/id");

    let (status, _) = app
        .put_json(
            &format!("/api/hr/documents/{document_id}/reject"),
            Some(&hr.token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .put_json(
            &format!("/api/hr/documents/{document_id}/verify"),
            Some(&hr.token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
