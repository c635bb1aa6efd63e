mod common;

use axum::http::StatusCode;
use common::{id_at, spawn_app, Session, TestApp};
use serde_json::json;
use uuid::Uuid;

struct Hiring {
    recruiter: Session,
    hr: Session,
    jane: Session,
    application_id: Uuid,
}

async fn shortlisted_application(app: &TestApp) -> Hiring {
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let hr = app.seed_hr().await;
    let job_id = app.create_job(&recruiter, "Backend Engineer").await;
    let candidate_id = app
        .create_candidate(&recruiter, "Jane", "Doe", "jane@x.com")
        .await;
    let jane = app.login("jane@x.com", "Jane@Doe", "Candidate").await;
    let application_id = app.link(&recruiter, job_id, candidate_id).await;
    let (status, _) = app.set_status(&recruiter, application_id, "Shortlisted").await;
    assert_eq!(status, StatusCode::OK);
    Hiring {
        recruiter,
        hr,
        jane,
        application_id,
    }
}

#[tokio::test]
async fn candidate_uploads_and_hr_verifies() {
    let app = spawn_app();
    let h = shortlisted_application(&app).await;
    let uri = format!("/api/applications/{}/documents", h.application_id);

    let (status, body) = app
        .post_multipart(
            &uri,
            &h.jane.token,
            &[("documentType", "ID Card")],
            &[("file", "passport scan.png", &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A])],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["verificationStatus"], "Pending");
    assert_eq!(body["data"]["documentType"], "ID Card");
    let file_url = body["data"]["fileUrl"].as_str().unwrap().to_string();
    assert!(file_url.starts_with("/files/documents/"));
    let document_id = id_at(&body, "/data/id");

    let (status, _) = app.get(&file_url, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .put_json(
            &format!("/api/hr/documents/{document_id}/verify"),
            Some(&h.hr.token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["verificationStatus"], "Verified");

    let (status, body) = app.get(&uri, Some(&h.jane.token)).await;
    assert_eq!(status, StatusCode::OK);
    let documents = body["data"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["verificationStatus"], "Verified");
    assert_eq!(documents[0]["uploaderName"], "Jane Doe");

    let (status, _) = app
        .put_json(
            &format!("/api/hr/documents/{}/reject", Uuid::new_v4()),
            Some(&h.hr.token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn candidates_cannot_touch_foreign_applications() {
    let app = spawn_app();
    let h = shortlisted_application(&app).await;
    app.create_candidate(&h.recruiter, "Max", "Mustermann", "max@x.com")
        .await;
    let max = app.login("max@x.com", "Max@Mustermann", "Candidate").await;
    let uri = format!("/api/applications/{}/documents", h.application_id);

    let (status, _) = app
        .post_multipart(
            &uri,
            &max.token,
            &[("documentType", "Degree")],
            &[("file", "degree.pdf", b"%PDF-1.7")],
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&uri, Some(&max.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post_multipart(&uri, &h.jane.token, &[], &[("file", "degree.pdf", b"%PDF-1.7")])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn offer_letter_and_final_selection() {
    let app = spawn_app();
    let h = shortlisted_application(&app).await;

    let (status, body) = app.get("/api/hr/dashboard", Some(&h.hr.token)).await;
    assert_eq!(status, StatusCode::OK);
    let board = body["data"].as_array().unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0]["status"], "Shortlisted");

    let (status, body) = app
        .post_multipart(
            &format!("/api/applications/{}/documents/offer-letter", h.application_id),
            &h.hr.token,
            &[],
            &[("file", "offer.pdf", b"%PDF-1.4 offer")],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["documentType"], "Offer Letter");

    let (status, _) = app
        .post_multipart(
            &format!("/api/applications/{}/documents/offer-letter", h.application_id),
            &h.jane.token,
            &[],
            &[("file", "offer.pdf", b"%PDF-1.4 forged")],
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put_json(
            &format!("/api/hr/applications/{}/select", h.application_id),
            Some(&h.hr.token),
            json!({ "joiningDate": "2030-02-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "Hired");
    assert_eq!(body["data"]["joiningDate"], "2030-02-01");

    let (_, body) = app
        .get("/api/candidate/my-applications", Some(&h.jane.token))
        .await;
    assert_eq!(body["data"][0]["applicationStatus"], "Hired");
    assert_eq!(body["data"][0]["joiningDate"], "2030-02-01");

    let (_, body) = app.get("/api/hr/dashboard", Some(&h.recruiter.token)).await;
    assert_eq!(body["data"][0]["status"], "Hired");
}

#[tokio::test]
async fn candidate_portal_profile_jobs_and_cv() {
    let app = spawn_app();
    let h = shortlisted_application(&app).await;

    let (status, body) = app.get("/api/candidate/me", Some(&h.jane.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "jane@x.com");
    assert!(body["data"]["cvPath"].is_null());

    let (status, body) = app.get("/api/candidate/jobs", Some(&h.jane.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Backend Engineer");

    let (status, body) = app
        .post_multipart(
            "/api/candidate/cv-upload",
            &h.jane.token,
            &[],
            &[("cv", "resume.docx", b"PK\x03\x04docx")],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["cvPath"].as_str().unwrap().ends_with("_resume.docx"));

    let (_, body) = app.get("/api/candidate/me", Some(&h.jane.token)).await;
    assert!(body["data"]["cvPath"].as_str().unwrap().starts_with("cvs/"));
}

#[tokio::test]
async fn permissive_selection_hires_from_any_status() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let hr = app.seed_hr().await;
    let job_id = app.create_job(&recruiter, "Site Reliability Engineer").await;

    let rejected = app
        .link(
            &recruiter,
            job_id,
            app.create_candidate(&recruiter, "Rex", "Stone", "rex@x.com").await,
        )
        .await;
    let (status, _) = app.set_status(&recruiter, rejected, "Rejected").await;
    assert_eq!(status, StatusCode::OK);
    let applied = app
        .link(
            &recruiter,
            job_id,
            app.create_candidate(&recruiter, "Ann", "Park", "ann@x.com").await,
        )
        .await;

    for (application_id, joining_date) in [(rejected, "2030-04-01"), (applied, "2030-05-15")] {
        let (status, body) = app
            .put_json(
                &format!("/api/hr/applications/{application_id}/select"),
                Some(&hr.token),
                json!({ "joiningDate": joining_date }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["status"], "Hired");
        assert_eq!(body["data"]["joiningDate"], joining_date);
        assert_eq!(app.application_status(&recruiter, application_id).await, "Hired");
    }

    let (_, body) = app.get("/api/hr/dashboard", Some(&hr.token)).await;
    let joining: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["joiningDate"].as_str().unwrap())
        .collect();
    assert_eq!(joining, ["2030-05-15", "2030-04-01"]);
}

#[tokio::test]
async fn hr_dashboard_lists_the_late_pipeline_newest_first() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let hr = app.seed_hr().await;
    let job_id = app.create_job(&recruiter, "Frontend Engineer").await;

    let mut by_status = Vec::new();
    for (first, status) in [
        ("Amy", "Applied"),
        ("Ola", "On Hold"),
        ("Rob", "Rejected"),
        ("Sam", "Shortlisted"),
        ("Ivy", "Interview"),
        ("Oto", "Offered"),
    ] {
        let email = format!("{}@x.com", first.to_lowercase());
        let candidate_id = app.create_candidate(&recruiter, first, "Doe", &email).await;
        let application_id = app.link(&recruiter, job_id, candidate_id).await;
        if status != "Applied" {
            let (code, body) = app.set_status(&recruiter, application_id, status).await;
            assert_eq!(code, StatusCode::OK, "{status}: {body}");
        }
        by_status.push((status, application_id));
    }

    let (status, body) = app.get("/api/hr/dashboard", Some(&hr.token)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let rows: Vec<(String, Uuid)> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| {
            (
                row["status"].as_str().unwrap().to_string(),
                row["applicationId"].as_str().unwrap().parse().unwrap(),
            )
        })
        .collect();

    let expected: Vec<(String, Uuid)> = by_status
        .iter()
        .rev()
        .filter(|(status, _)| matches!(*status, "On Hold" | "Shortlisted" | "Offered"))
        .map(|(status, id)| (status.to_string(), *id))
        .collect();
    assert_eq!(rows, expected);

    let reviewer = app.register("Reviewer", "Rhea", "Reviewer").await;
    let (status, _) = app.get("/api/hr/dashboard", Some(&reviewer.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
