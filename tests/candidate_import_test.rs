mod common;

use axum::http::StatusCode;
use common::spawn_app;
use rust_xlsxwriter::Workbook;

fn roster_xlsx(rows: &[[&str; 4]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["First Name", "Last Name", "Email", "Phone"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

#[tokio::test]
async fn spreadsheet_import_counts_every_skip_reason() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    app.create_candidate(&recruiter, "Jane", "Doe", "jane@x.com").await;
    let users_before = app.store.user_count();

    let data = roster_xlsx(&[
        ["Jane", "Doe", "jane@x.com", ""],
        ["Amir", "Khan", "amir@x.com", "555-0101"],
        ["Amir", "Again", "AMIR@x.com", ""],
        ["No", "Email", "", "555-0102"],
        ["Lena", "Ortiz", "lena@x.com", ""],
    ]);
    let (status, body) = app
        .post_multipart(
            "/api/candidates/bulk-upload",
            &recruiter.token,
            &[],
            &[("file", "roster.xlsx", data.as_slice())],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["created"], 2);
    assert_eq!(body["data"]["skippedExisting"], 1);
    assert_eq!(body["data"]["skippedDuplicates"], 1);
    assert_eq!(body["data"]["skippedBlank"], 1);
    assert_eq!(app.store.user_count(), users_before + 2);

    // Imported candidates can sign in with the default password.
    app.login("lena@x.com", "Lena@Ortiz", "Candidate").await;

    let (status, body) = app.get("/api/candidates", Some(&recruiter.token)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0]["email"], "lena@x.com");
}

#[tokio::test]
async fn csv_roster_is_accepted() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    let data = b"first,last,email,phone\nOmar,Said,omar@x.com,\nPia,Berg,pia@x.com,555\n";

    let (status, body) = app
        .post_multipart(
            "/api/candidates/bulk-upload",
            &recruiter.token,
            &[],
            &[("file", "people.csv", data)],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["created"], 2);
    assert_eq!(app.store.candidate_count(), 2);
}

#[tokio::test]
async fn failed_import_leaves_nothing_behind() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;
    app.store.fail_account_creation_for("second@x.com");
    let users_before = app.store.user_count();

    let data = roster_xlsx(&[
        ["First", "Row", "first@x.com", ""],
        ["Second", "Row", "second@x.com", ""],
        ["Third", "Row", "third@x.com", ""],
    ]);
    let (status, body) = app
        .post_multipart(
            "/api/candidates/bulk-upload",
            &recruiter.token,
            &[],
            &[("file", "roster.xlsx", data.as_slice())],
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "An error occurred during bulk creation.");
    assert_eq!(app.store.user_count(), users_before);
    assert_eq!(app.store.candidate_count(), 0);
}

#[tokio::test]
async fn upload_without_a_file_is_a_bad_request() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;

    let (status, _) = app
        .post_multipart("/api/candidates/bulk-upload", &recruiter.token, &[], &[])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_multipart(
            "/api/candidates/bulk-upload",
            &recruiter.token,
            &[],
            &[("file", "roster.txt", b"hello")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_candidate_with_cv_and_duplicate_email() {
    let app = spawn_app();
    let recruiter = app.register("Recruiter", "Rita", "Recruiter").await;

    let (status, body) = app
        .post_multipart(
            "/api/candidates",
            &recruiter.token,
            &[
                ("firstName", "Jane"),
                ("lastName", "Doe"),
                ("email", "jane@x.com"),
                ("phone", "555-0100"),
            ],
            &[("cv", "Jane CV.pdf", b"%PDF-1.4 resume")],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let cv_path = body["data"]["cvPath"].as_str().unwrap().to_string();
    assert!(cv_path.starts_with("cvs/"));
    assert!(cv_path.ends_with("_Jane_CV.pdf"));
    assert!(app.uploads.path().join(&cv_path).exists());

    let (status, body) = app.get(&format!("/files/{cv_path}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, _) = app
        .post_multipart(
            "/api/candidates",
            &recruiter.token,
            &[("firstName", "J"), ("lastName", "D"), ("email", "JANE@x.com")],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_multipart(
            "/api/candidates",
            &recruiter.token,
            &[("firstName", "Fake"), ("lastName", "Pdf"), ("email", "fake@x.com")],
            &[("cv", "cv.pdf", b"not a pdf")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.candidate_count(), 1);
}
