#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use recruitment_tracker::{
    config::Config,
    database::{memory::MemoryStore, Store},
    models::user::{Role, User},
    routes::build_app,
    services::workflow::TransitionPolicy,
    utils::{crypto::hash_password, time::now},
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "secret123";
const BOUNDARY: &str = "----recruitment-tracker-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub uploads: TempDir,
}

pub struct Session {
    pub user_id: Uuid,
    pub token: String,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(TransitionPolicy::Permissive)
}

pub fn spawn_app_with(policy: TransitionPolicy) -> TestApp {
    let uploads = tempfile::tempdir().expect("tempdir");
    let mut config = Config::for_memory_store(uploads.path().to_string_lossy().to_string());
    config.transition_policy = policy;

    let store = Arc::new(MemoryStore::new());
    let shared: Arc<dyn Store> = store.clone();
    let state = AppState::new(shared, &config).expect("app state");
    TestApp {
        router: build_app(state, &config),
        store,
        uploads,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, JsonValue) {
        let resp = self.router.clone().oneshot(req).await.expect("response");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: JsonValue,
    ) -> (StatusCode, JsonValue) {
        self.json_request(Method::POST, uri, token, body).await
    }

    pub async fn put_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: JsonValue,
    ) -> (StatusCode, JsonValue) {
        self.json_request(Method::PUT, uri, token, body).await
    }

    async fn json_request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: JsonValue,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        token: &str,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> (StatusCode, JsonValue) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(fields, files)))
            .unwrap();
        self.send(req).await
    }

    /// Registers through the API and logs in with the same role.
    pub async fn register(&self, role: &str, first: &str, last: &str) -> Session {
        let email = format!("{}.{}@example.com", first.to_lowercase(), Uuid::new_v4().simple());
        let (status, body) = self
            .post_json(
                "/api/auth/register",
                None,
                json!({
                    "firstName": first,
                    "lastName": last,
                    "email": email,
                    "password": PASSWORD,
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        self.login(&email, PASSWORD, role).await
    }

    /// HR accounts cannot self-register, so they are written straight to the store.
    pub async fn seed_hr(&self) -> Session {
        let email = format!("hr.{}@example.com", Uuid::new_v4().simple());
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Helen".into(),
            last_name: "Hr".into(),
            email: email.clone(),
            password_hash: hash_password(PASSWORD).expect("hash"),
            role: Role::Hr,
            created_at: now(),
        };
        self.store.insert_user(&user).await.expect("seed hr");
        self.login(&email, PASSWORD, "HR").await
    }

    pub async fn login(&self, email: &str, password: &str, user_type: &str) -> Session {
        let (status, body) = self
            .post_json(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password, "userType": user_type }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        Session {
            user_id: body["data"]["userId"].as_str().unwrap().parse().unwrap(),
            token: body["data"]["token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn create_job(&self, recruiter: &Session, title: &str) -> Uuid {
        let (status, body) = self
            .post_json(
                "/api/jobs",
                Some(&recruiter.token),
                json!({ "title": title, "description": format!("{title} role") }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create job failed: {body}");
        id_at(&body, "/data/id")
    }

    pub async fn create_candidate(
        &self,
        recruiter: &Session,
        first: &str,
        last: &str,
        email: &str,
    ) -> Uuid {
        let (status, body) = self
            .post_multipart(
                "/api/candidates",
                &recruiter.token,
                &[("firstName", first), ("lastName", last), ("email", email)],
                &[],
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create candidate failed: {body}");
        id_at(&body, "/data/id")
    }

    pub async fn link(&self, recruiter: &Session, job_id: Uuid, candidate_id: Uuid) -> Uuid {
        let (status, body) = self
            .post_json(
                &format!("/api/jobs/{job_id}/apply"),
                Some(&recruiter.token),
                json!({ "candidateId": candidate_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "link failed: {body}");
        id_at(&body, "/data/applicationId")
    }

    pub async fn assign(&self, recruiter: &Session, job_id: Uuid, kind: &str, user_id: Uuid) {
        let (status, body) = self
            .post_json(
                &format!("/api/jobs/{job_id}/{kind}"),
                Some(&recruiter.token),
                json!({ "userId": user_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "assign {kind} failed: {body}");
    }

    pub async fn set_status(
        &self,
        session: &Session,
        application_id: Uuid,
        status: &str,
    ) -> (StatusCode, JsonValue) {
        self.put_json(
            &format!("/api/applications/{application_id}/status"),
            Some(&session.token),
            json!({ "newStatus": status }),
        )
        .await
    }

    pub async fn schedule(
        &self,
        recruiter: &Session,
        application_id: Uuid,
        interviewer_ids: &[Uuid],
    ) -> (StatusCode, JsonValue) {
        self.post_json(
            "/api/interviews",
            Some(&recruiter.token),
            json!({
                "applicationId": application_id,
                "roundNumber": 1,
                "interviewType": "Technical",
                "scheduledAt": "2030-03-01T10:00:00Z",
                "interviewerIds": interviewer_ids,
            }),
        )
        .await
    }

    pub async fn application_status(&self, recruiter: &Session, application_id: Uuid) -> String {
        let (status, body) = self
            .get(
                &format!("/api/applications/{application_id}"),
                Some(&recruiter.token),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "details failed: {body}");
        body["data"]["applicationStatus"].as_str().unwrap().to_string()
    }
}

pub fn id_at(body: &JsonValue, pointer: &str) -> Uuid {
    body.pointer(pointer)
        .and_then(JsonValue::as_str)
        .unwrap_or_else(|| panic!("no id at {pointer} in {body}"))
        .parse()
        .expect("uuid")
}

pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, filename, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
