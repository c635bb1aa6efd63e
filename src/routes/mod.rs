pub mod applications;
pub mod auth;
pub mod candidate_portal;
pub mod candidates;
pub mod docs;
pub mod extract;
pub mod form;
pub mod health;
pub mod hr;
pub mod interviews;
pub mod jobs;
pub mod skills;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::{auth::require_bearer_auth, cors::cors_layer},
    AppState,
};

/// All API routes. Everything outside the public set needs a bearer token.
pub fn app_router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    let protected_api = Router::new()
        .route("/api/profile/me", get(auth::me))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/:id", get(jobs::get_job))
        .route("/api/jobs/:id/apply", post(jobs::apply_to_job))
        .route("/api/jobs/:id/reviewers", post(jobs::assign_reviewer))
        .route("/api/jobs/:id/interviewers", post(jobs::assign_interviewer))
        .route("/api/users/reviewers", get(users::list_reviewers))
        .route("/api/users/interviewers", get(users::list_interviewers))
        .route(
            "/api/skills",
            get(skills::list_skills).post(skills::create_skill),
        )
        .route(
            "/api/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route("/api/candidates/bulk-upload", post(candidates::bulk_upload))
        .route("/api/candidate/me", get(candidate_portal::me))
        .route("/api/candidate/jobs", get(candidate_portal::open_jobs))
        .route(
            "/api/candidate/my-applications",
            get(candidate_portal::my_applications),
        )
        .route("/api/candidate/cv-upload", post(candidate_portal::upload_cv))
        .route("/api/applications", get(applications::list_applications))
        .route("/api/applications/:id", get(applications::get_application))
        .route(
            "/api/applications/:id/comments",
            post(applications::add_comment),
        )
        .route(
            "/api/applications/:id/status",
            put(applications::update_status),
        )
        .route(
            "/api/applications/:id/documents",
            get(applications::list_documents).post(applications::upload_document),
        )
        .route(
            "/api/applications/:id/documents/offer-letter",
            post(applications::upload_offer_letter),
        )
        .route(
            "/api/reviewer/assigned-applications",
            get(applications::reviewer_assigned),
        )
        .route("/api/interviews", post(interviews::schedule_interview))
        .route("/api/interviews/:id", get(interviews::get_interview))
        .route(
            "/api/interviews/:id/feedback",
            post(interviews::submit_feedback),
        )
        .route(
            "/api/interviewer/assigned-interviews",
            get(interviews::assigned_interviews),
        )
        .route("/api/hr/dashboard", get(hr::dashboard))
        .route("/api/hr/documents/:id/verify", put(hr::verify_document))
        .route("/api/hr/documents/:id/reject", put(hr::reject_document))
        .route(
            "/api/hr/applications/:id/select",
            put(hr::finalize_selection),
        )
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth));

    public_api.merge(protected_api).with_state(state)
}

/// The full service: API routes, uploaded files under `/files`, and the HTTP layers.
pub fn build_app(state: AppState, config: &Config) -> Router {
    tracing::info!(uploads = %config.uploads_dir, "serving uploaded files under /files");

    app_router(state)
        .nest_service("/files", ServeDir::new(&config.uploads_dir))
        .layer(cors_layer(&config.cors_origin))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_mb * 1024 * 1024))
}
