pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::listing::handlers as listing;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job listing
        .route("/api/v1/jobs", get(listing::handle_list_jobs))
        .route(
            "/api/v1/jobs/filters",
            patch(listing::handle_update_filters).delete(listing::handle_clear_filters),
        )
        .route("/api/v1/jobs/refresh", post(listing::handle_refresh))
        // CV builder
        .route("/api/v1/cv", get(editor::handle_get_document))
        .route("/api/v1/cv/reset", post(editor::handle_reset))
        .route("/api/v1/cv/fields", patch(editor::handle_update_field))
        .route("/api/v1/cv/skills", put(editor::handle_update_skills))
        .route("/api/v1/cv/sections/:section", post(editor::handle_add_item))
        .route(
            "/api/v1/cv/sections/:section/:index",
            patch(editor::handle_update_item).delete(editor::handle_remove_item),
        )
        .route("/api/v1/cv/preview", get(editor::handle_preview))
        // Export
        .route("/api/v1/cv/export", post(export::handle_start_export))
        .route(
            "/api/v1/cv/export/:id/status",
            get(export::handle_export_status),
        )
        .route("/api/v1/cv/export/:id", get(export::handle_download_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::export::tests::static_rasterizer;
    use crate::export::ExportService;
    use crate::listing::seed::load_jobs;
    use crate::listing::JobBoard;

    fn test_state(exports: ExportService) -> AppState {
        let config = Config {
            refresh_delay: Duration::from_millis(20),
            ..Config::default()
        };
        AppState::new(config, JobBoard::new(load_jobs(None).unwrap()), exports)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    // ── health ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    // ── listing ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_jobs_unfiltered() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(&app, Method::GET, "/api/v1/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        let total = load_jobs(None).unwrap().len();
        assert_eq!(body["total"], total);
        assert_eq!(body["has_active_filters"], false);
        assert!(body["locations"].as_array().unwrap().contains(&json!("Remote")));
        assert!(body["jobs"][0]["posted_ago"].as_str().unwrap().ends_with("ago"));
    }

    #[tokio::test]
    async fn test_filter_then_clear() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            "/api/v1/jobs/filters",
            Some(json!({"search": "engineer", "location": "Berlin"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_active_filters"], true);
        let jobs = body["jobs"].as_array().unwrap();
        assert!(!jobs.is_empty());
        assert!(jobs.iter().all(|j| j["location"] == "Berlin"));

        let (status, body) = send_json(&app, Method::DELETE, "/api/v1/jobs/filters", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_active_filters"], false);
        assert_eq!(body["total"], load_jobs(None).unwrap().len());
    }

    #[tokio::test]
    async fn test_unknown_date_window_rejected() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            "/api/v1/jobs/filters",
            Some(json!({"posted_within": "year"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_posted_within_windows_on_loaded_seed() {
        let now = chrono::Utc::now();
        let postings = [
            ("fresh", 2),
            ("recent", 72),
            ("older", 20 * 24),
            ("stale", 90 * 24),
        ];
        let jobs: Vec<Value> = postings
            .iter()
            .map(|(id, hours_ago)| {
                json!({
                    "id": id,
                    "title": "Platform Engineer",
                    "description": "Runs the fleet",
                    "location": "Remote",
                    "dateTime": (now - chrono::Duration::hours(*hours_ago)).to_rfc3339(),
                })
            })
            .collect();
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut seed, Value::from(jobs).to_string().as_bytes()).unwrap();

        let config = Config {
            jobs_seed_path: Some(seed.path().to_path_buf()),
            ..Config::default()
        };
        let board = JobBoard::new(load_jobs(config.jobs_seed_path.as_deref()).unwrap());
        let app = build_router(AppState::new(config, board, ExportService::new(None)));

        let cases = [
            ("day", vec!["fresh"]),
            ("week", vec!["fresh", "recent"]),
            ("month", vec!["fresh", "recent", "older"]),
        ];
        for (window, expected) in cases {
            let (status, body) = send_json(
                &app,
                Method::PATCH,
                "/api/v1/jobs/filters",
                Some(json!({ "posted_within": window })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            let ids: Vec<&str> = body["jobs"]
                .as_array()
                .unwrap()
                .iter()
                .map(|j| j["id"].as_str().unwrap())
                .collect();
            assert_eq!(ids, expected, "window {window}");
        }

        let (_, body) = send_json(&app, Method::DELETE, "/api/v1/jobs/filters", None).await;
        assert_eq!(body["total"], 4);
    }

    #[tokio::test]
    async fn test_refresh_accepted_and_settles() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(&app, Method::POST, "/api/v1/jobs/refresh", None).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "refreshing");

        let (_, body) = send_json(&app, Method::GET, "/api/v1/jobs", None).await;
        assert_eq!(body["is_refreshing"], true);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let (_, body) = send_json(&app, Method::GET, "/api/v1/jobs", None).await;
        assert_eq!(body["is_refreshing"], false);
        assert_eq!(body["total"], load_jobs(None).unwrap().len());
    }

    // ── editor ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_document_starts_from_template() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(&app, Method::GET, "/api/v1/cv", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["name"], "Your Name");
        assert_eq!(body["skills_input"], "React, TypeScript, Tailwind CSS, Node.js");
    }

    #[tokio::test]
    async fn test_update_scalar_and_skills() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            "/api/v1/cv/fields",
            Some(json!({"field": "summary", "value": "Builds things."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["summary"], "Builds things.");

        let (_, body) = send_json(
            &app,
            Method::PUT,
            "/api/v1/cv/skills",
            Some(json!({"raw": "A,,B"})),
        )
        .await;
        assert_eq!(body["document"]["skills"], json!(["A", "", "B"]));
    }

    #[tokio::test]
    async fn test_unknown_scalar_field_rejected() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/v1/cv/fields",
            Some(json!({"field": "salary", "value": "lots"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_section_add_update_remove() {
        let app = build_router(test_state(ExportService::new(None)));

        let (status, body) =
            send_json(&app, Method::POST, "/api/v1/cv/sections/experience", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["index"], 1);
        let new_id = body["id"].as_u64().unwrap();
        assert_ne!(new_id, 1);

        let (status, body) = send_json(
            &app,
            Method::PATCH,
            "/api/v1/cv/sections/experience/1",
            Some(json!({"field": "company", "value": "Acme"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], true);
        assert_eq!(body["document"]["experience"][1]["company"], "Acme");
        assert_eq!(body["document"]["experience"][1]["id"], new_id);

        let (_, body) =
            send_json(&app, Method::DELETE, "/api/v1/cv/sections/experience/0", None).await;
        assert_eq!(body["applied"], true);
        let experience = body["document"]["experience"].as_array().unwrap();
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0]["id"], new_id);
    }

    #[tokio::test]
    async fn test_out_of_bounds_edit_is_reported_noop() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            "/api/v1/cv/sections/projects/9",
            Some(json!({"field": "name", "value": "ghost"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], false);
        assert_eq!(body["outcome"], "out_of_bounds");
        assert_eq!(body["len"], 1);

        let (status, body) =
            send_json(&app, Method::DELETE, "/api/v1/cv/sections/projects/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], false);
        assert_eq!(body["document"]["projects"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_field_from_other_section_rejected() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            "/api/v1/cv/sections/education/0",
            Some(json!({"field": "company", "value": "Acme"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send_json(&app, Method::POST, "/api/v1/cv/sections/hobbies", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_discards_edits() {
        let app = build_router(test_state(ExportService::new(None)));
        send_json(
            &app,
            Method::PATCH,
            "/api/v1/cv/fields",
            Some(json!({"field": "name", "value": "Ada"})),
        )
        .await;
        let (_, body) = send_json(&app, Method::POST, "/api/v1/cv/reset", None).await;
        assert_eq!(body["document"]["name"], "Your Name");
    }

    #[tokio::test]
    async fn test_preview_is_html() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, bytes) = send(&app, Method::GET, "/api/v1/cv/preview", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("id=\"cv-preview\""));
    }

    // ── export ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_export_skipped_without_rasterizer() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(&app, Method::POST, "/api/v1/cv/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "skipped");
        assert!(body["export_id"].is_null());
    }

    #[tokio::test]
    async fn test_export_then_download() {
        let app = build_router(test_state(ExportService::new(Some(static_rasterizer()))));
        let (status, body) = send_json(&app, Method::POST, "/api/v1/cv/export", None).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let id = body["export_id"].as_str().unwrap().to_string();

        let mut ready = false;
        for _ in 0..200 {
            let (_, body) =
                send_json(&app, Method::GET, &format!("/api/v1/cv/export/{id}/status"), None).await;
            if body["status"] == "ready" {
                ready = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(ready, "export never became ready");

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/cv/export/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cv.pdf\""
        );
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_unknown_export_not_found() {
        let app = build_router(test_state(ExportService::new(None)));
        let (status, body) = send_json(
            &app,
            Method::GET,
            "/api/v1/cv/export/7f1c1b9e-0000-4000-8000-000000000000/status",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
