use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use promptrefine::application::config::Config;
use promptrefine::application::ports::{EnhancementError, EnhancementPort};
use promptrefine::interface::composition::AppComposition;
use promptrefine::interface::http::create_router;
use serde_json::{Value, json};

/// 섹션 구조를 유지한 채 기본 제약 문구만 바꾸는 보강기.
struct RewordingEnhancer;

#[async_trait]
impl EnhancementPort for RewordingEnhancer {
    fn name(&self) -> &'static str {
        "reword"
    }

    async fn enhance(&self, draft: &str) -> Result<String, EnhancementError> {
        Ok(draft.replace("Be concise", "Keep it tight"))
    }
}

fn server_with(config: Config, enhancer: Option<Box<dyn EnhancementPort>>) -> TestServer {
    let app = Arc::new(AppComposition::with_enhancer(config, enhancer));
    TestServer::new(create_router(app)).expect("Failed to create test server")
}

fn setup() -> TestServer {
    server_with(Config::default(), None)
}

mod healthz {
    use super::*;

    #[tokio::test]
    async fn returns_ok() {
        let server = setup();
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "ok");
    }
}

mod refine {
    use super::*;

    #[tokio::test]
    async fn returns_seven_sections_and_rationale() {
        let server = setup();
        let response = server
            .post("/refine")
            .json(&json!({ "prompt": "write a blog post about cats" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let refined = body["refined_prompt"].as_str().unwrap();
        assert!(refined.starts_with("## Role\n"));
        assert!(refined.contains("## Self-Check"));
        assert!(refined.contains("write a blog post about cats"));
        assert_eq!(body["used_ai"], false);

        let actions: Vec<&str> = body["rationale"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["action"].as_str().unwrap())
            .collect();
        assert_eq!(actions, ["added", "kept", "added", "added", "added", "added"]);
        assert_eq!(body["rationale_text"].as_str().unwrap().lines().count(), 6);
    }

    #[tokio::test]
    async fn empty_prompt_is_bad_request() {
        let server = setup();
        let response = server.post("/refine").json(&json!({ "prompt": "   " })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Please provide a prompt to refine");
    }

    #[tokio::test]
    async fn over_long_prompt_is_bad_request() {
        let mut config = Config::default();
        config.defaults.max_prompt_chars = Some(20);
        let server = server_with(config, None);

        let response = server
            .post("/refine")
            .json(&json!({ "prompt": "a prompt that is clearly longer than twenty characters" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn enhancement_follows_request_flag() {
        let server = server_with(Config::default(), Some(Box::new(RewordingEnhancer)));

        let enhanced: Value = server
            .post("/refine")
            .json(&json!({ "prompt": "write a poem" }))
            .await
            .json();
        assert_eq!(enhanced["used_ai"], true);
        assert!(enhanced["refined_prompt"].as_str().unwrap().contains("Keep it tight"));

        let plain: Value = server
            .post("/refine")
            .json(&json!({ "prompt": "write a poem", "enhance": false }))
            .await
            .json();
        assert_eq!(plain["used_ai"], false);
        assert!(plain["refined_prompt"].as_str().unwrap().contains("Be concise"));
    }

    #[tokio::test]
    async fn config_can_disable_enhancement_by_default() {
        let mut config = Config::default();
        config.defaults.enhance = Some(false);
        let server = server_with(config, Some(Box::new(RewordingEnhancer)));

        let body: Value = server
            .post("/refine")
            .json(&json!({ "prompt": "write a poem" }))
            .await
            .json();
        assert_eq!(body["used_ai"], false);
    }
}

mod download {
    use super::*;

    #[tokio::test]
    async fn serves_latest_result_once() {
        let server = setup();

        server.get("/download").await.assert_status_not_found();

        let refined: Value = server
            .post("/refine")
            .json(&json!({ "prompt": "write a poem" }))
            .await
            .json();
        let latest: Value = server
            .post("/refine")
            .json(&json!({ "prompt": "summarize this article" }))
            .await
            .json();
        assert_ne!(refined["refined_prompt"], latest["refined_prompt"]);

        let response = server.get("/download").await;
        response.assert_status_ok();
        assert_eq!(response.text(), latest["refined_prompt"].as_str().unwrap());

        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"refined_prompt_"));
        assert!(disposition.ends_with(".txt\""));

        let response = server.get("/download").await;
        response.assert_status_not_found();
        assert_eq!(response.text(), "No refined prompt available");
    }
}

mod rate_limit {
    use super::*;

    fn limited(per_minute: u32) -> TestServer {
        let mut config = Config::default();
        config.server.rate_limit_per_minute = Some(per_minute);
        server_with(config, None)
    }

    #[tokio::test]
    async fn rejects_requests_over_the_limit() {
        let server = limited(2);

        for _ in 0..2 {
            server
                .post("/refine")
                .json(&json!({ "prompt": "write a poem" }))
                .await
                .assert_status_ok();
        }

        server
            .post("/refine")
            .json(&json!({ "prompt": "write a poem" }))
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);

        // 다른 경로는 제한 대상이 아니다.
        server.get("/healthz").await.assert_status_ok();
    }

    async fn refine_from(server: &TestServer, forwarded_for: &'static str) -> StatusCode {
        server
            .post("/refine")
            .add_header(
                HeaderName::from_static("x-forwarded-for"),
                HeaderValue::from_static(forwarded_for),
            )
            .json(&json!({ "prompt": "write a poem" }))
            .await
            .status_code()
    }

    #[tokio::test]
    async fn rotating_forwarded_headers_do_not_reset_the_limit() {
        let server = limited(1);

        assert_eq!(refine_from(&server, "203.0.113.1").await, StatusCode::OK);
        assert_eq!(
            refine_from(&server, "203.0.113.2").await,
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            refine_from(&server, "203.0.113.3").await,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn trusted_proxy_headers_count_clients_separately() {
        let mut config = Config::default();
        config.server.rate_limit_per_minute = Some(1);
        config.server.trust_proxy_headers = Some(true);
        let server = server_with(config, None);

        assert_eq!(refine_from(&server, "203.0.113.1").await, StatusCode::OK);
        assert_eq!(refine_from(&server, "203.0.113.2").await, StatusCode::OK);
        assert_eq!(
            refine_from(&server, "203.0.113.1").await,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn zero_disables_limiting() {
        let server = limited(0);
        for _ in 0..12 {
            server
                .post("/refine")
                .json(&json!({ "prompt": "write a poem" }))
                .await
                .assert_status_ok();
        }
    }
}
