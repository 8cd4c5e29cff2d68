//! HTTP 요청 핸들러: 정제, 최근 결과 다운로드, 헬스 체크.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::prompt::RefineRequest;
use crate::infrastructure::render::RefinementView;
use crate::interface::composition::AppComposition;

#[derive(Debug, Deserialize)]
pub struct RefineInput {
    #[serde(default)]
    pub prompt: String,
    /// 생략하면 설정의 `defaults.enhance`를 따른다.
    pub enhance: Option<bool>,
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn refine(
    State(app): State<Arc<AppComposition>>,
    Json(input): Json<RefineInput>,
) -> Response {
    let request = RefineRequest {
        prompt: input.prompt,
        allow_enhancement: input
            .enhance
            .unwrap_or_else(|| app.config().enhance_by_default()),
    };

    match app.refine_usecase().execute(request).await {
        Ok(result) => Json(RefinementView::from(&result)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "rejected refine request");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn download(State(app): State<Arc<AppComposition>>) -> Response {
    match app.download_usecase().execute() {
        Some(artifact) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.filename),
                ),
            ],
            artifact.content,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "No refined prompt available").into_response(),
    }
}
