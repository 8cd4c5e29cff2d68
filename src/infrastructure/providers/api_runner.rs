//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::application::ports::EnhancementError;

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout: Duration) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패 사유를 보강 오류로 분류한다.
pub async fn send_json(
    provider_name: &str,
    request: RequestBuilder,
) -> Result<Value, EnhancementError> {
    // 요청 URL에는 `?key=` 자격 증명이 실릴 수 있으므로 오류 문구에서 뺀다.
    let response = request.send().await.map_err(|err| {
        let err = err.without_url();
        if err.is_timeout() {
            EnhancementError::Transport(format!("{provider_name}: request timed out"))
        } else {
            EnhancementError::Transport(format!("{provider_name}: {err}"))
        }
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        EnhancementError::Transport(format!(
            "{provider_name}: failed to read response body: {}",
            err.without_url()
        ))
    })?;

    if !status.is_success() {
        return Err(classify_status(provider_name, status, &body));
    }

    serde_json::from_str(&body).map_err(|err| {
        EnhancementError::Malformed(format!("{provider_name}: invalid JSON response: {err}"))
    })
}

pub(super) fn classify_status(provider_name: &str, status: StatusCode, body: &str) -> EnhancementError {
    let message = format!("{provider_name} ({status}): {}", truncate(body, 300));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EnhancementError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => EnhancementError::Quota(message),
        _ => EnhancementError::Transport(message),
    }
}

/// 응답 구조(`parts[].text`)에서 텍스트를 이어 붙인다.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items.iter().map(collect_text).collect::<Vec<_>>().join(""),
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            map.get("parts").map(collect_text).unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert!(matches!(
            classify_status("Gemini", StatusCode::UNAUTHORIZED, "no"),
            EnhancementError::Auth(_)
        ));
        assert!(matches!(
            classify_status("Gemini", StatusCode::FORBIDDEN, "no"),
            EnhancementError::Auth(_)
        ));
        assert!(matches!(
            classify_status("Gemini", StatusCode::TOO_MANY_REQUESTS, "quota"),
            EnhancementError::Quota(_)
        ));
        assert!(matches!(
            classify_status("Gemini", StatusCode::BAD_GATEWAY, "oops"),
            EnhancementError::Transport(_)
        ));
    }

    #[test]
    fn collects_text_from_parts() {
        let content = json!({
            "parts": [ { "text": "## Role\n" }, { "text": "Poet" } ],
            "role": "model"
        });
        assert_eq!(collect_text(&content), "## Role\nPoet");
    }
}
