//! 모델 응답 본문에서 보강된 프롬프트를 추출한다.

use serde::Deserialize;

use crate::application::ports::EnhancementError;

#[derive(Debug, Deserialize)]
struct EnhancedPayload {
    refined_prompt: String,
    #[serde(default)]
    rationale: Option<String>,
}

/// 코드 펜스를 벗기고 JSON(`refined_prompt`)이면 그 값을, 아니면 본문 전체를 반환한다.
pub fn parse_enhanced_text(raw: &str) -> Result<String, EnhancementError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(EnhancementError::Empty);
    }

    if body.starts_with('{') {
        let payload: EnhancedPayload = serde_json::from_str(body)
            .map_err(|err| EnhancementError::Malformed(format!("invalid JSON payload: {err}")))?;
        if let Some(rationale) = payload.rationale.as_deref() {
            tracing::debug!(rationale, "model rationale");
        }
        let refined = payload.refined_prompt.trim();
        if refined.is_empty() {
            return Err(EnhancementError::Empty);
        }
        return Ok(refined.to_string());
    }

    Ok(body.to_string())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // ```json 처럼 언어 태그가 붙은 첫 줄은 통째로 버린다.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
