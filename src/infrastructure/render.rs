//! 정제 결과의 출력 표현(콘솔 텍스트/JSON) 모듈.

use serde::Serialize;

use crate::application::ports::Reporter;
use crate::domain::prompt::{RationaleEntry, RefinementResult};

/// CLI `--json`과 HTTP 응답이 공유하는 직렬화 뷰.
#[derive(Debug, Clone, Serialize)]
pub struct RefinementView<'a> {
    pub refined_prompt: &'a str,
    pub rationale: &'a [RationaleEntry],
    pub rationale_text: String,
    pub used_ai: bool,
}

impl<'a> From<&'a RefinementResult> for RefinementView<'a> {
    fn from(result: &'a RefinementResult) -> Self {
        Self {
            refined_prompt: &result.refined_text,
            rationale: &result.rationale,
            rationale_text: result.rationale_text(),
            used_ai: result.used_ai,
        }
    }
}

/// 결과를 JSON 문자열로 직렬화한다.
pub fn render_json(result: &RefinementResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RefinementView::from(result))
}

/// 정제 본문, 근거, 보강 여부를 리포터로 출력한다.
pub fn report_refinement(reporter: &dyn Reporter, result: &RefinementResult) {
    reporter.section("Refined Prompt");
    for line in result.refined_text.lines() {
        reporter.raw(line);
    }

    reporter.section("Rationale");
    for entry in &result.rationale {
        reporter.raw(&format!("- {entry}"));
    }

    reporter.section("Summary");
    reporter.kv("AI enhanced", if result.used_ai { "yes" } else { "no" });
}
