//! promptrefine library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::prompt::{RefineRequest, RefinementResult};
use interface::composition::AppComposition;

/// 라이브러리 직접 호출용 정제 함수. 병합된 설정 파일을 따른다.
pub async fn refine(prompt: &str, allow_enhancement: bool) -> Result<RefinementResult> {
    let composition = AppComposition::load()?;
    let result = composition
        .refine_usecase()
        .execute(RefineRequest {
            prompt: prompt.to_string(),
            allow_enhancement,
        })
        .await?;
    Ok(result)
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.config_usecase().inspect()
}
