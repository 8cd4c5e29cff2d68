//! 보강 요청 프롬프트 구성.

use crate::domain::prompt::SectionKind;

/// 초안을 다듬되 섹션 제목은 그대로 두라는 지시문을 만든다.
pub fn build_enhancement_prompt(draft: &str) -> String {
    let headings = SectionKind::CANONICAL_ORDER
        .iter()
        .map(|kind| kind.heading_line())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert prompt engineer. Improve the wording of the structured prompt below so it reads clearly and naturally while following prompt engineering best practices.\n\n\
Rules:\n\
- Keep every section heading line exactly as written, once each, in this order:\n{headings}\n\
- Keep the \"{context}\" section text unchanged.\n\
- Do not add new sections, remove sections, or change the meaning of any requirement.\n\
- Keep it concise.\n\n\
Return your response as JSON with 'refined_prompt' and 'rationale' fields. Keep rationale to 2-3 sentences.\n\n\
Structured prompt:\n\n{draft}",
        context = SectionKind::Context.heading(),
    )
}
