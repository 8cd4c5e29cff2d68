//! 분석 결과로 표준 7개 섹션 정제 프롬프트와 근거 목록을 합성한다.

use crate::domain::prompt::{
    ParsedPrompt, RationaleEntry, RawPrompt, RefinementResult, SectionKind,
};

pub const DEFAULT_ROLE: &str = "You are an expert assistant with deep, practical knowledge of the subject of this request. Work carefully and accurately, and use professional judgement.";

pub const DEFAULT_CONSTRAINTS: [&str; 4] = [
    "Be concise and stay focused on the request.",
    "Do not fabricate facts; state clearly when you are uncertain.",
    "Ask clarifying questions if the request is ambiguous.",
    "Address every part of the request.",
];

pub const DEFAULT_STEPS: [&str; 4] = [
    "Restate the objective in your own words and note any assumptions.",
    "Identify the key information and constraints in the original request.",
    "Work through the task systematically, one part at a time.",
    "Review your draft against the constraints and the output format before finalizing.",
];

pub const SELF_CHECK: &str = "Before responding, verify that your answer fully addresses the objective, satisfies every constraint, follows the steps above, and matches the required output format. Fix any gap before you reply.";

/// 분석 결과를 바탕으로 정제 프롬프트를 합성한다. `used_ai`는 항상 `false`로 시작한다.
pub fn synthesize(raw: &RawPrompt, parsed: &ParsedPrompt) -> RefinementResult {
    let mut sections: Vec<(SectionKind, String)> = Vec::with_capacity(7);
    let mut rationale = Vec::with_capacity(6);

    // Role
    match parsed.role_sentence.as_deref().filter(|_| parsed.has_role) {
        Some(sentence) => {
            sections.push((SectionKind::Role, sentence.to_string()));
            rationale.push(RationaleEntry::kept(
                SectionKind::Role,
                "kept the persona you defined",
            ));
        }
        None => {
            sections.push((SectionKind::Role, DEFAULT_ROLE.to_string()));
            rationale.push(RationaleEntry::added(
                SectionKind::Role,
                "no persona found; added the default expert-assistant role",
            ));
        }
    }

    // Objective
    if parsed.has_objective {
        sections.push((SectionKind::Objective, terminate_sentence(&parsed.core_task)));
        rationale.push(RationaleEntry::kept(
            SectionKind::Objective,
            "restated your stated task as an explicit objective",
        ));
    } else {
        sections.push((
            SectionKind::Objective,
            format!(
                "Complete the following request effectively: {}",
                terminate_sentence(&parsed.first_sentence)
            ),
        ));
        rationale.push(RationaleEntry::added(
            SectionKind::Objective,
            "no explicit goal or instruction found; derived an objective from the opening sentence",
        ));
    }

    // Context: 원문 그대로, 근거 항목 없음
    sections.push((SectionKind::Context, raw.as_str().to_string()));

    // Constraints
    if parsed.has_constraints && !parsed.constraint_sentences.is_empty() {
        sections.push((
            SectionKind::Constraints,
            bullet_list(parsed.constraint_sentences.iter().map(String::as_str)),
        ));
        rationale.push(RationaleEntry::kept(
            SectionKind::Constraints,
            format!(
                "collected {} constraint sentence(s) from your prompt",
                parsed.constraint_sentences.len()
            ),
        ));
    } else {
        sections.push((SectionKind::Constraints, bullet_list(DEFAULT_CONSTRAINTS)));
        rationale.push(RationaleEntry::added(
            SectionKind::Constraints,
            "no constraints found; added defaults for concision, factual accuracy and clarifying questions",
        ));
    }

    // Steps
    if parsed.has_steps && !parsed.step_lines.is_empty() {
        sections.push((SectionKind::Steps, parsed.step_lines.join("\n")));
        rationale.push(RationaleEntry::kept(
            SectionKind::Steps,
            "kept your step guidance and examples",
        ));
    } else {
        sections.push((SectionKind::Steps, numbered_list(DEFAULT_STEPS)));
        rationale.push(RationaleEntry::added(
            SectionKind::Steps,
            format!("no step guidance found; added a generic {}-step plan", DEFAULT_STEPS.len()),
        ));
    }

    // OutputFormat
    if parsed.has_output_format && !parsed.format_sentences.is_empty() {
        sections.push((SectionKind::OutputFormat, parsed.format_sentences.join("\n")));
        rationale.push(RationaleEntry::kept(
            SectionKind::OutputFormat,
            "kept the output format you requested",
        ));
    } else {
        let suggestion = suggest_output_format(raw.as_str());
        sections.push((SectionKind::OutputFormat, suggestion.instruction.to_string()));
        rationale.push(RationaleEntry::added(
            SectionKind::OutputFormat,
            format!(
                "no output format found; added a {} format",
                suggestion.label
            ),
        ));
    }

    // SelfCheck
    sections.push((SectionKind::SelfCheck, SELF_CHECK.to_string()));
    rationale.push(RationaleEntry::added(
        SectionKind::SelfCheck,
        "added a self-check against the objective and constraints",
    ));

    RefinementResult {
        refined_text: render_sections(&sections),
        rationale,
        used_ai: false,
    }
}

/// 7개 섹션 제목 줄이 각각 한 번씩, 표준 순서대로 등장하는지 검사한다.
pub fn has_canonical_structure(text: &str) -> bool {
    let headings: Vec<String> = SectionKind::CANONICAL_ORDER
        .iter()
        .map(|kind| kind.heading_line())
        .collect();

    let found: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| headings.iter().any(|h| h == line))
        .collect();

    found.len() == headings.len() && found.iter().zip(&headings).all(|(line, h)| *line == h)
}

/// 원문 자체가 제목 줄을 포함할 수 있으므로, 원문이 그대로 실린 컨텍스트 본문은
/// 제외하고 구조를 검사한다. 본문이 바뀌었으면 전체 텍스트로 검사한다.
pub fn has_canonical_structure_around(text: &str, context: &str) -> bool {
    let heading = SectionKind::Context.heading_line();
    let block = format!("{heading}\n{context}");
    match text.find(&block) {
        Some(start) => {
            let stripped = format!("{}{}{}", &text[..start], heading, &text[start + block.len()..]);
            has_canonical_structure(&stripped)
        }
        None => has_canonical_structure(text),
    }
}

struct FormatSuggestion {
    label: &'static str,
    instruction: &'static str,
}

fn suggest_output_format(text: &str) -> FormatSuggestion {
    let lower = text.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if mentions(&["steps", "points", "ideas", "options"]) {
        FormatSuggestion {
            label: "list",
            instruction: "Provide your response as a numbered or bulleted list.",
        }
    } else if mentions(&["analyze", "analyse", "compare", "evaluate"]) {
        FormatSuggestion {
            label: "structured analysis",
            instruction: "Structure your response with clear headings and a short explanation under each.",
        }
    } else if mentions(&["code", "script", "program", "function"]) {
        FormatSuggestion {
            label: "code",
            instruction: "Provide the code in a fenced code block with comments, followed by a brief explanation.",
        }
    } else if mentions(&["summary", "summarize", "summarise", "brief"]) {
        FormatSuggestion {
            label: "summary",
            instruction: "Provide a concise summary with the key points highlighted.",
        }
    } else {
        FormatSuggestion {
            label: "default structured",
            instruction: "Respond with a short summary followed by a bulleted list of the key points.",
        }
    }
}

fn render_sections(sections: &[(SectionKind, String)]) -> String {
    sections
        .iter()
        .map(|(kind, body)| format!("{}\n{}", kind.heading_line(), body.trim_end()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bullet_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| format!("{}. {item}", idx + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 사용자 표기를 그대로 두고, 끝에 문장부호가 없으면 마침표만 붙인다.
fn terminate_sentence(text: &str) -> String {
    let mut out = text.trim().to_string();
    if !out.is_empty() && !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}
