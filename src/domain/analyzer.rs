//! 원본 프롬프트에서 표준 섹션 존재 여부와 핵심 과업을 추출하는 구조 분석기.
//!
//! 표면 패턴(대소문자 무시, 단어 경계) 매칭만 수행하며 I/O가 없는 순수 함수다.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::prompt::{ParsedPrompt, RawPrompt};

pub const CORE_TASK_MAX_CHARS: usize = 300;

static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\brole\s*:|\b(?:act as|acting as|pretend to be|take on the role of)\b|\byou(?: are|'re) an?\b",
    )
    .expect("valid role regex")
});

// "As a historian, ..." is only a persona when it opens the sentence.
static ROLE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^as an? [a-z][a-z -]{0,40},").expect("valid role prefix regex")
});

static OBJECTIVE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:goal|objective|task|purpose|aim)\s*:").expect("valid objective regex")
});

static CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:must|should(?:n't)?|constraints?|limit(?:s|ed|ations?)?|requirements?|required|avoid|do not|don't|never|ensure|at most|no more than|at least)\b",
    )
    .expect("valid constraint regex")
});

static FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bformat\s*:|\b(?:output (?:as|in)|respond (?:in|with)|reply (?:in|with)|return (?:json|markdown|yaml|csv)|(?:as|in) (?:json|markdown|yaml|csv)|bullet(?:ed)?|numbered list|tables?|lists?)\b",
    )
    .expect("valid format regex")
});

static STEP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\d{1,2}[.)]\s+\S|step\s*\d+\b)").expect("valid step regex")
});

static SEQUENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bfirst\b.*\bthen\b").expect("valid sequence regex"));

static SEQUENCE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:first|then|next|finally|afterwards)\b").expect("valid sequence word regex")
});

static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bexamples?\s*:|\bfor (?:example|instance)\b|\bsuch as\b|\be\.g\.")
        .expect("valid example regex")
});

const IMPERATIVE_VERBS: &[&str] = &[
    "analyze", "analyse", "build", "calculate", "classify", "compare", "compose", "convert",
    "create", "debug", "describe", "design", "develop", "draft", "edit", "evaluate", "explain",
    "extract", "find", "fix", "generate", "give", "help", "identify", "implement", "improve",
    "list", "make", "outline", "plan", "prepare", "produce", "propose", "recommend", "refactor",
    "review", "rewrite", "suggest", "summarize", "summarise", "tell", "translate", "write",
];

const POLITE_PREFIXES: &[&str] = &[
    "please ",
    "can you ",
    "could you ",
    "would you ",
    "i want you to ",
    "i need you to ",
];

/// 원본 프롬프트를 분석한다. 같은 입력에는 항상 같은 결과를 낸다.
pub fn analyze(raw: &RawPrompt) -> ParsedPrompt {
    let text = raw.as_str();
    let sentences = split_sentences(text);
    let first_sentence = sentences
        .first()
        .map(|s| cap_chars(s, CORE_TASK_MAX_CHARS))
        .unwrap_or_else(|| cap_chars(text, CORE_TASK_MAX_CHARS));

    let role_sentence = sentences
        .iter()
        .find(|s| ROLE_RE.is_match(s) || ROLE_PREFIX_RE.is_match(s))
        .map(|s| s.to_string());

    let marked_objective = extract_marked_objective(text);
    let imperative_sentence = sentences.iter().find(|s| starts_with_imperative(s));
    let has_objective = marked_objective.is_some() || imperative_sentence.is_some();
    let core_task = marked_objective
        .or_else(|| imperative_sentence.map(|s| s.to_string()))
        .map(|task| cap_chars(&task, CORE_TASK_MAX_CHARS))
        .unwrap_or_else(|| first_sentence.clone());

    let constraint_sentences = matching_sentences(&sentences, &CONSTRAINT_RE);
    let format_sentences = matching_sentences(&sentences, &FORMAT_RE);
    let step_lines = extract_steps(text, &sentences);

    ParsedPrompt {
        has_role: role_sentence.is_some(),
        has_objective,
        has_constraints: !constraint_sentences.is_empty(),
        has_output_format: !format_sentences.is_empty(),
        has_steps: !step_lines.is_empty(),
        core_task,
        first_sentence,
        role_sentence,
        constraint_sentences,
        step_lines,
        format_sentences,
    }
}

/// 문장 단위로 자른다. 줄바꿈과 공백이 뒤따르는 `.`/`!`/`?`가 경계이며,
/// 번호 목록의 `1.`은 경계로 보지 않는다.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let end = idx + ch.len_utf8();
        let boundary = match ch {
            '\n' => true,
            '.' | '!' | '?' => {
                let followed_by_space = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
                followed_by_space && !is_list_ordinal(&text[start..idx])
            }
            _ => false,
        };

        if boundary {
            push_sentence(&mut out, &text[start..end]);
            start = end;
        }
    }
    push_sentence(&mut out, &text[start..]);

    out
}

/// 문자 수 기준으로 자르고, 잘렸으면 `...`을 붙인다.
pub(crate) fn cap_chars(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

fn push_sentence<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

fn is_list_ordinal(fragment: &str) -> bool {
    let trimmed = fragment.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

fn extract_marked_objective(text: &str) -> Option<String> {
    let found = OBJECTIVE_MARKER_RE.find(text)?;
    let tail = &text[found.end()..];
    let task = split_sentences(tail).first().map(|s| s.to_string());

    // "Goal:" 뒤가 비어 있으면 마커가 포함된 줄 자체를 과업으로 본다.
    task.or_else(|| {
        let line_start = text[..found.start()].rfind('\n').map_or(0, |i| i + 1);
        let line = text[line_start..found.end()].trim();
        (!line.is_empty()).then(|| line.to_string())
    })
}

fn starts_with_imperative(sentence: &str) -> bool {
    let mut lower = sentence
        .trim_start_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();

    for prefix in POLITE_PREFIXES {
        if let Some(rest) = lower.strip_prefix(prefix) {
            lower = rest.trim_start().to_string();
            break;
        }
    }

    let first_word: String = lower.chars().take_while(|c| c.is_alphabetic()).collect();
    IMPERATIVE_VERBS.contains(&first_word.as_str())
}

fn matching_sentences(sentences: &[&str], pattern: &Regex) -> Vec<String> {
    sentences
        .iter()
        .filter(|s| pattern.is_match(s))
        .map(|s| s.to_string())
        .collect()
}

fn extract_steps(text: &str, sentences: &[&str]) -> Vec<String> {
    let numbered: Vec<String> = text
        .lines()
        .filter(|line| STEP_LINE_RE.is_match(line))
        .map(|line| line.trim().to_string())
        .collect();
    if !numbered.is_empty() {
        return numbered;
    }

    if SEQUENCE_RE.is_match(text) {
        return matching_sentences(sentences, &SEQUENCE_WORD_RE);
    }

    // 순서 안내가 없으면 예시 문장을 진행 지침으로 취급한다.
    matching_sentences(sentences, &EXAMPLE_RE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedPrompt {
        analyze(&RawPrompt::new(text, 10_000).unwrap())
    }

    #[test]
    fn examples_count_as_step_guidance() {
        let parsed = parse("Suggest names for a bakery.\nExample: Crumb & Co.");
        assert!(parsed.has_steps);
        assert_eq!(parsed.step_lines, vec!["Example: Crumb & Co.".to_string()]);

        let parsed = parse("Suggest names for a bakery, such as Rise Up");
        assert!(parsed.has_steps);
    }

    #[test]
    fn imperative_request_has_objective_only() {
        let parsed = parse("write a blog post about cats");
        assert!(!parsed.has_role);
        assert!(parsed.has_objective);
        assert!(!parsed.has_constraints);
        assert!(!parsed.has_output_format);
        assert!(!parsed.has_steps);
        assert_eq!(parsed.core_task, "write a blog post about cats");
    }

    #[test]
    fn detects_persona_sentence() {
        let parsed = parse("You are a senior chef. Suggest a dinner menu.");
        assert!(parsed.has_role);
        assert_eq!(parsed.role_sentence.as_deref(), Some("You are a senior chef."));

        let parsed = parse("As a historian, explain the fall of Rome.");
        assert!(parsed.has_role);

        let parsed = parse("Name fruits such as a banana, apple or pear.");
        assert!(!parsed.has_role);
    }

    #[test]
    fn you_are_able_is_not_a_persona() {
        let parsed = parse("I hope you are able to tell me a story.");
        assert!(!parsed.has_role);
    }

    #[test]
    fn objective_marker_takes_rest_of_sentence() {
        let parsed = parse("Some background first\nGoal: reduce churn by 5%. Other notes here.");
        assert!(parsed.has_objective);
        assert_eq!(parsed.core_task, "reduce churn by 5%.");
    }

    #[test]
    fn polite_prefix_does_not_hide_imperative() {
        let parsed = parse("Please summarize this article for me.");
        assert!(parsed.has_objective);
        assert_eq!(parsed.core_task, "Please summarize this article for me.");
    }

    #[test]
    fn falls_back_to_first_sentence_without_objective() {
        let parsed = parse("I have been thinking about medieval castles. They are big.");
        assert!(!parsed.has_objective);
        assert_eq!(parsed.core_task, "I have been thinking about medieval castles.");
    }

    #[test]
    fn core_task_is_capped() {
        let long = format!("write {}", "x".repeat(400));
        let parsed = parse(&long);
        assert_eq!(parsed.core_task.chars().count(), CORE_TASK_MAX_CHARS + 3);
        assert!(parsed.core_task.ends_with("..."));
    }

    #[test]
    fn constraints_use_word_boundaries() {
        assert!(parse("The answer must cite sources.").has_constraints);
        assert!(parse("Avoid jargon.").has_constraints);
        assert!(!parse("I have unlimited time to read about mustangs.").has_constraints);
    }

    #[test]
    fn detects_output_format_markers() {
        assert!(parse("Return JSON with the keys name and age.").has_output_format);
        assert!(parse("Format: a haiku").has_output_format);
        assert!(parse("Put the results in a table.").has_output_format);
        assert!(!parse("Tell me about formatting disks").has_output_format);
    }

    #[test]
    fn numbered_lines_are_steps() {
        let parsed = parse("Do this:\n1. Read the file\n2) Count the words\nDone.");
        assert!(parsed.has_steps);
        assert_eq!(parsed.step_lines, vec!["1. Read the file", "2) Count the words"]);
    }

    #[test]
    fn first_then_sequence_is_steps() {
        let parsed = parse("First, collect the data. Then chart it.");
        assert!(parsed.has_steps);
        assert_eq!(parsed.step_lines.len(), 2);
    }

    #[test]
    fn split_sentences_keeps_list_ordinals_together() {
        let sentences = split_sentences("1. Read it. 2. Done!\nNext line");
        assert_eq!(sentences, vec!["1. Read it.", "2. Done!", "Next line"]);
    }

    #[test]
    fn analysis_is_deterministic() {
        let text = "Act as a tutor. Explain fractions. Avoid jargon. Respond in markdown.";
        assert_eq!(parse(text), parse(text));
    }
}
