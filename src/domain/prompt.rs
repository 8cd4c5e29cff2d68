//! 프롬프트 정제 도메인 엔티티/값 객체.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_MAX_PROMPT_CHARS: usize = 5000;

/// 분석기 진입 전에 거부되는 사용자 입력 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please provide a prompt to refine")]
    Empty,
    #[error("Prompt too long (max {max} characters, got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// 검증을 통과한(비어 있지 않고 길이 제한 이내) 원본 프롬프트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrompt(String);

impl RawPrompt {
    /// 앞뒤 공백을 제거한 뒤 빈 입력/길이 초과를 거부한다.
    pub fn new(input: &str, max_chars: usize) -> Result<Self, InputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }

        let actual = trimmed.chars().count();
        if actual > max_chars {
            return Err(InputError::TooLong {
                max: max_chars,
                actual,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 정제 프롬프트의 표준 섹션. 선언 순서가 곧 출력 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Role,
    Objective,
    Context,
    Constraints,
    Steps,
    OutputFormat,
    SelfCheck,
}

impl SectionKind {
    pub const CANONICAL_ORDER: [SectionKind; 7] = [
        Self::Role,
        Self::Objective,
        Self::Context,
        Self::Constraints,
        Self::Steps,
        Self::OutputFormat,
        Self::SelfCheck,
    ];

    /// 출력 본문에 들어가는 섹션 제목.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::Objective => "Objective",
            Self::Context => "Context / Original Request",
            Self::Constraints => "Constraints",
            Self::Steps => "Steps",
            Self::OutputFormat => "Output Format",
            Self::SelfCheck => "Self-Check",
        }
    }

    /// 마크다운 제목 줄(`## Role`).
    pub fn heading_line(self) -> String {
        format!("## {}", self.heading())
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// 분석기가 원문에서 찾아낸 구조 정보.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPrompt {
    pub has_role: bool,
    pub has_objective: bool,
    pub has_constraints: bool,
    pub has_output_format: bool,
    pub has_steps: bool,
    /// 사용자 의도를 가장 잘 나타내는 문장(최대 300자)
    pub core_task: String,
    /// 목표 마커/명령형 문장이 없을 때 쓰는 첫 문장(최대 300자)
    pub first_sentence: String,
    pub role_sentence: Option<String>,
    pub constraint_sentences: Vec<String>,
    pub step_lines: Vec<String>,
    pub format_sentences: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RationaleAction {
    Kept,
    Added,
}

impl RationaleAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Kept => "kept",
            Self::Added => "added",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RationaleEntry {
    pub section: SectionKind,
    pub action: RationaleAction,
    pub detail: String,
}

impl RationaleEntry {
    pub fn kept(section: SectionKind, detail: impl Into<String>) -> Self {
        Self {
            section,
            action: RationaleAction::Kept,
            detail: detail.into(),
        }
    }

    pub fn added(section: SectionKind, detail: impl Into<String>) -> Self {
        Self {
            section,
            action: RationaleAction::Added,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RationaleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.section, self.action.label(), self.detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefinementResult {
    pub refined_text: String,
    pub rationale: Vec<RationaleEntry>,
    pub used_ai: bool,
}

impl RefinementResult {
    /// 사람이 읽는 한 줄짜리 근거 목록.
    pub fn rationale_text(&self) -> String {
        self.rationale
            .iter()
            .map(|entry| format!("- {entry}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineRequest {
    pub prompt: String,
    pub allow_enhancement: bool,
}

/// 다운로드를 위해 보관하는 최근 정제 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRefinement {
    pub original: String,
    pub result: RefinementResult,
    pub created_at: DateTime<Local>,
}

/// 다운로드용 파일 산출물.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_prompt_rejects_blank_input() {
        assert_eq!(RawPrompt::new("", 10), Err(InputError::Empty));
        assert_eq!(RawPrompt::new(" \n\t ", 10), Err(InputError::Empty));
    }

    #[test]
    fn raw_prompt_counts_characters_not_bytes() {
        assert!(RawPrompt::new("ééééé", 5).is_ok());
        assert_eq!(
            RawPrompt::new("abcdef", 5),
            Err(InputError::TooLong { max: 5, actual: 6 })
        );
    }

    #[test]
    fn raw_prompt_is_trimmed() {
        let raw = RawPrompt::new("  write a poem \n", 100).unwrap();
        assert_eq!(raw.as_str(), "write a poem");
    }

    #[test]
    fn rationale_entry_display_is_readable() {
        let entry = RationaleEntry::added(SectionKind::OutputFormat, "default format");
        assert_eq!(entry.to_string(), "Output Format (added): default format");
    }
}
