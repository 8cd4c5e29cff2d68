//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use crate::application::config::{
    Config, DEFAULT_BIND, DEFAULT_ENHANCE_TIMEOUT_MS, DEFAULT_GEMINI_API_KEY_ENV,
    DEFAULT_GEMINI_MODEL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_PORT, DEFAULT_RATE_LIMIT_PER_MINUTE,
    DEFAULT_TEMPERATURE,
};
use crate::domain::prompt::DEFAULT_MAX_PROMPT_CHARS;

pub const CONFIG_ENV: &str = "PROMPTREFINE_CONFIG";
const PROJECT_CONFIG_PATH: &str = ".promptrefine/config.json";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
/// 설정 파일이 하나도 없으면 기본값만으로 동작한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    load_from_paths(config_paths())
}

pub(crate) fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    // 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/promptrefine/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("promptrefine").join("config.json"));
    }

    paths.push(PathBuf::from(PROJECT_CONFIG_PATH));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

/// 템플릿 대상 경로: `$PROMPTREFINE_CONFIG`가 있으면 그 경로, 없으면 프로젝트 로컬 경로.
pub(crate) fn template_target_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(PROJECT_CONFIG_PATH)
}

/// 기본값을 채운 템플릿 설정을 쓴다. 이미 있으면 건드리지 않는다.
pub(crate) fn write_template(config_path: &Path) -> Result<PathBuf> {
    if config_path.exists() {
        return Ok(config_path.to_path_buf());
    }

    if let Some(parent) = config_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let template = json!({
        "defaults": {
            "max_prompt_chars": DEFAULT_MAX_PROMPT_CHARS,
            "enhance": true,
            "enhance_timeout_ms": DEFAULT_ENHANCE_TIMEOUT_MS
        },
        "server": {
            "bind": DEFAULT_BIND,
            "port": DEFAULT_PORT,
            "rate_limit_per_minute": DEFAULT_RATE_LIMIT_PER_MINUTE,
            "trust_proxy_headers": false
        },
        "providers": {
            "gemini": {
                "enabled": true,
                "api_key_env": DEFAULT_GEMINI_API_KEY_ENV,
                "model": DEFAULT_GEMINI_MODEL,
                "temperature": DEFAULT_TEMPERATURE,
                "max_output_tokens": DEFAULT_MAX_OUTPUT_TOKENS
            }
        }
    });

    let rendered = serde_json::to_string_pretty(&template)?;
    fs::write(config_path, format!("{rendered}\n"))
        .with_context(|| format!("failed to create config template at {}", config_path.display()))?;
    Ok(config_path.to_path_buf())
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_from_paths(vec![dir.path().join("absent.json")]).unwrap();
        assert!(loaded.loaded_paths.is_empty());
        assert_eq!(loaded.config.max_prompt_chars(), DEFAULT_MAX_PROMPT_CHARS);
    }

    #[test]
    fn later_paths_take_priority() {
        let dir = tempfile::tempdir().unwrap();
        let low = dir.path().join("low.json");
        let high = dir.path().join("high.json");
        fs::write(&low, r#"{"server": {"port": 7000, "bind": "0.0.0.0"}}"#).unwrap();
        fs::write(&high, r#"{"server": {"port": 7001}}"#).unwrap();

        let loaded = load_from_paths(vec![low.clone(), high.clone()]).unwrap();
        assert_eq!(loaded.loaded_paths, vec![low, high]);
        assert_eq!(loaded.config.port(), 7001);
        assert_eq!(loaded.config.bind_addr(), "0.0.0.0");
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();

        let err = load_from_paths(vec![broken]).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn template_is_written_once_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        write_template(&path).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        let parsed: Config = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed.rate_limit_per_minute(), DEFAULT_RATE_LIMIT_PER_MINUTE);

        fs::write(&path, "{}").unwrap();
        write_template(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
