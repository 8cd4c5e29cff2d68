//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::prompt::DEFAULT_MAX_PROMPT_CHARS;

pub const DEFAULT_ENHANCE_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 10;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 정제 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 문체 보강(enhancement) provider 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 입력 프롬프트 최대 문자 수
    pub max_prompt_chars: Option<usize>,
    /// 호출자가 따로 지정하지 않았을 때 AI 보강 허용 여부(기본 true)
    pub enhance: Option<bool>,
    /// AI 보강 호출 타임아웃(ms)
    pub enhance_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    /// 클라이언트 IP당 분당 `/refine` 허용 횟수
    pub rate_limit_per_minute: Option<u32>,
    /// 리버스 프록시 뒤에서만 켠다. 켜면 `X-Forwarded-For`/`X-Real-IP`로 클라이언트를 구분한다.
    pub trust_proxy_headers: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub gemini: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자(선택)
    pub model: Option<String>,
    /// API 베이스 URL(선택)
    pub api_base: Option<String>,
    /// API 키(직접값, 권장하지 않음)
    pub api_key: Option<String>,
    /// API 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Config {
    pub fn max_prompt_chars(&self) -> usize {
        self.defaults
            .max_prompt_chars
            .unwrap_or(DEFAULT_MAX_PROMPT_CHARS)
    }

    pub fn enhance_by_default(&self) -> bool {
        self.defaults.enhance.unwrap_or(true)
    }

    pub fn enhance_timeout(&self) -> Duration {
        Duration::from_millis(
            self.defaults
                .enhance_timeout_ms
                .unwrap_or(DEFAULT_ENHANCE_TIMEOUT_MS),
        )
    }

    pub fn bind_addr(&self) -> String {
        self.server
            .bind
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.server
            .rate_limit_per_minute
            .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE)
    }

    pub fn trust_proxy_headers(&self) -> bool {
        self.server.trust_proxy_headers.unwrap_or(false)
    }

    /// gemini 항목이 없으면 기본값(환경변수 `GEMINI_API_KEY`)으로 간주한다.
    pub fn gemini(&self) -> ProviderConfig {
        self.providers.gemini.clone().unwrap_or_default()
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.server.merge_from(other.server);
        self.providers.merge_from(other.providers);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.max_prompt_chars.is_some() {
            self.max_prompt_chars = other.max_prompt_chars;
        }
        if other.enhance.is_some() {
            self.enhance = other.enhance;
        }
        if other.enhance_timeout_ms.is_some() {
            self.enhance_timeout_ms = other.enhance_timeout_ms;
        }
    }
}

impl ServerConfig {
    pub fn merge_from(&mut self, other: ServerConfig) {
        if other.bind.is_some() {
            self.bind = other.bind;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.rate_limit_per_minute.is_some() {
            self.rate_limit_per_minute = other.rate_limit_per_minute;
        }
        if other.trust_proxy_headers.is_some() {
            self.trust_proxy_headers = other.trust_proxy_headers;
        }
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
    }

    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_API_KEY_ENV.to_string())
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.max_output_tokens.is_some() {
            self.max_output_tokens = other.max_output_tokens;
        }
    }
}

impl ProvidersConfig {
    pub fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider_config(&mut self.gemini, other.gemini);
    }
}

fn merge_provider_config(target: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    match (target.as_mut(), incoming) {
        (Some(existing), Some(next)) => existing.merge_from(next),
        (None, Some(next)) => *target = Some(next),
        _ => {}
    }
}
