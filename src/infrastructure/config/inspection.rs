//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{DefaultsConfig, ProviderConfig, ServerConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub server: ServerConfig,
    pub effective: EffectiveSettings,
    pub providers: ProvidersInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub max_prompt_chars: usize,
    pub enhance: bool,
    pub enhance_timeout_ms: u64,
    pub bind: String,
    pub port: u16,
    pub rate_limit_per_minute: u32,
    pub trust_proxy_headers: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvidersInspection {
    pub gemini: ProviderInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub enabled: bool,
    /// 키가 해석되어 실제로 보강을 시도할 수 있는지 여부
    pub ready: bool,
    pub model: String,
    pub api_base: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            server: config.server.clone(),
            effective: EffectiveSettings {
                max_prompt_chars: config.max_prompt_chars(),
                enhance: config.enhance_by_default(),
                enhance_timeout_ms: config.enhance_timeout().as_millis() as u64,
                bind: config.bind_addr(),
                port: config.port(),
                rate_limit_per_minute: config.rate_limit_per_minute(),
                trust_proxy_headers: config.trust_proxy_headers(),
            },
            providers: ProvidersInspection {
                gemini: ProviderInspection::from_config(&config.gemini()),
            },
        }
    }
}

impl ProviderInspection {
    fn from_config(cfg: &ProviderConfig) -> Self {
        let enabled = cfg.is_enabled();
        let api_resolution = resolve_provider_api_key(cfg);
        let api_key_resolved = api_resolution.credential.is_some();

        Self {
            enabled,
            ready: enabled && api_key_resolved,
            model: cfg.model(),
            api_base: cfg.api_base(),
            api_key_source: api_resolution.source,
            api_key_resolved,
        }
    }
}
