//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// 교정/랭킹 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// 이보다 짧은 질의는 교정하지 않음 (문자 수)
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// 퍼지 후보로 인정하는 최대 편집 거리
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    /// 퍼지 후보 반환 개수
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    /// 사전 필터가 넘겨주는 최대 후보 수
    #[serde(default = "default_prefilter_limit")]
    pub prefilter_limit: usize,
    /// 사전 필터 길이 허용 폭 (질의 길이 ± slack)
    #[serde(default = "default_length_slack")]
    pub length_slack: usize,
    /// 사전 필터 최소 빈도
    #[serde(default = "default_min_frequency")]
    pub min_frequency: Option<u64>,
    /// 오라클 호출 제한 시간 (ms)
    #[serde(default = "default_oracle_timeout_ms")]
    pub oracle_timeout_ms: u64,
    /// 교정 결과 캐시 크기
    #[serde(default = "default_correction_cache_capacity")]
    pub correction_cache_capacity: usize,
    /// 오라클 응답 캐시 크기
    #[serde(default = "default_oracle_cache_capacity")]
    pub oracle_cache_capacity: usize,
    /// 랭킹 결과에 포함될 최소 점수
    #[serde(default = "default_rank_min_score")]
    pub rank_min_score: f64,
    /// TF-IDF 어휘 최대 크기
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// 종목명 교정 후보 개수
    #[serde(default = "default_instrument_limit")]
    pub instrument_limit: usize,
}

fn default_min_query_chars() -> usize {
    2
}

fn default_max_edit_distance() -> usize {
    3
}

fn default_candidate_limit() -> usize {
    10
}

fn default_prefilter_limit() -> usize {
    100
}

fn default_length_slack() -> usize {
    4
}

fn default_min_frequency() -> Option<u64> {
    Some(50)
}

fn default_oracle_timeout_ms() -> u64 {
    3000
}

fn default_correction_cache_capacity() -> usize {
    1000
}

fn default_oracle_cache_capacity() -> usize {
    128
}

fn default_rank_min_score() -> f64 {
    0.05
}

fn default_max_features() -> usize {
    1000
}

fn default_instrument_limit() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            max_edit_distance: default_max_edit_distance(),
            candidate_limit: default_candidate_limit(),
            prefilter_limit: default_prefilter_limit(),
            length_slack: default_length_slack(),
            min_frequency: default_min_frequency(),
            oracle_timeout_ms: default_oracle_timeout_ms(),
            correction_cache_capacity: default_correction_cache_capacity(),
            oracle_cache_capacity: default_oracle_cache_capacity(),
            rank_min_score: default_rank_min_score(),
            max_features: default_max_features(),
            instrument_limit: default_instrument_limit(),
        }
    }
}

impl SearchConfig {
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.oracle_timeout_ms)
    }
}

/// 설정 파일 경로: $HANSEARCH_CONFIG, 없으면 ~/.config/hansearch/config.json
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("HANSEARCH_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("hansearch").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config(path: &Path) -> SearchConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패 ({}): {}", path.display(), e);
            SearchConfig::default()
        }),
        Err(_) => SearchConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(path: &Path, config: &SearchConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
