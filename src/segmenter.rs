//! 토큰 분절기
//!
//! 형태소 분석은 외부 구현을 주입받습니다. 기본 구현은 조사를 떼어내는 정도의 근사입니다.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::unicode::is_syllable;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^0-9A-Za-z가-힣]").unwrap();
}

/// 조사 후보 문자 (뒤에서부터 반복 제거)
const PARTICLE_CHARS: &str = "의가을를이야로으로부터에";

/// 질의 분절용 기본 불용어
const QUERY_STOPWORDS: [&str; 5] = ["그리고", "하지만", "관련", "최근", "대한"];

/// 용어 수집용 기본 불용어 (불용어 파일이 없을 때)
const INGEST_STOPWORDS: [&str; 9] = [
    "있다", "있는", "하다", "되는", "밝혔다", "기자", "등", "통해", "위해",
];

/// 텍스트를 토큰 목록으로 나누는 기능
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// 조사 제거 기반 기본 분절기
#[derive(Debug, Clone)]
pub struct ParticleSegmenter {
    stopwords: HashSet<String>,
}

impl ParticleSegmenter {
    pub fn new() -> Self {
        Self {
            stopwords: QUERY_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_stopwords(stopwords: HashSet<String>) -> Self {
        Self { stopwords }
    }
}

impl Default for ParticleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for ParticleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let cleaned = NON_WORD.replace_all(text, " ");
        cleaned
            .split_whitespace()
            .map(|t| t.trim_end_matches(|c: char| PARTICLE_CHARS.contains(c)))
            .filter(|t| t.chars().count() > 1 && !self.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }
}

/// 수집용 기본 불용어
pub fn default_ingest_stopwords() -> HashSet<String> {
    INGEST_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// 불용어 파일 로드 (한 줄에 하나, 한글로만 된 줄만 사용)
///
/// 파일을 읽지 못하면 기본 불용어
pub fn load_stopwords(path: &Path) -> HashSet<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let words: HashSet<String> = content
                .lines()
                .map(str::trim)
                .filter(|w| !w.is_empty() && w.chars().all(is_syllable))
                .map(str::to_string)
                .collect();
            log::info!("불용어 로드 완료: {}개", words.len());
            words
        }
        Err(e) => {
            log::warn!("불용어 로드 실패 ({}): {}", path.display(), e);
            default_ingest_stopwords()
        }
    }
}
