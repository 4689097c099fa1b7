//! 오라클(외부 AI) 호출 게이트웨이
//!
//! 오라클은 느리고 믿을 수 없는 외부 기능으로 취급합니다.
//! 모든 호출은 작업 스레드에서 실행되고 제한 시간이 지나면 응답을 버립니다.
//! 성공한 응답만 캐시합니다.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::SharedCache;
use crate::error::OracleError;

/// 제안 목록 최대 길이
const MAX_SUGGESTIONS: usize = 5;

lazy_static! {
    static ref SYLLABLE_RUN: Regex = Regex::new(r"[가-힣]{2,}").unwrap();
}

/// 오라클 요청
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OracleRequest {
    /// 사용자가 입력한 그대로의 질의
    pub original: String,
    /// 자판 변환된 질의 (변환하지 않았으면 원본과 같음)
    pub transliterated: String,
    /// 로컬에서 찾은 유사 후보
    pub hints: Vec<String>,
}

impl OracleRequest {
    fn cache_key(&self) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{}",
            self.original,
            self.transliterated,
            self.hints.join("\u{1e}")
        )
    }
}

/// 오라클 기능 (원문 응답 텍스트를 반환)
pub trait Oracle: Send + Sync {
    /// 의도한 단어 하나를 추론
    fn infer(&self, request: &OracleRequest) -> Result<String, OracleError>;

    /// 유력한 후보 3~5개를 JSON 배열로 제안
    fn suggest_list(&self, request: &OracleRequest) -> Result<String, OracleError>;
}

/// 제한 시간과 응답 검증, 캐시를 책임지는 오라클 래퍼
pub struct OracleGateway {
    oracle: Arc<dyn Oracle>,
    timeout: Duration,
    inferred: SharedCache<String, String>,
    suggested: SharedCache<String, Vec<String>>,
}

impl OracleGateway {
    pub fn new(oracle: Arc<dyn Oracle>, timeout: Duration, cache_capacity: usize) -> Self {
        Self {
            oracle,
            timeout,
            inferred: SharedCache::new(cache_capacity),
            suggested: SharedCache::new(cache_capacity),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 단어 하나 추론 (검증된 결과만 반환)
    pub fn infer(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let key = request.cache_key();
        if let Some(word) = self.inferred.get(&key) {
            return Ok(word);
        }
        let raw = self.call(request, |oracle, req| oracle.infer(req))?;
        let word = parse_inferred_word(&raw)?;
        self.inferred.insert(key, word.clone());
        Ok(word)
    }

    /// 후보 목록 제안
    pub fn suggest_list(&self, request: &OracleRequest) -> Result<Vec<String>, OracleError> {
        let key = request.cache_key();
        if let Some(list) = self.suggested.get(&key) {
            return Ok(list);
        }
        let raw = self.call(request, |oracle, req| oracle.suggest_list(req))?;
        let list = parse_suggestion_list(&raw)?;
        self.suggested.insert(key, list.clone());
        Ok(list)
    }

    fn call<F>(&self, request: &OracleRequest, f: F) -> Result<String, OracleError>
    where
        F: FnOnce(&dyn Oracle, &OracleRequest) -> Result<String, OracleError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let oracle = Arc::clone(&self.oracle);
        let request = request.clone();
        thread::spawn(move || {
            // 제한 시간 이후의 응답은 수신 측이 이미 사라져 버려짐
            let _ = tx.send(f(oracle.as_ref(), &request));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(OracleError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(OracleError::Request("oracle worker exited".to_string()))
            }
        }
    }
}

/// 추론 응답 검증: 첫 토큰이 완성형 한글 2글자 이상을 포함해야 함
pub fn parse_inferred_word(raw: &str) -> Result<String, OracleError> {
    let token = raw
        .split_whitespace()
        .next()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .unwrap_or("");
    if SYLLABLE_RUN.is_match(token) {
        Ok(token.to_string())
    } else {
        Err(OracleError::Malformed(format!("not a Korean word: {:?}", raw)))
    }
}

/// 제안 응답 검증: 문자열 JSON 배열, 또는 배열 값을 가진 JSON 객체
///
/// 객체는 응답에 적힌 순서대로 보고 처음 나온 배열 필드를 씀
pub fn parse_suggestion_list(raw: &str) -> Result<Vec<String>, OracleError> {
    let body = strip_code_fence(raw);
    let value: Value =
        serde_json::from_str(body).map_err(|e| OracleError::Malformed(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| OracleError::Malformed("object without a list".to_string()))?,
        other => {
            return Err(OracleError::Malformed(format!("unexpected JSON: {}", other)));
        }
    };

    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect())
}

/// 마크다운 코드 펜스 제거
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}
