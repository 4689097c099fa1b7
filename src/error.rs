//! 에러 타입
//!
//! 오라클 실패는 교정 단계 안에서 흡수되므로 `OracleError`는 호출자에게 전달되지 않습니다.
//! 호출자가 받는 하드 에러는 사실상 `SearchError::CorpusUnavailable` 하나입니다.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// 검색/교정 에러
#[derive(Error, Debug)]
pub enum SearchError {
    /// 용어 저장소 접근 실패
    #[error("corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// 파일 읽기/쓰기 실패
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON 파싱 실패
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    pub fn corpus_unavailable<S: Into<String>>(msg: S) -> Self {
        SearchError::CorpusUnavailable(msg.into())
    }
}

/// 오라클 호출 실패
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// 오라클이 설정되지 않았거나 응답할 수 없음
    #[error("oracle unavailable")]
    Unavailable,

    /// 제한 시간 초과
    #[error("oracle timed out after {0:?}")]
    Timeout(Duration),

    /// 응답 형식 오류
    #[error("malformed oracle response: {0}")]
    Malformed(String),

    /// 호출 자체 실패 (네트워크 등)
    #[error("oracle request failed: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
