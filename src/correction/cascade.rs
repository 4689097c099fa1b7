//! 교정 단계 연쇄
//!
//! 짧은 질의 → 정확 일치 → 퍼지 후보 → 오라클 순으로 시도하고 처음 성공한 단계의 결과를 씁니다.
//! 오라클 실패는 에러가 아니라 `OracleUnavailable` 결과로 낮춰집니다.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::core::automaton::transliterate;
use crate::corpus::TermCorpus;
use crate::correction::fuzzy::{Candidate, FuzzyMatcher};
use crate::correction::oracle::{OracleGateway, OracleRequest};
use crate::error::Result;

/// 오라클에 넘길 힌트 개수
const ORACLE_HINT_LIMIT: usize = 5;

const EXACT_CONFIDENCE: f64 = 100.0;
const FUZZY_BASE_CONFIDENCE: f64 = 90.0;
const FUZZY_DISTANCE_PENALTY: f64 = 8.0;
const ORACLE_CONFIDENCE: f64 = 50.0;

/// 결과를 만든 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    TooShort,
    Exact,
    Fuzzy,
    Oracle,
    OracleUnavailable,
}

/// 교정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// 입력 질의 (앞뒤 공백 제거)
    pub original: String,
    /// 자판 변환이 일어난 경우 변환 결과
    pub transliterated: Option<String>,
    pub corrected: String,
    pub confidence: f64,
    pub provenance: Provenance,
    pub frequency: u64,
    pub top_category: Option<String>,
    /// 퍼지 단계 후보 (다른 단계에서는 비어 있음)
    pub candidates: Vec<Candidate>,
}

impl CorrectionResult {
    fn unchanged(original: &str, transliterated: Option<String>, provenance: Provenance) -> Self {
        Self {
            original: original.to_string(),
            transliterated,
            corrected: original.to_string(),
            confidence: 0.0,
            provenance,
            frequency: 0,
            top_category: None,
            candidates: Vec::new(),
        }
    }

    /// 교정 없이 그대로 쓸 수 있는 정확 일치인지
    pub fn is_exact(&self) -> bool {
        self.provenance == Provenance::Exact
    }
}

/// ASCII 문자로만 되어 있고 영문자가 하나라도 있으면 한글 자판 오타로 간주
pub fn needs_transliteration(query: &str) -> bool {
    query.is_ascii() && query.chars().any(|c| c.is_ascii_alphabetic())
}

/// 용어 교정기
pub struct Corrector {
    corpus: Arc<dyn TermCorpus>,
    oracle: Option<OracleGateway>,
    config: SearchConfig,
}

impl Corrector {
    pub fn new(corpus: Arc<dyn TermCorpus>, config: SearchConfig) -> Self {
        Self {
            corpus,
            oracle: None,
            config,
        }
    }

    pub fn with_oracle(mut self, oracle: OracleGateway) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 질의 교정
    ///
    /// 저장소 접근 실패만 에러로 전달합니다.
    pub fn correct(&self, term: &str) -> Result<CorrectionResult> {
        let original = term.trim();
        let transliterated = needs_transliteration(original).then(|| transliterate(original));
        let query = transliterated.as_deref().unwrap_or(original);

        // 1) 너무 짧음
        if query.chars().count() < self.config.min_query_chars {
            return Ok(CorrectionResult::unchanged(
                original,
                transliterated,
                Provenance::TooShort,
            ));
        }

        // 2) 정확 일치 (변환했다면 원래 영문도 확인)
        let mut exact = self.corpus.exact_lookup(query)?;
        if exact.is_none() && query != original {
            exact = self.corpus.exact_lookup(original)?;
        }
        if let Some(record) = exact {
            log::debug!("교정 '{}': 정확 일치", original);
            return Ok(CorrectionResult {
                original: original.to_string(),
                transliterated,
                corrected: record.term.clone(),
                confidence: EXACT_CONFIDENCE,
                provenance: Provenance::Exact,
                frequency: record.freq(),
                top_category: record.top_category,
                candidates: Vec::new(),
            });
        }

        // 3) 퍼지 후보
        let matcher = FuzzyMatcher::new(self.corpus.as_ref(), &self.config);
        let mut pool = matcher.prefilter_pool(query)?;
        let mut candidates = matcher.score_pool(query, &pool);
        if candidates.is_empty() && query != original {
            // 로마자 용어의 오타는 변환 전 입력으로 다시 찾음
            let raw_pool = matcher.prefilter_pool(original)?;
            let raw_candidates = matcher.score_pool(original, &raw_pool);
            if !raw_candidates.is_empty() {
                pool = raw_pool;
                candidates = raw_candidates;
            }
        }
        if let Some(best) = candidates.first().cloned() {
            log::debug!(
                "교정 '{}' -> '{}' (거리 {})",
                original,
                best.term,
                best.distance
            );
            return Ok(CorrectionResult {
                original: original.to_string(),
                transliterated,
                corrected: best.term,
                confidence: FUZZY_BASE_CONFIDENCE - FUZZY_DISTANCE_PENALTY * best.distance as f64,
                provenance: Provenance::Fuzzy,
                frequency: best.frequency,
                top_category: best.top_category,
                candidates,
            });
        }

        // 4) 오라클
        let Some(gateway) = &self.oracle else {
            return Ok(CorrectionResult::unchanged(
                original,
                transliterated,
                Provenance::OracleUnavailable,
            ));
        };
        let request = OracleRequest {
            original: original.to_string(),
            transliterated: query.to_string(),
            hints: matcher.near_misses(query, &pool, ORACLE_HINT_LIMIT),
        };
        match gateway.infer(&request) {
            Ok(word) => {
                log::debug!("교정 '{}' -> '{}' (오라클)", original, word);
                Ok(CorrectionResult {
                    original: original.to_string(),
                    transliterated,
                    corrected: word,
                    confidence: ORACLE_CONFIDENCE,
                    provenance: Provenance::Oracle,
                    frequency: 0,
                    top_category: None,
                    candidates: Vec::new(),
                })
            }
            Err(e) => {
                log::warn!("오라클 교정 실패 '{}': {}", original, e);
                Ok(CorrectionResult::unchanged(
                    original,
                    transliterated,
                    Provenance::OracleUnavailable,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{MemoryCorpus, PrefilterQuery, TermRecord};
    use crate::correction::oracle::Oracle;
    use crate::error::{OracleError, SearchError};
    use parking_lot::Mutex;
    use std::time::Duration;

    fn corpus() -> Arc<MemoryCorpus> {
        Arc::new(MemoryCorpus::from_records(vec![
            TermRecord::new("삼성전자", 1200),
            TermRecord::new("삼성", 900),
            TermRecord::new("테슬라", 700),
            TermRecord::new("Apple", 100),
            TermRecord::new("Tesla", 500),
        ]))
    }

    /// 요청을 기록하고 정해진 응답을 주는 오라클
    struct RecordingOracle {
        reply: std::result::Result<String, OracleError>,
        seen: Mutex<Vec<OracleRequest>>,
    }

    impl Oracle for RecordingOracle {
        fn infer(&self, request: &OracleRequest) -> std::result::Result<String, OracleError> {
            self.seen.lock().push(request.clone());
            self.reply.clone()
        }

        fn suggest_list(
            &self,
            _request: &OracleRequest,
        ) -> std::result::Result<String, OracleError> {
            Err(OracleError::Unavailable)
        }
    }

    fn with_oracle(reply: std::result::Result<String, OracleError>) -> (Corrector, Arc<RecordingOracle>) {
        let oracle = Arc::new(RecordingOracle {
            reply,
            seen: Mutex::new(Vec::new()),
        });
        let gateway = OracleGateway::new(oracle.clone(), Duration::from_secs(1), 16);
        let corrector = Corrector::new(corpus(), SearchConfig::default()).with_oracle(gateway);
        (corrector, oracle)
    }

    struct BrokenCorpus;

    impl TermCorpus for BrokenCorpus {
        fn prefilter(&self, _query: &PrefilterQuery) -> Result<Vec<TermRecord>> {
            Err(SearchError::corpus_unavailable("down"))
        }

        fn exact_lookup(&self, _term: &str) -> Result<Option<TermRecord>> {
            Err(SearchError::corpus_unavailable("down"))
        }
    }

    #[test]
    fn test_too_short() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        for q in ["", "a", " 삼 "] {
            let result = corrector.correct(q).unwrap();
            assert_eq!(result.provenance, Provenance::TooShort);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn test_too_short_counts_composed_syllables() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        // 키 두 개지만 한 음절
        let result = corrector.correct("rk").unwrap();
        assert_eq!(result.provenance, Provenance::TooShort);
        assert_eq!(result.transliterated.as_deref(), Some("가"));

        let result = corrector.correct("rkrk").unwrap();
        assert_ne!(result.provenance, Provenance::TooShort);
        assert_eq!(result.transliterated.as_deref(), Some("가가"));
    }

    #[test]
    fn test_exact() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        let result = corrector.correct("삼성전자").unwrap();
        assert_eq!(result.provenance, Provenance::Exact);
        assert_eq!(result.confidence, 100.0);
        assert_eq!(result.corrected, result.original);
        assert_eq!(result.frequency, 1200);
        assert!(result.is_exact());
    }

    #[test]
    fn test_exact_after_transliteration() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        let result = corrector.correct("tkatjd").unwrap();
        assert_eq!(result.provenance, Provenance::Exact);
        assert_eq!(result.transliterated.as_deref(), Some("삼성"));
        assert_eq!(result.corrected, "삼성");
    }

    #[test]
    fn test_exact_on_untransliterated_ascii() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        let result = corrector.correct("Apple").unwrap();
        assert_eq!(result.provenance, Provenance::Exact);
        assert_eq!(result.corrected, "Apple");
    }

    #[test]
    fn test_fuzzy() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        let result = corrector.correct("삼성쩐자").unwrap();
        assert_eq!(result.provenance, Provenance::Fuzzy);
        assert_eq!(result.corrected, "삼성전자");
        assert_eq!(result.confidence, 82.0);
        assert!(!result.candidates.is_empty());
    }

    #[test]
    fn test_fuzzy_on_latin_typo() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        let result = corrector.correct("Tesal").unwrap();
        assert_eq!(result.provenance, Provenance::Fuzzy);
        assert_eq!(result.corrected, "Tesla");
        assert_eq!(result.confidence, 74.0);
        assert!(result.transliterated.is_some());
    }

    #[test]
    fn test_no_oracle_configured() {
        let corrector = Corrector::new(corpus(), SearchConfig::default());
        let result = corrector.correct("없는단어").unwrap();
        assert_eq!(result.provenance, Provenance::OracleUnavailable);
        assert_eq!(result.corrected, "없는단어");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_oracle_success() {
        let (corrector, oracle) = with_oracle(Ok("딸기\n".to_string()));
        let result = corrector.correct("EKfrl").unwrap();
        // 딸기는 저장소에 없으므로 오라클까지 내려감
        assert_eq!(result.provenance, Provenance::Oracle);
        assert_eq!(result.corrected, "딸기");
        assert_eq!(result.confidence, 50.0);

        let seen = oracle.seen.lock();
        assert_eq!(seen[0].original, "EKfrl");
        assert_eq!(seen[0].transliterated, "딸기");
    }

    #[test]
    fn test_oracle_failure_downgrades() {
        let (corrector, _) = with_oracle(Err(OracleError::Request("500".to_string())));
        let result = corrector.correct("없는단어").unwrap();
        assert_eq!(result.provenance, Provenance::OracleUnavailable);
        assert_eq!(result.corrected, "없는단어");

        let (corrector, _) = with_oracle(Ok("unknown".to_string()));
        let result = corrector.correct("없는단어").unwrap();
        assert_eq!(result.provenance, Provenance::OracleUnavailable);
    }

    #[test]
    fn test_corpus_unavailable_propagates() {
        let corrector = Corrector::new(Arc::new(BrokenCorpus), SearchConfig::default());
        assert!(matches!(
            corrector.correct("삼성전자"),
            Err(SearchError::CorpusUnavailable(_))
        ));
        // 짧은 질의는 저장소를 건드리지 않음
        assert!(corrector.correct("a").is_ok());
    }

    #[test]
    fn test_needs_transliteration() {
        assert!(needs_transliteration("tkatjd"));
        assert!(needs_transliteration("tkatjd 2"));
        assert!(!needs_transliteration("2024"));
        assert!(!needs_transliteration("삼성"));
        assert!(!needs_transliteration("삼성a"));
    }

    #[test]
    fn test_provenance_serialization() {
        assert_eq!(
            serde_json::to_string(&Provenance::OracleUnavailable).unwrap(),
            "\"oracle-unavailable\""
        );
        assert_eq!(serde_json::to_string(&Provenance::TooShort).unwrap(), "\"too-short\"");
    }
}
